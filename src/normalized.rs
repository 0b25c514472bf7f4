//! The client-facing error shape produced by the normalizer.

use std::fmt::{self, Display};

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Where in the request a normalized error originates.
///
/// A parameter name takes priority over a document pointer, so only one of
/// the two is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSource {
    /// The name of the offending query parameter.
    Parameter(String),
    /// A pointer into the request body, e.g. `/name`.
    Pointer(String),
}

/// A stable, client-safe description of a validation failure.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use triage::{decode, RouteError, ValidationFailure};
///
/// let failure = ValidationFailure::from(RouteError::method_not_allowed());
/// let error = decode(&failure).unwrap();
///
/// assert_eq!(error.status, StatusCode::METHOD_NOT_ALLOWED);
/// assert_eq!(error.title, "Path doesn't support the HTTP method");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedError {
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl NormalizedError {
    /// Creates an error with a status and title and no detail or source.
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: None,
            source: None,
        }
    }

    /// Sets the detail and returns self for chaining.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the source and returns self for chaining.
    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the offending parameter name, if the source is a parameter.
    pub fn parameter(&self) -> Option<&str> {
        match &self.source {
            Some(ErrorSource::Parameter(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the document pointer, if the source is a pointer.
    pub fn pointer(&self) -> Option<&str> {
        match &self.source {
            Some(ErrorSource::Pointer(pointer)) => Some(pointer),
            _ => None,
        }
    }
}

impl Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.title)?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// The class a validation failure was sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No operation matches the request.
    Routing,
    /// The request media type is missing or unsupported.
    ContentType,
    /// A required parameter or body is missing.
    RequiredField,
    /// The request was rejected without a more specific cause.
    InvalidRequest,
    /// A raw value could not be decoded.
    FormatConversion,
    /// A decoded value violates its schema.
    SchemaViolation,
    /// The failure does not match any known shape.
    Unrecognized,
}

impl ErrorCategory {
    /// Returns the snake_case name written to log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Routing => "routing",
            ErrorCategory::ContentType => "content_type",
            ErrorCategory::RequiredField => "required_field",
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::FormatConversion => "format_conversion",
            ErrorCategory::SchemaViolation => "schema_violation",
            ErrorCategory::Unrecognized => "unrecognized",
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
