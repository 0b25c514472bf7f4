//! Request validation failures and the parameters they refer to.

use std::fmt::{self, Display};

use super::parse::ParseError;
use super::renders_as;
use super::schema::SchemaError;

/// Rendered message of the required-value sentinel.
pub const REQUIRED_MESSAGE: &str = "value is required but missing";

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Returns the lowercase name used in OpenAPI documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation parameter a request failure is attached to.
///
/// `style` and `explode` are the serialization settings declared for the
/// parameter; `None` means the document left them at their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRef {
    pub name: String,
    pub location: ParameterLocation,
    pub style: Option<String>,
    pub explode: Option<bool>,
}

impl ParameterRef {
    /// Creates a parameter reference with default serialization settings.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            style: None,
            explode: None,
        }
    }

    /// Shorthand for a path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path)
    }

    /// Shorthand for a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Shorthand for a header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    /// Shorthand for a cookie parameter.
    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }

    /// Sets the declared serialization style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets the declared `explode` flag.
    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = Some(explode);
        self
    }

    /// Returns true if array values for this parameter are sent as repeated
    /// `name=value` pairs (form style, exploded; both are the defaults).
    pub fn is_exploded_form(&self) -> bool {
        self.explode.unwrap_or(true) && self.style.as_deref().map_or(true, |s| s == "form")
    }
}

/// The underlying failure wrapped by a [`RequestError`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestCause {
    /// A required parameter or body was missing.
    Required,
    /// A raw value could not be decoded.
    Parse(ParseError),
    /// A decoded value violated its schema.
    Schema(SchemaError),
    /// A cause of unknown shape, by its rendered message.
    Other(String),
}

impl Display for RequestCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestCause::Required => f.write_str(REQUIRED_MESSAGE),
            RequestCause::Parse(e) => Display::fmt(e, f),
            RequestCause::Schema(e) => Display::fmt(e, f),
            RequestCause::Other(message) => f.write_str(message),
        }
    }
}

impl From<ParseError> for RequestCause {
    fn from(error: ParseError) -> Self {
        RequestCause::Parse(error)
    }
}

impl From<SchemaError> for RequestCause {
    fn from(error: SchemaError) -> Self {
        RequestCause::Schema(error)
    }
}

/// A request (or response) failed validation against its operation.
///
/// # Example
///
/// ```rust
/// use triage::{ParameterRef, RequestCause, RequestError};
///
/// let error = RequestError::new()
///     .with_parameter(ParameterRef::query("id"))
///     .with_cause(RequestCause::Required);
///
/// assert_eq!(
///     error.to_string(),
///     r#"parameter "id" in query has an error: value is required but missing"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestError {
    /// Why validation failed, when the validator gave a reason of its own.
    pub reason: String,
    /// The parameter being validated, if any.
    pub parameter: Option<ParameterRef>,
    /// True if the failure concerns the request body.
    pub request_body_present: bool,
    /// The wrapped failure, if any.
    pub cause: Option<RequestCause>,
}

impl RequestError {
    /// Creates an empty request error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reason and returns self for chaining.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Attaches the parameter under validation.
    pub fn with_parameter(mut self, parameter: ParameterRef) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Marks the failure as concerning the request body.
    pub fn with_request_body(mut self) -> Self {
        self.request_body_present = true;
        self
    }

    /// Sets the wrapped failure.
    pub fn with_cause(mut self, cause: impl Into<RequestCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref parameter) = self.parameter {
            write!(
                f,
                "parameter \"{}\" in {} has an error: ",
                parameter.name, parameter.location
            )?;
        } else if self.request_body_present {
            f.write_str("request body has an error: ")?;
        }

        match &self.cause {
            None => f.write_str(&self.reason),
            Some(cause) if self.reason.is_empty() || renders_as(cause, &self.reason) => {
                Display::fmt(cause, f)
            }
            Some(cause) => write!(f, "{}: {}", self.reason, cause),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Some(RequestCause::Parse(e)) => Some(e),
            Some(RequestCause::Schema(e)) => Some(e),
            _ => None,
        }
    }
}
