//! HTTP boundary for normalized failures.
//!
//! [`ErrorBoundary`] sits between the validation pipeline and the client. A
//! failed request becomes a [`Rejection`] whose body is `{"error": title}`.
//! Failures that cannot be normalized become a fixed 500 so that internal
//! text never reaches the client. Response validation failures are only
//! logged, since the response is already on its way.

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde_json::{json, Value};

use crate::failure::ValidationFailure;
use crate::normalized::ErrorCategory;
use crate::normalizer::Normalizer;

/// Title sent to clients when a failure cannot be normalized.
pub const INTERNAL_ERROR_TITLE: &str = "internal server error";

/// A client response for a rejected request.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status: StatusCode,
    /// Always an object of the form `{"error": "<title>"}`.
    pub body: Value,
}

impl Rejection {
    fn new(status: StatusCode, title: &str) -> Self {
        Self {
            status,
            body: json!({ "error": title }),
        }
    }

    /// Returns the title carried in the body.
    pub fn title(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// Builds a JSON HTTP response for this rejection.
    pub fn into_response(self) -> Response<Vec<u8>> {
        let mut response = Response::new(self.body.to_string().into_bytes());
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

/// Converts pipeline failures into client responses and log events.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use triage::{ErrorBoundary, ValidationFailure};
///
/// let boundary = ErrorBoundary::new();
///
/// let rejection = boundary.reject(&ValidationFailure::other("invalid route"));
/// assert_eq!(rejection.status, StatusCode::NOT_FOUND);
/// assert_eq!(rejection.title(), "not found");
///
/// let rejection = boundary.reject(&ValidationFailure::other("db password leaked"));
/// assert_eq!(rejection.status, StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(rejection.title(), "internal server error");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorBoundary {
    normalizer: Normalizer,
}

impl ErrorBoundary {
    /// Creates a boundary backed by a default [`Normalizer`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the normalizer used to decode failures.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Returns the normalizer used to decode failures.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Turns a routing or request validation failure into a client rejection.
    pub fn reject(&self, failure: &ValidationFailure) -> Rejection {
        match self.normalizer.decode(failure) {
            Ok(normalized) => Rejection::new(normalized.status, &normalized.title),
            Err(err) => {
                tracing::error!(
                    category = %ErrorCategory::Unrecognized,
                    error = %err,
                    "could not normalize request validation failure"
                );
                Rejection::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_TITLE)
            }
        }
    }

    /// Records a response validation failure.
    ///
    /// The response has already been sent, so nothing is returned to the client.
    pub fn response_failure(&self, failure: &ValidationFailure) {
        tracing::error!(error = %failure, "could not validate response payload");
    }
}
