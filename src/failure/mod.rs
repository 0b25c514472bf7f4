//! Failure values produced by the validation pipeline.
//!
//! The pipeline that matches requests to operations and checks payloads reports
//! its failures through the closed hierarchy in this module. These values are
//! created once per failed validation call and only ever read by the normalizer.

mod parse;
mod request;
mod route;
mod schema;

use std::fmt::{self, Display};

use serde_json::Value;

pub use parse::{ParseError, ParseErrorKind};
pub use request::{ParameterLocation, ParameterRef, RequestCause, RequestError, REQUIRED_MESSAGE};
pub use route::{RouteError, INVALID_ROUTE, METHOD_NOT_ALLOWED, PATH_NOT_FOUND};
pub use schema::SchemaError;

/// Any failure handed over by the validation pipeline.
///
/// `Other` carries the rendered message of a failure whose shape is not
/// modelled here; the normalizer only recognizes it through that message.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// The request could not be matched to an operation.
    Route(RouteError),
    /// The request (or response) failed validation against its operation.
    Request(RequestError),
    /// A failure of unknown shape, by its rendered message.
    Other(String),
}

impl ValidationFailure {
    /// Creates an opaque failure from its message.
    pub fn other(message: impl Into<String>) -> Self {
        ValidationFailure::Other(message.into())
    }

    /// Returns true if this failure renders exactly as `text`.
    ///
    /// Rendering stops at the first piece that departs from `text`, so no
    /// message is built. Schema origin chains are still walked to their
    /// innermost link before the first piece is written.
    pub fn message_is(&self, text: &str) -> bool {
        renders_as(self, text)
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::Route(e) => Display::fmt(e, f),
            ValidationFailure::Request(e) => Display::fmt(e, f),
            ValidationFailure::Other(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for ValidationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationFailure::Route(e) => Some(e),
            ValidationFailure::Request(e) => Some(e),
            ValidationFailure::Other(_) => None,
        }
    }
}

impl From<RouteError> for ValidationFailure {
    fn from(error: RouteError) -> Self {
        ValidationFailure::Route(error)
    }
}

impl From<RequestError> for ValidationFailure {
    fn from(error: RequestError) -> Self {
        ValidationFailure::Request(error)
    }
}

/// Renders a reported value for use in messages.
///
/// Strings are written without quotes; any other value is written as JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compares the rendering of `value` with `text` piece by piece.
pub(crate) fn renders_as(value: &dyn Display, text: &str) -> bool {
    struct Matcher<'a> {
        remaining: &'a str,
    }

    impl fmt::Write for Matcher<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.remaining = self.remaining.strip_prefix(s).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    let mut matcher = Matcher { remaining: text };
    fmt::write(&mut matcher, format_args!("{}", value)).is_ok() && matcher.remaining.is_empty()
}

// All failure types hold owned data only.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};
