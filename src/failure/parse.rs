//! Failures to decode raw parameter or body values.

use std::fmt::{self, Display};
use std::iter;

use serde_json::Value;

use super::render_value;

/// What kind of decoding failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseErrorKind {
    #[default]
    Other,
    /// The declared format or media type has no decoder.
    UnsupportedFormat,
    /// The value does not match its declared format.
    InvalidFormat,
}

/// A raw value could not be decoded.
///
/// Parse errors form a cause chain through [`ParseError::cause`]; the last
/// link is the root cause.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use triage::{ParseError, ParseErrorKind};
///
/// let error = ParseError::new(ParseErrorKind::Other, "")
///     .with_cause(
///         ParseError::new(ParseErrorKind::InvalidFormat, "an invalid integer")
///             .with_value(json!("TEST")),
///     );
///
/// assert_eq!(error.root_cause().reason, "an invalid integer");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub reason: String,
    /// The raw value that failed to decode; `Null` when not reported.
    pub value: Value,
    pub cause: Option<Box<ParseError>>,
}

impl ParseError {
    /// Creates a parse error of the given kind and reason.
    pub fn new(kind: ParseErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            value: Value::Null,
            cause: None,
        }
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the underlying cause and returns self for chaining.
    pub fn with_cause(mut self, cause: ParseError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns an iterator over this error followed by each of its causes.
    pub fn chain(&self) -> impl Iterator<Item = &ParseError> {
        iter::successors(Some(self), |e| e.cause.as_deref())
    }

    /// Returns the deepest link of the cause chain (self when there is no cause).
    ///
    /// The walk is not bounded; the normalizer applies its own depth limit.
    pub fn root_cause(&self) -> &ParseError {
        self.chain().last().unwrap_or(self)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for link in self.chain() {
            if !link.value.is_null() {
                write!(f, "{}value {}", separator, render_value(&link.value))?;
                separator = ": ";
            }
            if !link.reason.is_empty() {
                write!(f, "{}{}", separator, link.reason)?;
                separator = ": ";
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
