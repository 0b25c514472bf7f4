//! Translation of validation failures into [`NormalizedError`]s.
//!
//! [`Normalizer::decode`] dispatches on the failure variant and applies the
//! rule set for it. Each rule set lives in its own module and is a pure
//! function of the failure.
//!
//! # Example
//!
//! ```rust
//! use http::StatusCode;
//! use triage::{Normalizer, ParameterRef, RequestCause, RequestError, ValidationFailure};
//!
//! let failure = ValidationFailure::from(
//!     RequestError::new()
//!         .with_parameter(ParameterRef::query("id"))
//!         .with_cause(RequestCause::Required),
//! );
//!
//! let error = Normalizer::new().decode(&failure).unwrap();
//! assert_eq!(error.status, StatusCode::BAD_REQUEST);
//! assert_eq!(error.title, "Parameter 'id' in query is required");
//! ```

mod parse;
mod request;
mod route;
mod schema;

use http::StatusCode;

use crate::failure::{RequestCause, ValidationFailure, INVALID_ROUTE};
use crate::normalized::{ErrorCategory, NormalizedError};
use crate::DecodeResult;

/// Default bound on the number of links followed in a cause or origin chain.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 100;

/// Errors returned when a failure cannot be normalized.
///
/// Callers must treat both variants as an internal failure and must not
/// show the contained text to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The failure does not match any known shape.
    #[error("unrecognized validation failure: {message}")]
    Unrecognized { message: String },

    /// A cause or origin chain is longer than the configured bound.
    #[error("failure chain exceeds {limit} links")]
    ChainTooDeep { limit: usize },
}

impl DecodeError {
    fn unrecognized(failure: &ValidationFailure) -> Self {
        DecodeError::Unrecognized {
            message: failure.to_string(),
        }
    }
}

/// Translates validation failures into client-safe errors.
///
/// A `Normalizer` holds configuration only; decoding never mutates it, so a
/// single instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_chain_depth: usize,
}

impl Normalizer {
    /// Creates a normalizer with the default chain depth bound (100).
    pub fn new() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    /// Sets the maximum number of links followed in a cause or origin chain.
    ///
    /// Longer chains fail with [`DecodeError::ChainTooDeep`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::Normalizer;
    ///
    /// let normalizer = Normalizer::new().with_max_chain_depth(8);
    /// assert_eq!(normalizer.max_chain_depth(), 8);
    /// ```
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Returns the configured chain depth bound.
    pub fn max_chain_depth(&self) -> usize {
        self.max_chain_depth
    }

    /// Normalizes a validation failure.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Unrecognized`] if the failure does not match a
    /// known shape, and [`DecodeError::ChainTooDeep`] if one of its chains is
    /// longer than the configured bound.
    pub fn decode(&self, failure: &ValidationFailure) -> DecodeResult {
        self.decode_categorized(failure).map(|(_, error)| error)
    }

    /// Normalizes a validation failure and reports the category it fell into.
    ///
    /// # Errors
    ///
    /// Same as [`Normalizer::decode`].
    pub fn decode_categorized(
        &self,
        failure: &ValidationFailure,
    ) -> Result<(ErrorCategory, NormalizedError), DecodeError> {
        let (category, error) = self.dispatch(failure)?;
        if error.title.is_empty() {
            return Err(DecodeError::unrecognized(failure));
        }

        tracing::debug!(
            category = %category,
            status = error.status.as_u16(),
            title = %error.title,
            "normalized validation failure"
        );
        Ok((category, error))
    }

    fn dispatch(
        &self,
        failure: &ValidationFailure,
    ) -> Result<(ErrorCategory, NormalizedError), DecodeError> {
        if failure.message_is(INVALID_ROUTE) {
            return Ok((
                ErrorCategory::Routing,
                NormalizedError::new(StatusCode::NOT_FOUND, "not found"),
            ));
        }

        match failure {
            ValidationFailure::Route(error) => Ok((ErrorCategory::Routing, route::normalize(error))),
            ValidationFailure::Request(error) => match &error.cause {
                None => Ok(request::normalize_basic(error)),
                Some(RequestCause::Required) => Ok((
                    ErrorCategory::RequiredField,
                    request::normalize_required(error),
                )),
                Some(RequestCause::Parse(cause)) => {
                    parse::normalize(error, cause, self.max_chain_depth)
                }
                Some(RequestCause::Schema(cause)) => {
                    schema::normalize(error, cause, self.max_chain_depth)?
                        .map(|normalized| (ErrorCategory::SchemaViolation, normalized))
                        .ok_or_else(|| DecodeError::unrecognized(failure))
                }
                Some(RequestCause::Other(_)) => Err(DecodeError::unrecognized(failure)),
            },
            ValidationFailure::Other(_) => Err(DecodeError::unrecognized(failure)),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a validation failure with a default [`Normalizer`].
///
/// # Errors
///
/// Same as [`Normalizer::decode`].
pub fn decode(failure: &ValidationFailure) -> DecodeResult {
    Normalizer::new().decode(failure)
}

/// Collects the links of a chain, failing once more than `limit` links
/// follow the first one.
fn bounded_chain<'a, T: 'a>(
    chain: impl Iterator<Item = &'a T>,
    limit: usize,
) -> Result<Vec<&'a T>, DecodeError> {
    let mut links = Vec::new();
    for link in chain {
        if links.len() > limit {
            return Err(DecodeError::ChainTooDeep { limit });
        }
        links.push(link);
    }
    Ok(links)
}
