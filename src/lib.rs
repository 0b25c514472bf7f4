//! # Triage
//!
//! Turns the failures reported by an OpenAPI request/response validation
//! pipeline into a stable, client-safe error shape: an HTTP status, a title,
//! and, for schema violations, a detail and the location of the problem.
//!
//! ## Overview
//!
//! Triage does not validate anything itself. The pipeline that matches
//! requests to operations and checks parameters and bodies reports its
//! failures as [`ValidationFailure`] values; [`Normalizer::decode`] sorts each
//! one into a known shape and produces a [`NormalizedError`], or reports it as
//! unrecognized so the caller can answer with a generic internal error.
//!
//! ## Core Types
//!
//! - [`ValidationFailure`]: Closed hierarchy of pipeline failures (route, request, parse, schema)
//! - [`NormalizedError`]: The client-facing error (status, title, detail, source)
//! - [`Normalizer`]: Entry point that applies the rule set for each failure variant
//! - [`JsonPointer`]: Slash-delimited location of a value inside a request document
//! - [`ErrorBoundary`]: Converts failures into HTTP responses and log events
//!
//! ## Example
//!
//! ```rust
//! use http::StatusCode;
//! use serde_json::json;
//! use triage::{decode, ParameterRef, ParseError, ParseErrorKind, RequestError, ValidationFailure};
//!
//! let failure: ValidationFailure = RequestError::new()
//!     .with_parameter(ParameterRef::query("limit"))
//!     .with_cause(
//!         ParseError::new(ParseErrorKind::InvalidFormat, "an invalid integer")
//!             .with_value(json!("TEST")),
//!     )
//!     .into();
//!
//! let error = decode(&failure).unwrap();
//! assert_eq!(error.status, StatusCode::BAD_REQUEST);
//! assert_eq!(
//!     error.title,
//!     "Parameter 'limit' in query is invalid: TEST is an invalid integer"
//! );
//! ```

pub mod boundary;
pub mod failure;
pub mod normalized;
pub mod normalizer;
pub mod pointer;

pub use boundary::{ErrorBoundary, Rejection};
pub use failure::{
    ParameterLocation, ParameterRef, ParseError, ParseErrorKind, RequestCause, RequestError,
    RouteError, SchemaError, ValidationFailure,
};
pub use normalized::{ErrorCategory, ErrorSource, NormalizedError};
pub use normalizer::{decode, DecodeError, Normalizer};
pub use pointer::JsonPointer;

/// Type alias for the outcome of decoding a validation failure.
pub type DecodeResult = Result<NormalizedError, DecodeError>;
