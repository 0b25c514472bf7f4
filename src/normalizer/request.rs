//! Rules for request errors without a structured cause, and for missing values.

use http::StatusCode;

use crate::failure::RequestError;
use crate::normalized::{ErrorCategory, NormalizedError};

const CONTENT_TYPE_PREFIX: &str = "header 'Content-Type' has unexpected value: ";

pub(crate) fn normalize_basic(error: &RequestError) -> (ErrorCategory, NormalizedError) {
    match error.reason.strip_prefix(CONTENT_TYPE_PREFIX) {
        Some(r#""""#) => (
            ErrorCategory::ContentType,
            NormalizedError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "header 'Content-Type' is required",
            ),
        ),
        Some(content_type) => (
            ErrorCategory::ContentType,
            NormalizedError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("unsupported content type {}", content_type),
            ),
        ),
        None => (
            ErrorCategory::InvalidRequest,
            NormalizedError::new(StatusCode::BAD_REQUEST, error.to_string()),
        ),
    }
}

pub(crate) fn normalize_required(error: &RequestError) -> NormalizedError {
    let title = match &error.parameter {
        Some(parameter) => format!(
            "Parameter '{}' in {} is required",
            parameter.name, parameter.location
        ),
        None => error.to_string(),
    };
    NormalizedError::new(StatusCode::BAD_REQUEST, title)
}
