//! Rules for values that could not be decoded.
//!
//! Rules are tried in order and the first match wins. A malformed path
//! parameter is reported as a missing resource, so clients cannot tell it
//! apart from an unknown id.

use http::StatusCode;

use super::{bounded_chain, DecodeError};
use crate::failure::{
    render_value, ParameterLocation, ParameterRef, ParseError, ParseErrorKind, RequestError,
};
use crate::normalized::{ErrorCategory, NormalizedError};

const UNSUPPORTED_CONTENT_TYPE: &str = "unsupported content type";

const FALLBACK_TITLE: &str = "Could not parse request body";

pub(crate) fn normalize(
    request: &RequestError,
    error: &ParseError,
    max_chain_depth: usize,
) -> Result<(ErrorCategory, NormalizedError), DecodeError> {
    let (category, normalized) = classify(request, error, max_chain_depth)?;
    Ok((category, with_fallback_title(normalized)))
}

fn classify(
    request: &RequestError,
    error: &ParseError,
    max_chain_depth: usize,
) -> Result<(ErrorCategory, NormalizedError), DecodeError> {
    let parameter = request.parameter.as_ref();
    let invalid_format = error.kind == ParseErrorKind::InvalidFormat;

    if invalid_format {
        if let Some(p) = parameter.filter(|p| p.location == ParameterLocation::Path) {
            let title = format!(
                "Resource not found with '{}' value: {}",
                p.name,
                render_value(&error.value)
            );
            return Ok((
                ErrorCategory::FormatConversion,
                NormalizedError::new(StatusCode::NOT_FOUND, title),
            ));
        }
    }

    if error.reason.starts_with(UNSUPPORTED_CONTENT_TYPE) {
        return Ok((
            ErrorCategory::ContentType,
            NormalizedError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, error.reason.clone()),
        ));
    }

    if invalid_format && !error.reason.is_empty() {
        if let Some(p) = parameter {
            return Ok((
                ErrorCategory::FormatConversion,
                NormalizedError::new(StatusCode::BAD_REQUEST, invalid_parameter_title(p, error)),
            ));
        }
    }

    let title = if error.cause.is_some() {
        let links = bounded_chain(error.chain(), max_chain_depth)?;
        let root = links.last().copied().unwrap_or(error);
        match parameter {
            Some(p)
                if root.kind == ParseErrorKind::InvalidFormat
                    && p.location == ParameterLocation::Query =>
            {
                invalid_parameter_title(p, root)
            }
            _ => root.reason.clone(),
        }
    } else {
        String::new()
    };

    Ok((
        ErrorCategory::FormatConversion,
        NormalizedError::new(StatusCode::BAD_REQUEST, title),
    ))
}

fn invalid_parameter_title(parameter: &ParameterRef, error: &ParseError) -> String {
    format!(
        "Parameter '{}' in {} is invalid: {} is {}",
        parameter.name,
        parameter.location,
        render_value(&error.value),
        error.reason
    )
}

fn with_fallback_title(mut normalized: NormalizedError) -> NormalizedError {
    if normalized.title.is_empty() {
        normalized.title = FALLBACK_TITLE.to_string();
    }
    normalized
}
