//! Rules for schema violations.
//!
//! The innermost origin supplies the base title. Each link of the origin
//! chain, innermost first, then adds its own location suffix and enum detail,
//! so the outermost link has the final say on source and detail.

use http::StatusCode;

use super::{bounded_chain, DecodeError};
use crate::failure::{render_value, ParameterLocation, ParameterRef, RequestError, SchemaError};
use crate::normalized::{ErrorSource, NormalizedError};

const ENUM_FIELD: &str = "enum";

const ENUM_REASON: &str = "JSON value is not one of the allowed values";

/// Returns `Ok(None)` when the failure concerns neither a parameter nor a
/// request body, which leaves the status undetermined.
pub(crate) fn normalize(
    request: &RequestError,
    error: &SchemaError,
    max_chain_depth: usize,
) -> Result<Option<NormalizedError>, DecodeError> {
    let links = bounded_chain(error.chain(), max_chain_depth)?;

    let status = if request.parameter.is_some() {
        StatusCode::BAD_REQUEST
    } else if request.request_body_present {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        return Ok(None);
    };

    let innermost = links.last().copied().unwrap_or(error);
    let mut normalized = NormalizedError::new(status, innermost.reason.clone());
    for link in links.iter().rev() {
        decorate(&mut normalized, request.parameter.as_ref(), link);
    }
    Ok(Some(normalized))
}

fn decorate(normalized: &mut NormalizedError, parameter: Option<&ParameterRef>, link: &SchemaError) {
    // Query parameters carry a pointer too; the parameter name takes priority.
    match parameter {
        Some(p) if p.location == ParameterLocation::Query => {
            normalized.title.push_str(&format!(" See {}", p.name));
            normalized.source = Some(ErrorSource::Parameter(p.name.clone()));
        }
        _ if !link.json_pointer_path.is_empty() => {
            let pointer = link.pointer().to_string();
            normalized.title.push_str(&format!(" See {}", pointer));
            normalized.source = Some(ErrorSource::Pointer(pointer));
        }
        _ => {}
    }

    if link.schema_field == ENUM_FIELD && link.reason == ENUM_REASON {
        normalized.detail = Some(enum_detail(parameter, link));
    }
}

fn enum_detail(parameter: Option<&ParameterRef>, link: &SchemaError) -> String {
    let value = render_value(&link.value);
    let allowed = link
        .enum_values
        .iter()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(", ");
    let mut detail = format!(
        "Value '{}' at {} must be one of: {}",
        value,
        link.pointer(),
        allowed
    );

    if let Some(p) = parameter.filter(|p| p.is_exploded_form()) {
        if value.contains(',') {
            let pairs = value
                .split(',')
                .map(|v| format!("{}={}", p.name, v))
                .collect::<Vec<_>>()
                .join("&");
            detail.push_str(&format!("; perhaps you intended '?{}'", pairs));
        }
    }
    detail
}
