use http::StatusCode;

use crate::failure::{RouteError, METHOD_NOT_ALLOWED};
use crate::normalized::NormalizedError;

/// Unknown methods on a known path are 405; every other routing failure is 404.
pub(crate) fn normalize(error: &RouteError) -> NormalizedError {
    let status = if error.reason == METHOD_NOT_ALLOWED {
        StatusCode::METHOD_NOT_ALLOWED
    } else {
        StatusCode::NOT_FOUND
    };
    NormalizedError::new(status, error.reason.clone())
}
