use std::fmt::{self, Display};

/// Rendered message of the sentinel failure for an unresolvable route.
pub const INVALID_ROUTE: &str = "invalid route";

/// Reason reported when no operation matches the request path.
pub const PATH_NOT_FOUND: &str = "no matching operation was found";

/// Reason reported when the path exists but not for the request method.
pub const METHOD_NOT_ALLOWED: &str = "Path doesn't support the HTTP method";

/// The request could not be resolved to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteError {
    /// Why resolution failed.
    pub reason: String,
}

impl RouteError {
    /// Creates a route error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// No operation matches the request path.
    pub fn path_not_found() -> Self {
        Self::new(PATH_NOT_FOUND)
    }

    /// The path is known but does not support the request method.
    pub fn method_not_allowed() -> Self {
        Self::new(METHOD_NOT_ALLOWED)
    }
}

impl Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for RouteError {}
