use std::fmt;

/// Errors raised while validating or matching a route table.
///
/// Every variant indicates a configuration defect, not a transient
/// condition. Callers should fix the route table rather than retry; the
/// engine performs no internal recovery because silently skipping a broken
/// route could misroute requests.
#[derive(Debug)]
pub enum RouterError {
    /// A route entry violates a structural invariant
    ///
    /// Raised for a missing pattern on a non-default route, a route with
    /// both or neither of `action`/`routes`, or a second `default` route
    /// in one list.
    InvalidRoute(String),
    /// A match plan is structurally malformed
    ///
    /// Raised when a plan value is neither a scalar, a list of scalars,
    /// nor a `{type, pattern}` object, or when its `type` is unknown.
    InvalidMatchType(String),
    /// A `regex`-typed plan's pattern failed to compile
    InvalidPattern {
        /// The pattern as written in the route configuration
        pattern: String,
        /// The underlying compile error
        source: regex::Error,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidRoute(msg) => {
                write!(f, "invalid route: {msg}")
            }
            RouterError::InvalidMatchType(msg) => {
                write!(f, "invalid match plan: {msg}")
            }
            RouterError::InvalidPattern { pattern, source } => {
                write!(f, "invalid regex pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}
