//! Read-only request view presented to the engine.
//!
//! Header extraction from the live transport is the caller's job; the
//! engine only needs the path, method, host, a header list it can search
//! case-insensitively, and the raw Accept value.

/// Request attributes the matching engine reads.
///
/// Header names keep the casing the caller supplied; lookups are
/// case-insensitive per HTTP semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Request path, already stripped of query string
    pub path: String,
    /// HTTP method as sent (e.g. `GET`)
    pub method: String,
    /// Host the request was addressed to
    pub host: String,
    /// Header name/value pairs in arrival order
    pub headers: Vec<(String, String)>,
    /// Raw Accept header value, when one was sent
    pub accept: Option<String>,
}

impl RequestContext {
    /// Create a context for a request path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the request method
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the request host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Append a request header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the raw Accept header value
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Look up a header value by name, case-insensitively.
    ///
    /// Returns the first matching header's value with its casing intact.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
