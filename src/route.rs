//! Route table data model.
//!
//! A [`Route`] is one configured rule: a match kind and pattern for the
//! request path, optional plans for the other request dimensions, and
//! exactly one of an opaque `action` or a nested sub-route list. Routes
//! are plain data built once by the caller and treated as immutable
//! inputs to every match call.

use crate::pattern::{CaptureVec, Plan, MAX_INLINE_TOKENS};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

/// How a route's own pattern is matched against the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Exact path equality
    Exact,
    /// Path prefix; the remainder becomes positional tokens
    StartsWith,
    /// Regular expression; capture groups become tokens
    Regex,
    /// Catch-all returned when no other route matches
    Default,
}

/// Stack-allocated storage for name/value token pairs.
pub type NamedVec = SmallVec<[(String, String); MAX_INLINE_TOKENS]>;

/// Values captured from the request path during matching.
///
/// Tokens are positional when the route declares no names, or a
/// name-to-value mapping when the route's `tokens` list zips onto the
/// captured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokens {
    /// Captured values in pattern order
    Positional(CaptureVec),
    /// Captured values keyed by the route's declared token names
    Named(NamedVec),
}

impl Tokens {
    /// No tokens captured
    #[must_use]
    pub fn empty() -> Self {
        Tokens::Positional(CaptureVec::new())
    }

    /// Number of captured values
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Tokens::Positional(values) => values.len(),
            Tokens::Named(pairs) => pairs.len(),
        }
    }

    /// Whether nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a named token value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Tokens::Positional(_) => None,
            Tokens::Named(pairs) => pairs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Positional values, if the tokens are unnamed
    #[must_use]
    pub fn positional(&self) -> Option<&[String]> {
        match self {
            Tokens::Positional(values) => Some(values),
            Tokens::Named(_) => None,
        }
    }
}

impl Default for Tokens {
    fn default() -> Self {
        Tokens::empty()
    }
}

/// One configured route entry.
///
/// The `kind`/`pattern` pair is matched against the request path. The
/// optional dimensions (`method`, `host`, `headers`, `accept`) narrow the
/// match further; any unset dimension passes through. Exactly one of
/// `action` or `routes` must be set — the resolver rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    /// Match kind for the request path
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// Path pattern; may be empty only on default routes
    #[serde(default)]
    pub pattern: String,
    /// Plan matched against the request method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Plan>,
    /// Plan matched against the request host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Plan>,
    /// Per-header plans in declared order; every declared header must match
    #[serde(
        default,
        deserialize_with = "deserialize_headers",
        serialize_with = "serialize_headers",
        skip_serializing_if = "Option::is_none"
    )]
    pub headers: Option<Vec<(String, Plan)>>,
    /// Mime types this route can produce, in preference order
    #[serde(
        default,
        deserialize_with = "deserialize_accept",
        skip_serializing_if = "Option::is_none"
    )]
    pub accept: Option<Vec<String>>,
    /// Names assigned to captured path tokens
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
    /// Opaque handler reference; meaningless to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
    /// Nested sub-route list resolved when this route matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,
}

/// Headers are written as a JSON object; entry order is kept so the
/// match chain and the result annotations follow declaration order.
fn deserialize_headers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<(String, Plan)>>, D::Error> {
    struct HeadersVisitor;

    impl<'de> serde::de::Visitor<'de> for HeadersVisitor {
        type Value = Vec<(String, Plan)>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of header names to match plans")
        }

        fn visit_map<A: serde::de::MapAccess<'de>>(
            self,
            mut access: A,
        ) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, plan)) = access.next_entry::<String, Plan>()? {
                pairs.push((name, plan));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(HeadersVisitor).map(Some)
}

fn serialize_headers<S: Serializer>(
    headers: &Option<Vec<(String, Plan)>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let pairs = headers.as_deref().unwrap_or_default();
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (name, plan) in pairs {
        map.serialize_entry(name, plan)?;
    }
    map.end()
}

/// Accept may be written as a single mime string or a list of them.
fn deserialize_accept<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::String(mime)) => Ok(Some(vec![mime])),
        Some(Value::Array(items)) => {
            let mut types = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(mime) => types.push(mime),
                    other => {
                        return Err(D::Error::custom(format!(
                            "accept entries must be mime strings, found {other}"
                        )))
                    }
                }
            }
            Ok(Some(types))
        }
        Some(other) => Err(D::Error::custom(format!(
            "accept must be a mime string or a list of them, found {other}"
        ))),
    }
}

impl Route {
    /// Create a leaf route mapping a path match to an action.
    #[must_use]
    pub fn new(kind: RouteKind, pattern: impl Into<String>, action: impl Into<Value>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
            method: None,
            host: None,
            headers: None,
            accept: None,
            tokens: Vec::new(),
            action: Some(action.into()),
            routes: None,
        }
    }

    /// Create a route whose match recurses into a sub-route list.
    #[must_use]
    pub fn map(kind: RouteKind, pattern: impl Into<String>, routes: Vec<Route>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
            method: None,
            host: None,
            headers: None,
            accept: None,
            tokens: Vec::new(),
            action: None,
            routes: Some(routes),
        }
    }

    /// Require the request method to match `plan`.
    #[must_use]
    pub fn with_method(mut self, plan: Plan) -> Self {
        self.method = Some(plan);
        self
    }

    /// Require the request host to match `plan`.
    #[must_use]
    pub fn with_host(mut self, plan: Plan) -> Self {
        self.host = Some(plan);
        self
    }

    /// Require the named request header to match `plan`.
    ///
    /// The header is looked up case-insensitively at match time; the name
    /// keeps the casing declared here in the match result. Declaring the
    /// same name twice replaces the earlier plan in place.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, plan: Plan) -> Self {
        let name = name.into();
        let declared = self.headers.get_or_insert_with(Vec::new);
        if let Some(existing) = declared.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = plan;
        } else {
            declared.push((name, plan));
        }
        self
    }

    /// Declare the mime types this route can produce, in preference order.
    #[must_use]
    pub fn with_accept<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Name the tokens captured from the path, in capture order.
    ///
    /// When names are declared, a path match fails unless it captures
    /// exactly this many values.
    #[must_use]
    pub fn with_token_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is the catch-all default route
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.kind == RouteKind::Default
    }
}

/// Outcome of matching one route: the route itself plus the request
/// attributes that were resolved while matching.
///
/// Allocated fresh per match attempt; the caller reads the annotations and
/// the route's `action` and discards the value.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The matched route entry
    pub route: Route,
    /// Tokens captured from the request path
    pub tokens: Tokens,
    /// The request method, when one was present
    pub method: Option<String>,
    /// The request host, when the route declared a host plan
    pub host: Option<String>,
    /// The declared headers that matched, keyed by the route's casing
    pub headers: Vec<(String, String)>,
    /// The negotiated mime type, when the route declared accept types
    pub accept: Option<String>,
}

impl MatchResult {
    /// The matched route's opaque action, if it carries one
    #[must_use]
    pub fn action(&self) -> Option<&Value> {
        self.route.action.as_ref()
    }

    /// Look up a matched header by its declared name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
