use crate::error::RouterError;
use crate::pattern::cache::RegexCache;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use smallvec::SmallVec;

/// Maximum number of captured tokens before heap allocation.
///
/// Most route patterns capture a handful of path segments at most, so
/// captures are kept on the stack for the common case.
pub const MAX_INLINE_TOKENS: usize = 8;

/// Stack-allocated storage for captured token values.
pub type CaptureVec = SmallVec<[String; MAX_INLINE_TOKENS]>;

/// How a typed plan compares its pattern against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// Exact string equality
    Exact,
    /// Byte-wise prefix test; a proper prefix yields the remainder
    StartsWith,
    /// Regular expression match with capture extraction
    Regex,
}

impl PlanKind {
    /// Wire name of the kind as it appears in configuration
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Exact => "exact",
            PlanKind::StartsWith => "starts_with",
            PlanKind::Regex => "regex",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(PlanKind::Exact),
            "starts_with" => Some(PlanKind::StartsWith),
            "regex" => Some(PlanKind::Regex),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A match plan: the value a request attribute is tested against.
///
/// Configuration may express a plan as a bare scalar (exact equality), an
/// unkeyed list (membership test), or a `{type, pattern}` object selecting
/// one of the typed comparisons. The shape is resolved once at
/// construction time rather than re-inspected per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Match iff the target equals the literal exactly
    Literal(String),
    /// Match iff the target is a member of the set
    OneOf(Vec<String>),
    /// Typed comparison selected by `kind`
    Typed {
        /// Comparison strategy
        kind: PlanKind,
        /// Literal, prefix, or regex pattern depending on `kind`
        pattern: String,
    },
}

/// Successful outcome of evaluating a plan against a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanMatch {
    /// Matched, with zero or more captured values in pattern order
    Captures(CaptureVec),
    /// A `starts_with` plan matched a proper prefix; the remainder of the
    /// target is returned raw for the caller to segment
    Remainder(String),
}

impl PlanMatch {
    /// Matched with nothing captured
    #[must_use]
    pub fn empty() -> Self {
        PlanMatch::Captures(CaptureVec::new())
    }
}

impl Plan {
    /// Shorthand for a typed plan
    #[must_use]
    pub fn typed(kind: PlanKind, pattern: impl Into<String>) -> Self {
        Plan::Typed {
            kind,
            pattern: pattern.into(),
        }
    }

    /// Build a plan from loosely typed configuration data.
    ///
    /// Accepts a scalar (exact equality), an array of scalars (membership),
    /// or a `{type, pattern}` object. Numbers and booleans are stringified
    /// the way they would appear in a request attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidMatchType`] for any other shape: an
    /// object missing `type` or `pattern`, an unknown `type` value, a list
    /// containing non-scalar entries, or `null`.
    pub fn from_value(value: &Value) -> Result<Self, RouterError> {
        match value {
            Value::String(s) => Ok(Plan::Literal(s.clone())),
            Value::Number(n) => Ok(Plan::Literal(n.to_string())),
            Value::Bool(b) => Ok(Plan::Literal(b.to_string())),
            Value::Array(items) => {
                let mut members = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => members.push(s.clone()),
                        Value::Number(n) => members.push(n.to_string()),
                        Value::Bool(b) => members.push(b.to_string()),
                        other => {
                            return Err(RouterError::InvalidMatchType(format!(
                                "list plans may only contain scalars, found {other}"
                            )))
                        }
                    }
                }
                Ok(Plan::OneOf(members))
            }
            Value::Object(map) => {
                let kind = map
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        RouterError::InvalidMatchType(
                            "keyed plans require a string 'type' field".to_string(),
                        )
                    })?;
                let pattern = map
                    .get("pattern")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        RouterError::InvalidMatchType(
                            "keyed plans require a string 'pattern' field".to_string(),
                        )
                    })?;
                let kind = PlanKind::from_wire(kind).ok_or_else(|| {
                    RouterError::InvalidMatchType(format!("unknown match type '{kind}'"))
                })?;
                Ok(Plan::typed(kind, pattern))
            }
            Value::Null => Err(RouterError::InvalidMatchType(
                "null is not a valid match plan".to_string(),
            )),
        }
    }

    /// Evaluate this plan against `target`.
    ///
    /// Returns `Ok(None)` when the plan does not match. Empty patterns and
    /// empty targets are valid and compared literally.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when a regex plan fails to
    /// compile.
    pub fn matches(
        &self,
        target: &str,
        cache: &RegexCache,
    ) -> Result<Option<PlanMatch>, RouterError> {
        match self {
            Plan::Literal(literal) => {
                if literal == target {
                    Ok(Some(PlanMatch::empty()))
                } else {
                    Ok(None)
                }
            }
            Plan::OneOf(members) => {
                if members.iter().any(|m| m == target) {
                    Ok(Some(PlanMatch::empty()))
                } else {
                    Ok(None)
                }
            }
            Plan::Typed { kind, pattern } => match kind {
                PlanKind::Exact => {
                    if pattern == target {
                        Ok(Some(PlanMatch::empty()))
                    } else {
                        Ok(None)
                    }
                }
                PlanKind::StartsWith => match target.strip_prefix(pattern.as_str()) {
                    Some("") => Ok(Some(PlanMatch::empty())),
                    Some(rest) => Ok(Some(PlanMatch::Remainder(rest.to_string()))),
                    None => Ok(None),
                },
                PlanKind::Regex => {
                    let regex = cache.get_or_compile(pattern)?;
                    match regex.captures(target) {
                        None => Ok(None),
                        Some(caps) => {
                            if caps.len() <= 1 {
                                return Ok(Some(PlanMatch::empty()));
                            }
                            // Group 0 is the whole match and is dropped;
                            // groups that did not participate capture "".
                            let tokens: CaptureVec = caps
                                .iter()
                                .skip(1)
                                .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                                .collect();
                            Ok(Some(PlanMatch::Captures(tokens)))
                        }
                    }
                }
            },
        }
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Plan::Literal(s) => serializer.serialize_str(s),
            Plan::OneOf(members) => members.serialize(serializer),
            Plan::Typed { kind, pattern } => {
                json!({ "type": kind.as_str(), "pattern": pattern }).serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Plan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Plan::from_value(&value).map_err(D::Error::custom)
    }
}
