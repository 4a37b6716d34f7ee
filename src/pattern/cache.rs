//! Compile-once cache for regex patterns.
//!
//! Regex compilation is far more expensive than matching. Route tables are
//! read-only and reuse the same handful of patterns across every request,
//! so compiled patterns are stored in a read-mostly map and shared via
//! `Arc`. Multiple resolver calls may query or populate the cache
//! concurrently; readers never block each other.

use crate::error::RouterError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe table of compiled regexes keyed by pattern string.
///
/// Cloning the cache is cheap and shares the underlying table, so a
/// `Router` and its recursive sub-resolutions all hit the same entries.
#[derive(Debug, Clone, Default)]
pub struct RegexCache {
    patterns: Arc<RwLock<HashMap<String, Arc<Regex>>>>,
}

impl RegexCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled form of `pattern`, compiling on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the pattern does not
    /// compile. Compile failures are not cached; a broken pattern fails on
    /// every call until the configuration is fixed.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>, RouterError> {
        {
            let cache = self.patterns.read().expect("regex cache lock poisoned");
            if let Some(regex) = cache.get(pattern) {
                return Ok(Arc::clone(regex));
            }
        }

        let compiled = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let compiled = Arc::new(compiled);

        let mut cache = self.patterns.write().expect("regex cache lock poisoned");
        // Another thread may have compiled the same pattern while we held
        // no lock; keep the first entry so all callers share one regex.
        let entry = cache
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        Ok(Arc::clone(entry))
    }

    /// Number of compiled patterns currently cached
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.read().expect("regex cache lock poisoned").len()
    }

    /// Whether the cache holds no compiled patterns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
