//! Request-path normalization helpers.
//!
//! Search engines treat `example.com/foo` and `example.com/foo/` as two
//! different URLs, and mixed forms make analytics noisier than they need
//! to be. These helpers canonicalize a request path before it is matched;
//! when the normalized path differs from the original, the caller can
//! issue a redirect or emit a canonical URL instead.
//!
//! All functions are pure and allocate only when the path changes shape.

use regex::Regex;

/// Append a trailing slash when the path looks like a directory request.
///
/// A path is left alone when it already ends in `/`, when its last
/// segment contains a dot (a file name), or when any of `excludes`
/// matches the path.
#[must_use]
pub fn ending_slash(path: &str, excludes: &[Regex]) -> String {
    if excludes.iter().any(|regex| regex.is_match(path)) {
        return path.to_string();
    }

    let base = path.rsplit('/').next().unwrap_or(path);
    if !path.ends_with('/') && !base.contains('.') {
        let mut normalized = String::with_capacity(path.len() + 1);
        normalized.push_str(path);
        normalized.push('/');
        return normalized;
    }

    path.to_string()
}

/// Strip a trailing directory-index file name, leaving the slash.
///
/// The first name in `indexes` that terminates the path (as `/name`) is
/// removed: `/foo/bar/index.html` with `["index.html"]` becomes
/// `/foo/bar/`.
#[must_use]
pub fn directory_index(path: &str, indexes: &[&str]) -> String {
    for name in indexes {
        if let Some(stem) = path.strip_suffix(name) {
            if stem.ends_with('/') {
                return stem.to_string();
            }
        }
    }
    path.to_string()
}

/// Remove the first matching leading prefix from the path.
///
/// Useful when every route lives under a common sub-directory that the
/// route table does not repeat.
#[must_use]
pub fn strip_prefix(path: &str, prefixes: &[&str]) -> String {
    for prefix in prefixes {
        if let Some(rest) = path.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    path.to_string()
}
