use crate::error::RouterError;
use crate::pattern::RegexCache;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Trailing quality suffix accepted on a media range: `;q=1`, `;q=1.0`,
/// or `;q=0.` followed by digits. Anything else is treated as part of the
/// media range itself with the default quality of 1.0.
fn quality_suffix() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| {
        Regex::new(r"\s*;\s*q=(1(?:\.0)?|0\.[0-9]+)$").expect("quality suffix regex is valid")
    })
}

/// Parse an Accept header value into an ordered list of media ranges with
/// quality values.
///
/// Entries are split on commas and trimmed. Header order is preserved; a
/// duplicate media range overwrites the quality recorded for the earlier
/// occurrence while keeping its original position.
#[must_use]
pub fn parse_accept(header: &str) -> Vec<(String, f64)> {
    let mut ranges: Vec<(String, f64)> = Vec::new();
    for entry in header.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (range, quality) = match quality_suffix().captures(entry) {
            Some(caps) => {
                let q = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .unwrap_or(1.0);
                let stripped = quality_suffix().replace(entry, "").into_owned();
                (stripped, q)
            }
            None => (entry.to_string(), 1.0),
        };
        if let Some(existing) = ranges.iter_mut().find(|(r, _)| *r == range) {
            existing.1 = quality;
        } else {
            ranges.push((range, quality));
        }
    }
    ranges
}

/// Select the best mime type from `offered` for the given Accept header.
///
/// A missing header is treated as `*/*` (RFC 2616: absence means any type
/// is acceptable), which selects the first offered entry. Media ranges and
/// offered types are compared lowercased; ranges containing `*` match as
/// full-string wildcards. When several header ranges match one offered
/// type, the last one in header order decides its quality. The winner is
/// the offered type with the highest quality; ties go to the entry that
/// appears earliest in `offered`, so preference order is controlled by the
/// route author rather than by the client. The chosen type is returned in
/// its original `offered` casing.
///
/// # Errors
///
/// Returns [`RouterError::InvalidPattern`] if a wildcard range fails to
/// compile, which cannot happen for escaped ranges but is propagated
/// rather than swallowed.
pub fn negotiate(
    offered: &[String],
    header: Option<&str>,
    cache: &RegexCache,
) -> Result<Option<String>, RouterError> {
    let header_value = header.unwrap_or("*/*");
    let ranges = parse_accept(header_value);

    let mut best: Option<(f64, &str)> = None;
    for mime in offered {
        let mime_lower = mime.to_lowercase();
        let mut quality = None;
        for (range, q) in &ranges {
            let range_lower = range.to_lowercase();
            let hit = if range_lower.contains('*') {
                let pattern = format!("^{}$", regex::escape(&range_lower).replace(r"\*", ".*"));
                cache.get_or_compile(&pattern)?.is_match(&mime_lower)
            } else {
                range_lower == mime_lower
            };
            if hit {
                // Last matching header entry wins for this offered type
                quality = Some(*q);
            }
        }
        if let Some(q) = quality {
            match best {
                Some((best_q, _)) if best_q >= q => {}
                _ => best = Some((q, mime.as_str())),
            }
        }
    }

    debug!(
        header = header_value,
        offered = ?offered,
        chosen = best.map(|(_, m)| m),
        "Accept negotiation"
    );

    Ok(best.map(|(_, mime)| mime.to_string()))
}
