//! # Accept Module
//!
//! Content negotiation over the HTTP `Accept` header.
//!
//! ## Overview
//!
//! A route may declare an ordered list of mime types it can produce. This
//! module parses the request's Accept header into media ranges with
//! quality values and selects the best offered type:
//!
//! 1. **Parsing**: comma-separated ranges, optional `;q=` suffix, header
//!    order preserved, duplicate ranges overwrite in place.
//! 2. **Matching**: ranges and offered types compare lowercased; a range
//!    containing `*` matches as a full-string wildcard (`*/*`, `image/*`).
//! 3. **Selection**: highest quality wins; ties prefer the earliest entry
//!    in the offered list so route authors control the preference order.
//!
//! A missing Accept header is equivalent to `*/*` per RFC 2616.

mod core;

pub use core::{negotiate, parse_accept};
