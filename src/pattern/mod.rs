//! # Pattern Module
//!
//! The pattern module provides the match-plan primitive used by every
//! matching dimension of the engine: request paths, methods, hosts, and
//! individual headers are all tested through the same [`Plan`] type.
//!
//! ## Overview
//!
//! A plan comes in three shapes:
//!
//! 1. **Literal**: a bare string compared for exact equality.
//! 2. **OneOf**: an unkeyed list of strings; the target must be a member.
//! 3. **Typed**: a `{type, pattern}` pair selecting `exact`,
//!    `starts_with` (prefix test, yielding the remainder of the target),
//!    or `regex` (compiled once, capture groups become tokens).
//!
//! Plans are resolved from configuration once at construction time.
//! Evaluation is a pure function of the plan and target; compiled regexes
//! are shared through a [`RegexCache`] so repeated matches against the
//! same pattern never recompile.

mod cache;
mod core;
#[cfg(test)]
mod tests;

pub use cache::RegexCache;
pub use core::{CaptureVec, Plan, PlanKind, PlanMatch, MAX_INLINE_TOKENS};
