//! # Router Module
//!
//! Route resolution: turning a request into the route entry that should
//! answer it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Validating route-list invariants before any matching
//! - Running the per-route match chain (path, method, headers, accept,
//!   host) against each candidate in declaration order
//! - Recursing into sub-route lists when a map route matches
//! - Falling back to the `default` route when nothing else matched
//!
//! ## Resolution policy
//!
//! First-match-wins by declaration order is the entire policy. A matched
//! route carrying sub-routes delegates to its sub-list; if the sub-list
//! yields nothing, that candidate is a dead end and the scan continues.
//! The default route, when present, is returned unmodified — none of the
//! dimension checks apply to it.
//!
//! ## Example
//!
//! ```rust
//! use routemill::{RequestContext, Route, RouteKind, Router};
//!
//! # fn main() -> Result<(), routemill::RouterError> {
//! let mut router = Router::default();
//! router.add(RouteKind::Exact, "/pets", "list_pets");
//! router.add(RouteKind::StartsWith, "/pets/", "get_pet");
//!
//! let request = RequestContext::new("/pets/42").with_method("GET");
//! let matched = router.resolve(&request)?.expect("route should match");
//! assert_eq!(matched.action(), Some(&serde_json::json!("get_pet")));
//! assert_eq!(matched.tokens.positional(), Some(&["42".to_string()][..]));
//! # Ok(())
//! # }
//! ```

mod core;

pub use core::Router;
