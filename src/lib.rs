//! # routemill
//!
//! **routemill** is a rule-driven HTTP route resolution engine: it takes
//! an ordered list of configured routes and decides which one answers a
//! request, matching on path, method, host, headers, and the Accept
//! header, with nested sub-route lists and a catch-all default.
//!
//! The engine is deliberately transport-free. A collaborator extracts the
//! request attributes into a [`RequestContext`], the engine returns the
//! matched route with its resolved attributes, and the caller invokes the
//! route's opaque `action` however it likes.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - the match-plan primitive (exact / prefix / regex /
//!   membership) shared by every matching dimension, plus the compiled
//!   regex cache
//! - **[`accept`]** - Accept-header parsing and quality-value content
//!   negotiation
//! - **[`router`]** - route-list validation, the per-route match chain,
//!   and recursive resolution with default fallback
//! - **[`route`]** - the route table data model and match results
//! - **[`request`]** - the read-only request view
//! - **[`normalize`]** - request-path normalization helpers
//! - **[`error`]** - the `RouterError` taxonomy
//!
//! ## Example
//!
//! ```rust
//! use routemill::{Plan, RequestContext, Route, RouteKind, Router};
//!
//! # fn main() -> Result<(), routemill::RouterError> {
//! let router = Router::new(vec![
//!     Route::new(RouteKind::Exact, "/pets", "list_pets")
//!         .with_method(Plan::Literal("GET".to_string())),
//!     Route::new(RouteKind::Regex, r"^/pets/(\d+)$", "get_pet")
//!         .with_token_names(["id"]),
//!     Route::new(RouteKind::Default, "", "not_found"),
//! ]);
//!
//! let request = RequestContext::new("/pets/42").with_method("GET");
//! let matched = router.resolve(&request)?.expect("default always matches");
//! assert_eq!(matched.tokens.get("id"), Some("42"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Resolution is a pure function of the route list and the request. A
//! [`Router`] holds no mutable state across calls and may be shared
//! across threads freely; the internal regex cache is read-mostly and
//! safe for concurrent resolution.

pub mod accept;
pub mod error;
pub mod normalize;
pub mod pattern;
pub mod request;
pub mod route;
pub mod router;

pub use error::RouterError;
pub use pattern::{Plan, PlanKind, PlanMatch, RegexCache};
pub use request::RequestContext;
pub use route::{MatchResult, Route, RouteKind, Tokens};
pub use router::Router;
