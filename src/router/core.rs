use crate::accept::negotiate;
use crate::error::RouterError;
use crate::pattern::{CaptureVec, Plan, PlanKind, PlanMatch, RegexCache};
use crate::request::RequestContext;
use crate::route::{MatchResult, NamedVec, Route, RouteKind, Tokens};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Router that resolves requests against an ordered route list.
///
/// Resolution is a pure function of the route list and the request:
/// routes are iterated in declaration order, each candidate runs the
/// fixed path → method → headers → accept → host chain, a matched route
/// carrying sub-routes recurses with the same request, and a `default`
/// route is returned only when nothing else matched. There is no
/// priority or specificity scoring beyond declaration order.
///
/// The router holds no mutable state across calls; a shared
/// [`RegexCache`] compiles each distinct pattern once and is safe for
/// concurrent resolution.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    cache: RegexCache,
}

impl Router {
    /// Create a router over a prebuilt route list.
    ///
    /// The list is validated lazily, at the start of each `resolve` call,
    /// so dynamically assembled tables fail loudly on first use.
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            cache: RegexCache::new(),
        }
    }

    /// Append a leaf route mapping a path match to an action.
    pub fn add(
        &mut self,
        kind: RouteKind,
        pattern: impl Into<String>,
        action: impl Into<Value>,
    ) {
        self.routes.push(Route::new(kind, pattern, action));
    }

    /// Append a fully built route entry.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Append a route whose match recurses into `sub_routes`.
    ///
    /// Sub-routes with an empty pattern inherit the parent pattern, so a
    /// map over `starts_with /foo` can list bare refinements.
    pub fn add_map(
        &mut self,
        kind: RouteKind,
        pattern: impl Into<String>,
        mut sub_routes: Vec<Route>,
    ) {
        let pattern = pattern.into();
        for sub in &mut sub_routes {
            if sub.pattern.is_empty() && !sub.is_default() {
                sub.pattern.clone_from(&pattern);
            }
        }
        self.routes.push(Route::map(kind, pattern, sub_routes));
    }

    /// Borrow the current route list.
    ///
    /// Useful for persisting a dynamically built table.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request against the router's own route list.
    ///
    /// Returns `Ok(None)` when no route (and no default) matches.
    ///
    /// # Errors
    ///
    /// Propagates [`RouterError`] for invalid route configuration or
    /// uncompilable regex patterns; nothing is skipped or retried.
    pub fn resolve(&self, request: &RequestContext) -> Result<Option<MatchResult>, RouterError> {
        self.resolve_routes(&self.routes, request)
    }

    /// Resolve a request against an explicit route list.
    ///
    /// The list is validated in full before any matching so configuration
    /// defects surface regardless of which route would have matched.
    /// Sub-route lists are validated when recursion reaches them.
    ///
    /// # Errors
    ///
    /// See [`Router::resolve`].
    pub fn resolve_routes(
        &self,
        routes: &[Route],
        request: &RequestContext,
    ) -> Result<Option<MatchResult>, RouterError> {
        validate_routes(routes)?;

        debug!(
            path = %request.path,
            method = %request.method,
            candidates = routes.len(),
            "Route resolution attempt"
        );

        let mut default_route = None;
        for route in routes {
            if route.is_default() {
                default_route = Some(route);
                continue;
            }

            let Some(matched) = self.match_route(route, request)? else {
                continue;
            };

            if let Some(sub_routes) = &matched.route.routes {
                // The outer dimensions matched; the sub-list decides. A
                // failed sub-resolution makes this candidate a dead end
                // and the scan moves on.
                if let Some(inner) = self.resolve_routes(sub_routes, request)? {
                    return Ok(Some(inner));
                }
                continue;
            }

            info!(
                path = %request.path,
                pattern = %matched.route.pattern,
                tokens = matched.tokens.len(),
                "Route matched"
            );
            return Ok(Some(matched));
        }

        if let Some(route) = default_route {
            debug!(path = %request.path, "Falling back to default route");
            return Ok(Some(MatchResult {
                route: route.clone(),
                tokens: Tokens::empty(),
                method: None,
                host: None,
                headers: Vec::new(),
                accept: None,
            }));
        }

        warn!(path = %request.path, method = %request.method, "No route matched");
        Ok(None)
    }

    /// Match one route against the request.
    ///
    /// Runs the fixed chain path → method → headers → accept → host,
    /// short-circuiting on the first failed dimension. Unset optional
    /// dimensions pass through without constraining the match.
    ///
    /// # Errors
    ///
    /// See [`Router::resolve`].
    pub fn match_route(
        &self,
        route: &Route,
        request: &RequestContext,
    ) -> Result<Option<MatchResult>, RouterError> {
        let Some(tokens) = self.match_path(route, &request.path)? else {
            return Ok(None);
        };

        let method = match &route.method {
            Some(plan) => {
                if plan.matches(&request.method, &self.cache)?.is_none() {
                    return Ok(None);
                }
                Some(request.method.clone())
            }
            // Passthrough, not a filter: the result records the request
            // method even when the route does not constrain it.
            None => (!request.method.is_empty()).then(|| request.method.clone()),
        };

        let mut headers = Vec::new();
        if let Some(declared) = &route.headers {
            headers.reserve(declared.len());
            for (name, plan) in declared {
                let Some(value) = request.header(name) else {
                    return Ok(None);
                };
                if plan.matches(value, &self.cache)?.is_none() {
                    return Ok(None);
                }
                headers.push((name.clone(), value.to_string()));
            }
        }

        let accept = match &route.accept {
            Some(offered) => {
                match negotiate(offered, request.accept.as_deref(), &self.cache)? {
                    Some(chosen) => Some(chosen),
                    None => return Ok(None),
                }
            }
            None => None,
        };

        let host = match &route.host {
            Some(plan) => {
                if plan.matches(&request.host, &self.cache)?.is_none() {
                    return Ok(None);
                }
                Some(request.host.clone())
            }
            None => None,
        };

        Ok(Some(MatchResult {
            route: route.clone(),
            tokens,
            method,
            host,
            headers,
            accept,
        }))
    }

    /// Match the route's own kind/pattern against the request path and
    /// shape the captured tokens.
    fn match_path(&self, route: &Route, path: &str) -> Result<Option<Tokens>, RouterError> {
        let kind = match route.kind {
            RouteKind::Exact => PlanKind::Exact,
            RouteKind::StartsWith => PlanKind::StartsWith,
            RouteKind::Regex => PlanKind::Regex,
            // Default routes are returned unmodified by the resolver and
            // never path-matched.
            RouteKind::Default => return Ok(Some(Tokens::empty())),
        };
        let plan = Plan::typed(kind, route.pattern.as_str());

        let Some(plan_match) = plan.matches(path, &self.cache)? else {
            return Ok(None);
        };

        let captured: CaptureVec = match plan_match {
            PlanMatch::Captures(values) => values,
            // A starts_with remainder becomes slash-separated segments
            PlanMatch::Remainder(rest) => rest
                .trim_matches('/')
                .split('/')
                .map(String::from)
                .collect(),
        };

        if route.tokens.is_empty() {
            return Ok(Some(Tokens::Positional(captured)));
        }
        if route.tokens.len() != captured.len() {
            debug!(
                pattern = %route.pattern,
                expected = route.tokens.len(),
                captured = captured.len(),
                "Token name count mismatch"
            );
            return Ok(None);
        }
        let named: NamedVec = route.tokens.iter().cloned().zip(captured).collect();
        Ok(Some(Tokens::Named(named)))
    }
}

/// Check the structural invariants of a route list before matching.
///
/// Every entry must carry exactly one of `action`/`routes`; non-default
/// entries need a non-empty pattern; at most one `default` is allowed.
/// (A missing `type` cannot be represented: `RouteKind` is closed and
/// deserialization rejects unknown or absent kinds.)
fn validate_routes(routes: &[Route]) -> Result<(), RouterError> {
    let mut seen_default = false;
    for route in routes {
        match (route.action.is_some(), route.routes.is_some()) {
            (true, true) => {
                return Err(RouterError::InvalidRoute(format!(
                    "route '{}' has both an action and sub-routes",
                    route.pattern
                )))
            }
            (false, false) => {
                return Err(RouterError::InvalidRoute(format!(
                    "route '{}' has neither an action nor sub-routes",
                    route.pattern
                )))
            }
            _ => {}
        }
        if route.is_default() {
            if seen_default {
                return Err(RouterError::InvalidRoute(
                    "multiple default routes defined in one list".to_string(),
                ));
            }
            seen_default = true;
        } else if route.pattern.is_empty() {
            return Err(RouterError::InvalidRoute(
                "no pattern set for non-default route".to_string(),
            ));
        }
    }
    Ok(())
}
