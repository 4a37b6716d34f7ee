//! Route tables deserialized from external configuration.
//!
//! The engine does not own a configuration format, but route tables are
//! plain data and commonly arrive as JSON from an external store. These
//! tests pin the wire shapes: plan variants, single-string accept
//! normalization, and rejection of unknown keys.

use routemill::{Plan, PlanKind, RequestContext, Route, RouteKind, Router};
use serde_json::json;

#[test]
fn test_route_table_from_json() {
    let routes: Vec<Route> = serde_json::from_value(json!([
        {
            "type": "exact",
            "pattern": "/pets",
            "method": ["GET", "HEAD"],
            "action": "list_pets"
        },
        {
            "type": "regex",
            "pattern": r"^/pets/(\d+)$",
            "tokens": ["id"],
            "action": "get_pet"
        },
        {
            "type": "default",
            "action": "not_found"
        }
    ]))
    .expect("route table should deserialize");

    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0].kind, RouteKind::Exact);
    assert_eq!(
        routes[0].method,
        Some(Plan::OneOf(vec!["GET".to_string(), "HEAD".to_string()]))
    );
    assert_eq!(routes[2].kind, RouteKind::Default);
    assert_eq!(routes[2].pattern, "");

    let router = Router::new(routes);
    let matched = router
        .resolve(&RequestContext::new("/pets/7").with_method("GET"))
        .expect("resolution should not fail")
        .expect("route should match");
    assert_eq!(matched.tokens.get("id"), Some("7"));
}

#[test]
fn test_typed_plan_dimension_from_json() {
    let route: Route = serde_json::from_value(json!({
        "type": "exact",
        "pattern": "/admin",
        "host": { "type": "regex", "pattern": r"\.internal$" },
        "action": "admin"
    }))
    .expect("route should deserialize");
    assert_eq!(route.host, Some(Plan::typed(PlanKind::Regex, r"\.internal$")));
}

#[test]
fn test_accept_single_string_normalizes_to_list() {
    let route: Route = serde_json::from_value(json!({
        "type": "exact",
        "pattern": "/page",
        "accept": "text/html",
        "action": "page"
    }))
    .expect("route should deserialize");
    assert_eq!(route.accept, Some(vec!["text/html".to_string()]));
}

#[test]
fn test_accept_rejects_non_string_values() {
    let result: Result<Route, _> = serde_json::from_value(json!({
        "type": "exact",
        "pattern": "/page",
        "accept": true,
        "action": "page"
    }));
    assert!(result.is_err());
}

#[test]
fn test_headers_keep_document_order() {
    // Parsed from text so the object entries stream in source order
    let route: Route = serde_json::from_str(
        r#"{
            "type": "exact",
            "pattern": "/reports",
            "headers": {
                "X-Tenant": "acme",
                "Authorization": { "type": "starts_with", "pattern": "Bearer " }
            },
            "action": "reports"
        }"#,
    )
    .expect("route should deserialize");

    assert_eq!(
        route.headers,
        Some(vec![
            ("X-Tenant".to_string(), Plan::Literal("acme".to_string())),
            (
                "Authorization".to_string(),
                Plan::typed(PlanKind::StartsWith, "Bearer "),
            ),
        ])
    );
}

#[test]
fn test_unknown_keys_rejected() {
    let result: Result<Route, _> = serde_json::from_value(json!({
        "type": "exact",
        "pattern": "/foo",
        "action": "Foo",
        "bad-value": true
    }));
    assert!(result.is_err());
}

#[test]
fn test_unknown_route_kind_rejected() {
    let result: Result<Route, _> = serde_json::from_value(json!({
        "type": "ends_with",
        "pattern": "/foo",
        "action": "Foo"
    }));
    assert!(result.is_err());
}

#[test]
fn test_sub_routes_deserialize_recursively() {
    let route: Route = serde_json::from_value(json!({
        "type": "starts_with",
        "pattern": "/api",
        "routes": [
            { "type": "exact", "pattern": "/api/pets", "action": "pets" }
        ]
    }))
    .expect("map route should deserialize");

    let subs = route.routes.as_ref().expect("sub-routes");
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].pattern, "/api/pets");
}

#[test]
fn test_route_serialization_round_trip() {
    let route = Route::new(RouteKind::StartsWith, "/pets/", "get_pet")
        .with_method(Plan::Literal("GET".to_string()))
        .with_header("X-Api-Version", Plan::Literal("2".to_string()))
        .with_accept(["application/json"])
        .with_token_names(["id"]);

    let value = serde_json::to_value(&route).expect("route should serialize");
    assert_eq!(value["type"], "starts_with");
    assert_eq!(value["method"], "GET");

    let back: Route = serde_json::from_value(value).expect("round trip");
    assert_eq!(back, route);
}
