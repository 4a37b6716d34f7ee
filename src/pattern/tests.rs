use super::*;
use crate::error::RouterError;
use serde_json::json;

fn cache() -> RegexCache {
    RegexCache::new()
}

fn assert_empty_match(plan: &Plan, target: &str) {
    let result = plan.matches(target, &cache()).expect("plan should evaluate");
    assert_eq!(result, Some(PlanMatch::empty()), "{plan:?} vs {target:?}");
}

fn assert_no_match(plan: &Plan, target: &str) {
    let result = plan.matches(target, &cache()).expect("plan should evaluate");
    assert_eq!(result, None, "{plan:?} vs {target:?}");
}

#[test]
fn test_literal_plan() {
    let plan = Plan::Literal("foo".to_string());
    assert_empty_match(&plan, "foo");
    assert_no_match(&plan, "bar");
}

#[test]
fn test_one_of_plan() {
    let plan = Plan::OneOf(vec!["foo".to_string(), "bar".to_string()]);
    assert_empty_match(&plan, "foo");
    assert_empty_match(&plan, "bar");
    assert_no_match(&plan, "foz");
}

#[test]
fn test_exact_plan() {
    let plan = Plan::typed(PlanKind::Exact, "foo");
    assert_empty_match(&plan, "foo");
    assert_no_match(&plan, "foz");
}

#[test]
fn test_starts_with_plan() {
    let plan = Plan::typed(PlanKind::StartsWith, "/foo");

    // Pattern equal to target captures nothing
    assert_empty_match(&plan, "/foo");

    // Proper prefix yields the raw remainder
    let result = plan.matches("/foo/bar", &cache()).expect("plan should evaluate");
    assert_eq!(result, Some(PlanMatch::Remainder("/bar".to_string())));

    assert_no_match(&plan, "/foz/bar");
}

#[test]
fn test_regex_plan_without_groups() {
    let plan = Plan::typed(PlanKind::Regex, "^/foo");
    assert_empty_match(&plan, "/foo");
    assert_no_match(&plan, "/bar");
}

#[test]
fn test_regex_plan_with_groups() {
    let plan = Plan::typed(PlanKind::Regex, r"^/foo/(\d+)/");
    let result = plan.matches("/foo/1/", &cache()).expect("plan should evaluate");
    let tokens: CaptureVec = ["1".to_string()].into_iter().collect();
    assert_eq!(result, Some(PlanMatch::Captures(tokens)));
}

#[test]
fn test_regex_plan_multiple_groups() {
    let plan = Plan::typed(PlanKind::Regex, r"^/foo/(\d+)/(\d+)/");
    let result = plan.matches("/foo/1/2/", &cache()).expect("plan should evaluate");
    let tokens: CaptureVec = ["1".to_string(), "2".to_string()].into_iter().collect();
    assert_eq!(result, Some(PlanMatch::Captures(tokens)));
    assert_no_match(&plan, "/foo/1/");
}

#[test]
fn test_empty_pattern_and_target_compare_literally() {
    assert_empty_match(&Plan::Literal(String::new()), "");
    assert_no_match(&Plan::Literal(String::new()), "x");
    assert_empty_match(&Plan::typed(PlanKind::Exact, ""), "");
}

#[test]
fn test_invalid_regex_pattern() {
    let plan = Plan::typed(PlanKind::Regex, "(unclosed");
    let err = plan.matches("/foo", &cache()).expect_err("pattern should not compile");
    assert!(matches!(err, RouterError::InvalidPattern { .. }));
}

#[test]
fn test_from_value_scalar() {
    let plan = Plan::from_value(&json!("GET")).expect("scalar plan");
    assert_eq!(plan, Plan::Literal("GET".to_string()));

    let plan = Plan::from_value(&json!(42)).expect("number plan");
    assert_eq!(plan, Plan::Literal("42".to_string()));
}

#[test]
fn test_from_value_list() {
    let plan = Plan::from_value(&json!(["GET", "POST"])).expect("list plan");
    assert_eq!(plan, Plan::OneOf(vec!["GET".to_string(), "POST".to_string()]));
}

#[test]
fn test_from_value_typed() {
    let plan = Plan::from_value(&json!({"type": "starts_with", "pattern": "/foo"}))
        .expect("typed plan");
    assert_eq!(plan, Plan::typed(PlanKind::StartsWith, "/foo"));
}

#[test]
fn test_from_value_unknown_type() {
    let err = Plan::from_value(&json!({"type": "ends_with", "pattern": "/foo"}))
        .expect_err("unknown type should fail");
    assert!(matches!(err, RouterError::InvalidMatchType(_)));
}

#[test]
fn test_from_value_missing_fields() {
    let err = Plan::from_value(&json!({"pattern": "/foo"})).expect_err("missing type");
    assert!(matches!(err, RouterError::InvalidMatchType(_)));

    let err = Plan::from_value(&json!({"type": "exact"})).expect_err("missing pattern");
    assert!(matches!(err, RouterError::InvalidMatchType(_)));

    let err = Plan::from_value(&json!(null)).expect_err("null plan");
    assert!(matches!(err, RouterError::InvalidMatchType(_)));
}

#[test]
fn test_cache_shares_compiled_patterns() {
    let cache = RegexCache::new();
    let plan = Plan::typed(PlanKind::Regex, r"^/foo/(\d+)/");
    assert!(plan.matches("/foo/1/", &cache).expect("evaluate").is_some());
    assert!(plan.matches("/foo/2/", &cache).expect("evaluate").is_some());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_plan_deserializes_from_all_shapes() {
    let plan: Plan = serde_json::from_str("\"GET\"").expect("scalar");
    assert_eq!(plan, Plan::Literal("GET".to_string()));

    let plan: Plan = serde_json::from_str("[\"GET\",\"POST\"]").expect("list");
    assert_eq!(plan, Plan::OneOf(vec!["GET".to_string(), "POST".to_string()]));

    let plan: Plan =
        serde_json::from_str(r#"{"type":"regex","pattern":"^/foo"}"#).expect("typed");
    assert_eq!(plan, Plan::typed(PlanKind::Regex, "^/foo"));

    let result: Result<Plan, _> = serde_json::from_str(r#"{"type":"bogus","pattern":"x"}"#);
    assert!(result.is_err());
}
