use serde_json::json;
use std::sync::Arc;

use waypoint_router::params::{ParamValue, params_map};
use waypoint_router::query::{parse_query, serialize_query};
use waypoint_router::router::{RouterContext, RouterContextBuilder};

fn context_at(url: &str) -> Arc<RouterContext> {
    RouterContextBuilder::default()
        .initial_url(url)
        .build()
        .expect("context should build")
}

#[test]
fn parses_single_and_repeated_keys() {
    let data = parse_query("?tab=general&tags=a&tags=b");
    assert_eq!(data.get("tab"), Some(&ParamValue::Single("general".to_string())));
    assert_eq!(
        data.get("tags"),
        Some(&ParamValue::List(vec!["a".to_string(), "b".to_string()]))
    );
}

#[test]
fn parse_accepts_a_bare_query_string() {
    let data = parse_query("a=1");
    assert_eq!(data.get("a"), Some(&ParamValue::Single("1".to_string())));
}

#[test]
fn serialization_is_deterministic() {
    let data = params_map([("c", "3"), ("a", "1"), ("b", "2")]);
    assert_eq!(serialize_query(&data), "a=1&b=2&c=3");
}

#[test]
fn serialization_expands_lists_in_order() {
    let data = params_map([("tags", vec!["a", "b"])]);
    assert_eq!(serialize_query(&data), "tags=a&tags=b");
}

#[test]
fn serialization_escapes_reserved_characters() {
    let data = params_map([("q", "a b&c")]);
    assert_eq!(serialize_query(&data), "q=a+b%26c");
}

#[test]
fn update_merges_over_current_data() {
    let context = context_at("/settings?a=1&b=2");
    context.query().update(params_map([("b", "9"), ("c", "4")]));
    assert_eq!(context.location().search(), "?a=1&b=9&c=4");
    assert_eq!(context.location().pathname(), "/settings");
}

#[test]
fn update_replaces_instead_of_pushing() {
    let context = context_at("/settings");
    context.query().update(params_map([("a", "1")]));
    assert_eq!(context.location().len(), 1);
}

#[test]
fn update_preserves_navigation_state() {
    let context = context_at("/settings");
    context
        .location()
        .push("/settings", json!({"scroll": 120}));
    context.query().update(params_map([("a", "1")]));
    assert_eq!(context.location().state(), json!({"scroll": 120}));
}

#[test]
fn data_reflects_the_latest_location() {
    let context = context_at("/?a=1");
    assert_eq!(
        context.query().get("a"),
        Some(ParamValue::Single("1".to_string()))
    );
    context.location().push("/?a=2", serde_json::Value::Null);
    assert_eq!(
        context.query().get("a"),
        Some(ParamValue::Single("2".to_string()))
    );
}
