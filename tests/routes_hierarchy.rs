use serde_json::Value;
use std::sync::Arc;

use waypoint_router::route::{Route, RouteConfig};
use waypoint_router::router::{RouterContext, RouterContextBuilder};

fn context_at(url: &str) -> Arc<RouterContext> {
    RouterContextBuilder::default()
        .initial_url(url)
        .build()
        .expect("context should build")
}

fn route_at(path: &str, context: &Arc<RouterContext>) -> Route {
    Route::with_context(path, RouteConfig::default(), Arc::clone(context))
        .expect("route should build")
}

#[test]
fn extend_concatenates_templates() {
    let context = context_at("/");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");
    let grandchild = child.extend("/c").expect("grandchild should build");

    assert_eq!(parent.path(), "/a");
    assert_eq!(child.path(), "/a/b");
    assert_eq!(grandchild.path(), "/a/b/c");
    assert_eq!(child.parent().map(Route::path), Some("/a"));
    assert_eq!(grandchild.parent().map(Route::path), Some("/a/b"));
}

#[test]
fn extend_supports_optional_group_suffix() {
    let context = context_at("/users/5");
    let parent = route_at("/users", &context);
    let child = parent.extend("{/:id}").expect("child should build");
    assert_eq!(child.path(), "/users{/:id}");
    assert!(child.is_opened());
}

#[test]
fn deep_navigation_opens_only_the_exact_route() {
    let context = context_at("/a/b/c");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");
    let grandchild = child.extend("/c").expect("grandchild should build");

    assert!(!parent.is_opened());
    assert!(parent.has_opened_children());
    assert!(!child.is_opened());
    assert!(child.has_opened_children());
    assert!(grandchild.is_opened());
    assert!(!grandchild.has_opened_children());
}

#[test]
fn middle_navigation_reports_hierarchy_state() {
    let context = context_at("/a/b");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");
    let grandchild = child.extend("/c").expect("grandchild should build");

    assert!(!parent.is_opened());
    assert!(parent.has_opened_children());
    assert!(child.is_opened());
    assert!(!child.has_opened_children());
    assert!(!grandchild.is_opened());
}

#[test]
fn hierarchy_state_follows_location_changes() {
    let context = context_at("/a/b");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");

    assert!(child.is_opened());
    context.location().push("/a", Value::Null);
    assert!(parent.is_opened());
    assert!(!child.is_opened());
    assert!(!parent.has_opened_children());
}

#[test]
fn extend_does_not_inherit_the_index_flag() {
    let context = context_at("/");
    let config = RouteConfig::builder()
        .index(true)
        .build()
        .expect("config should build");
    let parent = Route::with_context("/a", config, Arc::clone(&context)).expect("route should build");
    assert!(parent.is_index());

    let child = parent.extend("/b").expect("child should build");
    assert!(!child.is_index());
}

#[test]
fn extend_inherits_base_url() {
    let config = RouteConfig::builder()
        .base_url("/app")
        .build()
        .expect("config should build");
    let parent = Route::with_context("/a", config, context_at("/app/a/b"))
        .expect("route should build");
    let child = parent.extend("/b").expect("child should build");
    assert!(child.is_opened());
}

#[test]
fn a_route_can_be_extended_multiple_times() {
    let context = context_at("/a/left");
    let parent = route_at("/a", &context);
    let left = parent.extend("/left").expect("left child should build");
    let right = parent.extend("/right").expect("right child should build");

    let children = parent.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].path(), "/a/left");
    assert_eq!(children[1].path(), "/a/right");
    assert!(left.is_opened());
    assert!(!right.is_opened());
    assert!(parent.has_opened_children());
}

#[test]
fn dropped_children_stop_counting_as_opened() {
    let context = context_at("/a/b");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");
    assert!(parent.has_opened_children());

    drop(child);
    assert!(!parent.has_opened_children());
    assert!(parent.children().is_empty());
}

#[test]
fn dropping_the_parent_keeps_escaped_children_alive() {
    let context = context_at("/a/b");
    let parent = route_at("/a", &context);
    let child = parent.extend("/b").expect("child should build");

    drop(parent);
    assert!(child.is_opened());
    assert_eq!(child.parent().map(Route::path), Some("/a"));
}
