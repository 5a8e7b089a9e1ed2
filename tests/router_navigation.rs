use serde_json::{Value, json};
use std::sync::Arc;

use waypoint_router::group::RouteGroup;
use waypoint_router::route::{Route, RouteConfig};
use waypoint_router::router::{
    Router, RouterContext, RouterContextBuilder, default_context, reset_default_context,
};

fn context_at(url: &str) -> Arc<RouterContext> {
    RouterContextBuilder::default()
        .initial_url(url)
        .build()
        .expect("context should build")
}

fn router_at(url: &str) -> (Router, Arc<RouterContext>) {
    let context = context_at(url);
    let routes = RouteGroup::builder()
        .route(
            "users",
            Route::with_context("/users/:id", RouteConfig::default(), Arc::clone(&context))
                .expect("route should build"),
        )
        .build();
    (Router::with_context(routes, Arc::clone(&context)), context)
}

#[test]
fn navigate_pushes_a_new_entry() {
    let (router, context) = router_at("/");
    router.navigate("/users/1");
    assert_eq!(context.location().pathname(), "/users/1");
    assert_eq!(context.location().len(), 2);
    assert!(router.routes().is_opened());
}

#[test]
fn replace_rewrites_the_current_entry() {
    let (router, context) = router_at("/");
    router.replace("/users/1");
    assert_eq!(context.location().pathname(), "/users/1");
    assert_eq!(context.location().len(), 1);
}

#[test]
fn navigate_with_state_carries_the_payload() {
    let (router, context) = router_at("/");
    router.navigate_with_state("/users/1", json!({"tab": "profile"}));
    assert_eq!(context.location().state(), json!({"tab": "profile"}));
}

#[test]
fn back_and_forward_replay_history() {
    let (router, context) = router_at("/");
    router.navigate("/users/1");
    router.navigate("/users/2");

    assert!(router.back());
    assert_eq!(context.location().pathname(), "/users/1");
    assert!(router.back());
    assert_eq!(context.location().pathname(), "/");
    assert!(!router.back());

    assert!(router.forward());
    assert_eq!(context.location().pathname(), "/users/1");
    assert!(router.forward());
    assert_eq!(context.location().pathname(), "/users/2");
    assert!(!router.forward());
}

#[test]
fn push_after_back_truncates_forward_entries() {
    let (router, context) = router_at("/");
    router.navigate("/users/1");
    router.navigate("/users/2");
    assert!(router.back());

    router.navigate("/users/9");
    assert_eq!(context.location().len(), 3);
    assert_eq!(context.location().pathname(), "/users/9");
    assert!(!router.forward());
}

#[test]
fn routes_rederive_consistently_across_back_and_forward() {
    let context = context_at("/");
    let one = Route::with_context("/one", RouteConfig::default(), Arc::clone(&context))
        .expect("route should build");
    let two = Route::with_context("/two", RouteConfig::default(), Arc::clone(&context))
        .expect("route should build");

    context.location().push("/one", Value::Null);
    context.location().push("/two", Value::Null);
    assert!(!one.is_opened());
    assert!(two.is_opened());

    context.location().back();
    assert!(one.is_opened());
    assert!(!two.is_opened());

    context.location().forward();
    assert!(!one.is_opened());
    assert!(two.is_opened());
}

#[test]
fn default_context_is_lazily_built_and_resettable() {
    reset_default_context();
    let first = default_context();
    first.location().push("/somewhere", Value::Null);
    assert_eq!(first.location().pathname(), "/somewhere");

    let again = default_context();
    assert_eq!(again.location().pathname(), "/somewhere");

    reset_default_context();
    let fresh = default_context();
    assert_eq!(fresh.location().pathname(), "/");
    reset_default_context();
}
