// Scalability tests for the route table
//
// Thresholds are loose on purpose: they catch pathological regressions
// (e.g. recompiling on every lookup), not micro-benchmark drift. See
// benches/throughput.rs for real numbers.

use super::{Route, RouteTable};
use std::sync::Arc;
use std::time::Instant;

fn handler_routes(patterns: &[(&str, &'static str)]) -> Vec<Route<&'static str>> {
    patterns
        .iter()
        .map(|(pattern, handler)| Route::new(*pattern, *handler))
        .collect()
}

#[test]
fn test_router_performance_with_many_routes() {
    let routes: Vec<Route<String>> = (0..500)
        .map(|i| Route::new(format!("/api/v1/resource{i}/{{id}}"), format!("handler_{i}")))
        .collect();

    let table = RouteTable::new(routes).unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let result = table.match_path("/api/v1/resource250/123");
        let m = result.unwrap();
        assert_eq!(m.route.value, "handler_250");
    }
    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 5,
        "Route table performance degraded: {}ms for 1000 lookups with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_router_memory_efficiency() {
    let table = RouteTable::new(handler_routes(&[
        ("/api/users/{id}", "get_user"),
        ("/api/users/{id}/posts", "get_posts"),
        ("/api/users/{id}/posts/{postId}", "get_post"),
    ]))
    .unwrap();

    let registered = table.routes();
    for i in 0..100 {
        let m = table.match_path(&format!("/api/users/{i}/posts")).unwrap();
        // The match hands back the registered Arc, not a copy.
        assert!(Arc::ptr_eq(&m.route, &registered[1]));
    }

    let m = table.match_path("/api/users/7/posts/9").unwrap();
    assert!(Arc::ptr_eq(&m.route, &registered[2]));
    assert_eq!(m.param("postId"), Some("9"));
}

#[test]
fn test_router_worst_case_performance() {
    let table = RouteTable::new(handler_routes(&[
        ("/a", "handler_a"),
        ("/a/b", "handler_ab"),
        ("/a/b/c", "handler_abc"),
        ("/a/b/c/d", "handler_abcd"),
        ("/a/b/c/d/e", "handler_abcde"),
        ("/a/b/c/d/e/f", "handler_abcdef"),
    ]))
    .unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let m = table.match_path("/a/b/c/d/e/f").unwrap();
        assert_eq!(m.route.value, "handler_abcdef");
    }
    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 2,
        "Deep path matching too slow: {}ms",
        duration.as_millis()
    );
}

#[test]
fn test_router_common_prefix_resolution() {
    let table = RouteTable::new(handler_routes(&[
        ("/api/v1/users", "list_users"),
        ("/api/v1/users/{id}", "get_user"),
        ("/api/v1/users/{id}/profile", "get_profile"),
        ("/api/v1/posts", "list_posts"),
        ("/api/v1/posts/{id}", "get_post"),
        ("/api/v2/users", "list_users_v2"),
        ("/api/v2/posts", "list_posts_v2"),
    ]))
    .unwrap();

    let expect = |path: &str, handler: &str| {
        let m = table.match_path(path).unwrap();
        assert_eq!(m.route.value, handler, "wrong route for {path}");
    };
    expect("/api/v1/users", "list_users");
    expect("/api/v1/users/123", "get_user");
    expect("/api/v1/users/123/profile", "get_profile");
    expect("/api/v1/posts", "list_posts");
    expect("/api/v2/users", "list_users_v2");
    assert!(table.match_path("/api/v3/users").is_none());
}

#[test]
fn test_router_parameter_extraction_performance() {
    let table = RouteTable::new(handler_routes(&[(
        "/api/{version}/users/{userId}/posts/{postId}/comments/{commentId}",
        "get_comment",
    )]))
    .unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let m = table
            .match_path("/api/v1/users/123/posts/456/comments/789")
            .unwrap();
        // four numeric + four named
        assert_eq!(m.params.len(), 8);
        assert_eq!(m.param("commentId"), Some("789"));
    }
    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 2,
        "Parameter extraction too slow: {}ms",
        duration.as_millis()
    );
}
