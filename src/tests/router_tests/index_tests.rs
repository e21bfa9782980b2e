// src/tests/router_tests/index_tests.rs

use crate::router::handle;
use crate::tests::utils::{body_string, error_of, get, state_with, summerdale, StaticPermits};

#[test]
fn index_lists_lots_with_status() {
    let state = state_with(StaticPermits::new(summerdale()));

    let resp = handle(get("/"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Summerdale Park building status"));
    assert!(body.contains(r#"href="/lot/312431779300010""#));
    assert!(body.contains(r#"href="/lot/312431779300070""#));
    assert!(body.contains("18303 MOWRY CT"));
    assert!(body.contains("Ready to move"));
    assert!(body.contains("Ready soon"));
}

#[test]
fn index_queries_new_construction_only() {
    let source = StaticPermits::new(summerdale());
    let seen = source.seen.clone();
    let state = state_with(source);

    let body = body_string(handle(get("/"), &state).unwrap());

    let queries = seen.lock().unwrap();
    assert_eq!(queries.len(), 1, "one fetch per view");
    assert_eq!(queries[0].get("worktype"), Some("New"));
    // lot 20 is an alteration
    assert!(!body.contains("9 OAK AVE"));
}

#[test]
fn blocklisted_lot_never_shows_up() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/"), &state).unwrap());

    assert!(!body.contains("312431779300120"));
    assert!(!body.contains("BAD DATA"));
}

#[test]
fn search_filters_rows() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/?q=18311"), &state).unwrap());

    assert!(body.contains("18311 MOWRY CT"));
    assert!(!body.contains("18303 MOWRY CT"));
    assert!(body.contains(r#"value="18311""#), "search box keeps the query");
}

#[test]
fn search_with_several_tokens_matches_any() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/?q=18311+18303"), &state).unwrap());

    assert!(body.contains("18311 MOWRY CT"));
    assert!(body.contains("18303 MOWRY CT"));
}

#[test]
fn upstream_failure_renders_an_empty_table() {
    let state = state_with(StaticPermits::failing());

    let resp = handle(get("/"), &state).expect("fetch errors are not request errors");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("No lots found."));
}

#[test]
fn shutdown_discards_the_view() {
    let state = state_with(StaticPermits::new(summerdale()));
    state.shutdown();

    let err = error_of(handle(get("/"), &state));
    assert_eq!(err.status(), 503);
}

#[test]
fn unknown_route_is_not_found() {
    let state = state_with(StaticPermits::new(summerdale()));

    let err = error_of(handle(get("/nope"), &state));
    assert_eq!(err.status(), 404);

    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}
