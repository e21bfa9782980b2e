// src/tests/router_tests/api_tests.rs

use crate::domain::{aggregate_lots, derive_lot_status, AggregationPolicy, LotStatus};
use crate::errors::ServerError;
use crate::permits::PermitQuery;
use crate::router::handle;
use crate::tests::utils::{
    body_string, date, error_of, get, permit, state_with, summerdale, StaticPermits,
};
use serde_json::Value;

fn json(uri: &str, source: StaticPermits) -> Value {
    let state = state_with(source);
    let resp = handle(get(uri), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );
    serde_json::from_str(&body_string(resp)).unwrap()
}

#[test]
fn api_lots_returns_aggregated_lots() {
    let lots = json("/api/lots", StaticPermits::new(summerdale()));
    let lots = lots.as_array().unwrap();

    assert_eq!(lots.len(), 2);
    // oldest permit first, so lot 1 leads
    assert_eq!(lots[0]["number"], 1);
    assert_eq!(lots[0]["status"], "ready_to_move");
    assert_eq!(lots[0]["status_label"], "Ready to move");
    assert_eq!(lots[0]["search_index"], "1 18303 mowry ct");
    assert_eq!(lots[1]["number"], 7);
    assert_eq!(lots[1]["status"], "ready_soon");
    assert_eq!(lots[1]["permits"]["by_category"].as_array().unwrap().len(), 2);
    assert_eq!(lots[1]["permit_count"], 2);
}

#[test]
fn api_lots_can_keep_every_permit() {
    let mut permits = summerdale();
    permits.push(permit("BLD2023-13002", "312431779300070", "Building Permit", "2023-07-01T00:00:00.000"));

    let earliest = json("/api/lots?permits=earliest", StaticPermits::new(permits.clone()));
    assert_eq!(earliest[1]["permit_count"], 2);
    assert_eq!(earliest[1]["status"], "ready_soon");

    let all = json("/api/lots?permits=all", StaticPermits::new(permits));
    let lot7 = &all[1];
    assert_eq!(lot7["number"], 7);
    assert_eq!(lot7["permit_count"], 3);
    assert_eq!(lot7["permits"]["all"].as_array().unwrap().len(), 3);
    // two building permits, so no single one decides the status
    assert_eq!(lot7["status"], "other");
}

#[test]
fn api_lots_rejects_unknown_permits_mode() {
    let state = state_with(StaticPermits::new(summerdale()));
    let err = error_of(handle(get("/api/lots?permits=newest"), &state));
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn api_lots_applies_search() {
    let lots = json("/api/lots?q=MOWRY%20CT", StaticPermits::new(summerdale()));
    assert_eq!(lots.as_array().unwrap().len(), 2);

    let lots = json("/api/lots?q=oak", StaticPermits::new(summerdale()));
    assert!(lots.as_array().unwrap().is_empty());
}

#[test]
fn api_lot_paths_lists_each_parcel_once() {
    let mut permits = summerdale();
    permits.push(permit("BLD2023-13002", "312431779300070", "Building Permit", "2023-07-01T00:00:00.000"));
    let source = StaticPermits::new(permits);
    let seen = source.seen.clone();

    let body = json("/api/lot-paths", source);

    assert_eq!(
        body["paths"],
        serde_json::json!(["/lot/312431779300010", "/lot/312431779300070"])
    );
    let queries = seen.lock().unwrap();
    assert_eq!(queries[0].get("application_type"), Some("Building Permit"));
    assert_eq!(queries[0].get("worktype"), Some("New"));
}

#[test]
fn api_citydata_proxies_unfiltered_records() {
    let body = json("/api/citydata", StaticPermits::new(summerdale()));
    let records = body.as_array().unwrap();

    assert_eq!(records.len(), 5);
    assert!(records.iter().any(|r| r["parcel_number"] == "312431779300120"));
    assert_eq!(records[0]["permit_number"], "PLB2023-20001");
    assert_eq!(records[0]["final_date"], "2023-09-01T00:00:00.000");
}

#[test]
fn api_citydata_passes_records_through_untouched() {
    let upstream = serde_json::json!([
        {
            "permit_number": "BLD2023-12771",
            "parcel_number": "312431779300010",
            "zip": "32827",
            "processed_date": "2023-03-07T00:00:00"
        },
        { "parcel_number": "312431779300070", "worktype": "New" }
    ]);
    let source = StaticPermits::raw(upstream.as_array().unwrap().clone());

    let body = json("/api/citydata", source);

    assert_eq!(body, upstream);
}

#[test]
fn api_failures_are_empty_arrays() {
    let body = json("/api/lots", StaticPermits::failing());
    assert_eq!(body, serde_json::json!([]));
}

#[test]
fn lot_seven_end_to_end() {
    let mut older = permit("BLD2023-1", "312431779300070", "Building Permit", "2023-03-01T00:00:00.000");
    older.coo_date = date("2023-11-01T00:00:00.000");
    let electrical = permit("ELE2023-2", "312431779300071", "Electrical Permit", "2023-04-01T00:00:00.000");

    let state = state_with(StaticPermits::new(vec![electrical.clone(), older.clone()]));
    let view = state.open_view();
    let permits = state
        .loader()
        .load(&PermitQuery::new(), view.cancel_token())
        .ready()
        .unwrap();

    let lots = aggregate_lots(permits, AggregationPolicy::AllPermits);
    assert_eq!(lots.len(), 1);
    assert_eq!(lots[0].number, Some(7));
    assert_eq!(lots[0].permit_count(), 2);
    assert_eq!(derive_lot_status(&lots[0]), LotStatus::ReadyToMove);

    // the same two dates on two building permits are ambiguous
    let mut newer = electrical;
    newer.application_type = "Building Permit".into();
    let lots = aggregate_lots(vec![older, newer], AggregationPolicy::AllPermits);
    assert_eq!(lots[0].permit_count(), 2);
    assert_eq!(derive_lot_status(&lots[0]), LotStatus::Other);
}

#[test]
fn routes_answer_503_once_shutting_down() {
    let source = StaticPermits::new(summerdale());
    let seen = source.seen.clone();
    let state = state_with(source);

    state.shutdown();

    for uri in ["/", "/api/lots", "/api/citydata", "/lot/312431779300010"] {
        let err = error_of(handle(get(uri), &state));
        assert!(matches!(err, ServerError::Cancelled), "{uri}");
        assert_eq!(err.status(), 503);
    }
    assert!(seen.lock().unwrap().is_empty(), "no upstream calls after shutdown");
}
