// src/tests/router_tests/lot_tests.rs

use crate::router::handle;
use crate::tests::utils::{body_string, error_of, get, state_with, summerdale, StaticPermits};

#[test]
fn lot_page_shows_permits_oldest_first() {
    let source = StaticPermits::new(summerdale());
    let seen = source.seen.clone();
    let state = state_with(source);

    let resp = handle(get("/lot/312431779300070"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert_eq!(
        seen.lock().unwrap()[0].get("parcel_number"),
        Some("312431779300070")
    );
    assert!(body.contains("LOT #: </strong>7"));
    assert!(body.contains("18311 MOWRY CT"));

    let building = body.find("BLD2023-13001").expect("building permit listed");
    let plumbing = body.find("PLB2023-20001").expect("plumbing permit listed");
    assert!(building < plumbing, "permits should be ordered by processed date");
}

#[test]
fn lot_page_formats_details_and_timeline() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/lot/312431779300010"), &state).unwrap());

    assert!(body.contains("DREAM FINDERS HOMES LLC"));
    assert!(body.contains("$277,800.00"));
    assert!(body.contains("March 7, 2023"));
    assert!(body.contains(r#"class="current" data-field="coo_date""#));
    // fields the permit never had stay out of the table
    assert!(!body.contains("Contractor phone number"));
}

#[test]
fn badges_get_distinct_colors_within_a_page() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/lot/312431779300070"), &state).unwrap());

    let badge_class = |label: &str| {
        let end = body.find(&format!(">{label}</span>")).expect("badge rendered");
        let start = body[..end].rfind("badge-").unwrap();
        body[start..end].to_string()
    };
    assert_ne!(badge_class("Building Permit"), badge_class("Plumbing Permit"));
}

#[test]
fn unknown_parcel_renders_empty_lot() {
    let state = state_with(StaticPermits::new(summerdale()));

    let body = body_string(handle(get("/lot/312431779399990"), &state).unwrap());

    assert!(body.contains("LOT #: </strong>9999"));
    assert!(body.contains("No permits found for this parcel."));
}

#[test]
fn malformed_parcel_is_rejected() {
    let state = state_with(StaticPermits::new(summerdale()));

    assert_eq!(error_of(handle(get("/lot/"), &state)).status(), 404);
    assert_eq!(error_of(handle(get("/lot/12%2034"), &state)).status(), 400);
}
