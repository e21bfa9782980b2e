use crate::app::AppState;
use crate::permits::{socrata_date, Blocklist, FetchError, Permit, PermitFetcher, PermitQuery, PermitSource, DEFAULT_BLOCKLIST};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::Value;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Serves a fixed data set, honoring equality filters the way the city API
/// does, and remembers every query it saw.
pub struct StaticPermits {
    records: Vec<Value>,
    fail: bool,
    pub seen: Arc<Mutex<Vec<PermitQuery>>>,
}

impl StaticPermits {
    pub fn new(permits: Vec<Permit>) -> Self {
        Self::raw(
            permits
                .iter()
                .map(|p| serde_json::to_value(p).unwrap())
                .collect(),
        )
    }

    /// Records as upstream JSON, for fields `Permit` doesn't model.
    pub fn raw(records: Vec<Value>) -> Self {
        Self {
            records,
            fail: false,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }
}

impl PermitSource for StaticPermits {
    fn fetch_raw_records(&self, query: &PermitQuery) -> Result<Vec<Value>, FetchError> {
        self.seen.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(FetchError::Network("connection refused".into()));
        }

        Ok(self
            .records
            .iter()
            .filter(|record| {
                query
                    .params()
                    .iter()
                    .all(|(field, value)| record[field.as_str()].as_str() == Some(value.as_str()))
            })
            .cloned()
            .collect())
    }
}

pub fn state_with(source: StaticPermits) -> AppState {
    AppState::new(PermitFetcher::new(
        Box::new(source),
        Blocklist::new(DEFAULT_BLOCKLIST.iter().copied()),
    ))
}

pub fn permit(number: &str, parcel: &str, kind: &str, processed: &str) -> Permit {
    let mut p = Permit::new(number, parcel);
    p.application_type = kind.to_string();
    p.worktype = Some("New".to_string());
    p.processed_date = socrata_date::parse(processed);
    p
}

pub fn date(raw: &str) -> Option<chrono::NaiveDateTime> {
    socrata_date::parse(raw)
}

/// A small Summerdale Park: lot 1 done, lot 7 waiting on the building final,
/// lot 12 block-listed.
pub fn summerdale() -> Vec<Permit> {
    let mut lot1 = permit("BLD2023-12771", "312431779300010", "Building Permit", "2023-03-07T00:00:00.000");
    lot1.permit_address = Some("18303 MOWRY CT".into());
    lot1.contractor_name = Some("DREAM FINDERS HOMES LLC".into());
    lot1.estimated_cost = Some("277800".into());
    lot1.coo_date = date("2023-10-02T00:00:00.000");

    let mut lot7 = permit("BLD2023-13001", "312431779300070", "Building Permit", "2023-04-01T00:00:00.000");
    lot7.permit_address = Some("18311 MOWRY CT".into());
    lot7.issue_permit_date = date("2023-05-10T00:00:00.000");

    let mut lot7_plumbing = permit("PLB2023-20001", "312431779300070", "Plumbing Permit", "2023-05-15T00:00:00.000");
    lot7_plumbing.permit_address = Some("18311 MOWRY CT".into());
    lot7_plumbing.final_date = date("2023-09-01T00:00:00.000");

    let mut lot12 = permit("BLD2023-14000", "312431779300120", "Building Permit", "2023-02-01T00:00:00.000");
    lot12.permit_address = Some("18400 BAD DATA ST".into());

    let mut lot20 = permit("BLD2023-15000", "312431779300200", "Building Permit", "2023-06-01T00:00:00.000");
    lot20.permit_address = Some("9 OAK AVE".into());
    lot20.worktype = Some("Alteration".into());

    vec![lot7_plumbing, lot7, lot12, lot1, lot20]
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn error_of(result: crate::responses::ResultResp) -> crate::errors::ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got HTTP {}", resp.status()),
        Err(e) => e,
    }
}
