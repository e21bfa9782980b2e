use crate::app::{AppState, ViewSession};
use crate::domain::{aggregate_lots, derive_lot_status, search_lots, AggregationPolicy, Lot, LotStatus};
use crate::errors::ServerError;
use crate::permits::PermitQuery;
use crate::responses::{html_response, json_response, ResultResp};
use crate::templates::pages::{index_page, lot_page, IndexVm, LotRow, LotVm};
use astra::Request;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);
    let search = params.get("q").map(String::as_str).unwrap_or("");

    match (method, path) {
        ("GET", "/") => index(state, search),
        ("GET", "/api/lots") => {
            let policy = aggregation_policy(params.get("permits").map(String::as_str))?;
            api_lots(state, search, policy)
        }
        ("GET", "/api/lot-paths") => api_lot_paths(state),
        ("GET", "/api/citydata") => api_citydata(state),
        ("GET", p) if p.starts_with("/lot/") => lot_detail(state, &p["/lot/".len()..]),
        _ => Err(ServerError::NotFound),
    }
}

/// Permits behind the lot table.
fn lots_query() -> PermitQuery {
    PermitQuery::new().eq("worktype", "New")
}

/// Every new-construction building permit; one detail page per parcel.
fn lot_paths_query() -> PermitQuery {
    PermitQuery::new()
        .eq("application_type", "Building Permit")
        .eq("worktype", "New")
}

/// `?permits=all` keeps every permit of a lot, `?permits=earliest` (the
/// default) only the oldest per category.
fn aggregation_policy(param: Option<&str>) -> Result<AggregationPolicy, ServerError> {
    match param {
        None | Some("") | Some("earliest") => Ok(AggregationPolicy::EarliestPerCategory),
        Some("all") => Ok(AggregationPolicy::AllPermits),
        Some(other) => Err(ServerError::BadRequest(format!(
            "unknown permits mode: {other}"
        ))),
    }
}

fn load_lots(
    state: &AppState,
    view: &ViewSession,
    policy: AggregationPolicy,
) -> Result<Vec<Lot>, ServerError> {
    let permits = state
        .loader()
        .load(&lots_query(), view.cancel_token())
        .ready()
        .ok_or(ServerError::Cancelled)?;

    Ok(aggregate_lots(permits, policy))
}

fn index(state: &AppState, search: &str) -> ResultResp {
    let mut view = state.open_view();
    let lots = load_lots(state, &view, AggregationPolicy::EarliestPerCategory)?;

    let vm = IndexVm {
        query: search.to_string(),
        rows: search_lots(&lots, search)
            .into_iter()
            .map(LotRow::from_lot)
            .collect(),
    };

    html_response(index_page(&vm, &mut view.colors))
}

fn lot_detail(state: &AppState, parcel_number: &str) -> ResultResp {
    if parcel_number.is_empty() {
        return Err(ServerError::NotFound);
    }
    if !parcel_number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ServerError::BadRequest(format!(
            "invalid parcel number: {parcel_number}"
        )));
    }

    let mut view = state.open_view();
    let query = PermitQuery::new().eq("parcel_number", parcel_number);
    let permits = state
        .loader()
        .load(&query, view.cancel_token())
        .ready()
        .ok_or(ServerError::Cancelled)?;

    let vm = LotVm::new(parcel_number, permits);
    html_response(lot_page(&vm, &mut view.colors))
}

#[derive(Serialize)]
struct LotSummary<'a> {
    #[serde(flatten)]
    lot: &'a Lot,
    permit_count: usize,
    status: LotStatus,
    status_label: &'static str,
}

fn api_lots(state: &AppState, search: &str, policy: AggregationPolicy) -> ResultResp {
    let view = state.open_view();
    let lots = load_lots(state, &view, policy)?;

    let summaries: Vec<LotSummary> = search_lots(&lots, search)
        .into_iter()
        .map(|lot| {
            let status = derive_lot_status(lot);
            LotSummary {
                lot,
                permit_count: lot.permit_count(),
                status,
                status_label: status.label(),
            }
        })
        .collect();

    json_response(&summaries)
}

#[derive(Serialize)]
struct LotPaths {
    paths: Vec<String>,
}

fn api_lot_paths(state: &AppState) -> ResultResp {
    let view = state.open_view();
    let permits = state
        .loader()
        .load(&lot_paths_query(), view.cancel_token())
        .ready()
        .ok_or(ServerError::Cancelled)?;

    let mut paths: Vec<String> = Vec::new();
    for permit in &permits {
        let path = format!("/lot/{}", permit.parcel_number);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    json_response(&LotPaths { paths })
}

fn api_citydata(state: &AppState) -> ResultResp {
    let view = state.open_view();
    let permits = state
        .loader()
        .load_raw(&PermitQuery::new(), view.cancel_token())
        .ready()
        .ok_or(ServerError::Cancelled)?;

    json_response(&permits)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
