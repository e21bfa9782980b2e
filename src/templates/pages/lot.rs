// templates/pages/lot.rs

use crate::colors::ColorBag;
use crate::domain::{lot_number_of, permit_timeline};
use crate::permits::Permit;
use crate::templates::components::{card, colored_badge, optional_row, timeline};
use crate::templates::desktop_layout;
use crate::templates::format::{format_currency, format_date};
use chrono::NaiveDateTime;
use maud::{html, Markup};

pub struct LotVm {
    pub parcel_number: String,
    pub number: Option<u32>,
    pub address: Option<String>,
    /// Oldest first.
    pub permits: Vec<Permit>,
}

impl LotVm {
    pub fn new(parcel_number: &str, permits: Vec<Permit>) -> Self {
        // first permit that actually has an address
        let address = permits.iter().find_map(|p| p.address()).map(str::to_string);

        Self {
            parcel_number: parcel_number.to_string(),
            number: lot_number_of(parcel_number),
            address,
            permits,
        }
    }
}

pub fn lot_page(vm: &LotVm, bag: &mut ColorBag) -> Markup {
    let title = match vm.number {
        Some(n) => format!("Lot {n}"),
        None => format!("Parcel {}", vm.parcel_number),
    };

    desktop_layout(
        &title,
        html! {
            main class="container" {
                p { a href="/" { "← All lots" } }
                div {
                    strong { "LOT #: " }
                    @match vm.number {
                        Some(n) => (n),
                        None => "?",
                    }
                }
                @if let Some(address) = &vm.address {
                    div { strong { "Address: " } (address) }
                }
                div { strong { "Permits:" } }
                @if vm.permits.is_empty() {
                    p class="empty" { "No permits found for this parcel." }
                }
                @for permit in &vm.permits {
                    (permit_card(permit, bag))
                }
            }
        },
    )
}

fn permit_card(permit: &Permit, bag: &mut ColorBag) -> Markup {
    let heading = html! {
        (colored_badge(&permit.application_type, bag))
    };

    card(
        &permit.permit_number,
        html! {
            (heading)
            (timeline(&permit_timeline(permit)))
            table {
                tbody {
                    (optional_row("Application type", Some(permit.application_type.as_str())))
                    (optional_row("Work type", permit.worktype.as_deref()))
                    (optional_row("Contractor name", permit.contractor_name.as_deref()))
                    (optional_row("Contractor address", permit.contractor_address.as_deref()))
                    (optional_row("Contractor phone number", permit.contractor_phone_number.as_deref()))
                    (optional_row(
                        "Estimated cost",
                        permit.estimated_cost.as_deref().and_then(format_currency).as_deref(),
                    ))
                    (optional_row("Parcel owner name", permit.parcel_owner_name.as_deref()))
                    (optional_row("Property owner name", permit.property_owner_name.as_deref()))

                    (optional_date("Processed date", permit.processed_date))
                    (optional_date("Under review date", permit.under_review_date))
                    (optional_date("Review started including", permit.review_started_including))
                    (optional_date("Prescreen completed date", permit.prescreen_completed_date))
                    (optional_date("Review started date excluding", permit.review_started_date_excluding))
                    (optional_date("Collect permit fees date", permit.collect_permit_fees_date))
                    (optional_date("Pending issuance date", permit.pending_issuance_date))
                    (optional_date("Issue permit date", permit.issue_permit_date))
                    (optional_date("PDOX batch date", permit.pdoxbatch_date))
                    (optional_date("Final date", permit.final_date))
                    (optional_date("COO date", permit.coo_date))
                }
            }
        },
    )
}

fn optional_date(label: &str, date: Option<NaiveDateTime>) -> Markup {
    optional_row(label, date.map(|d| format_date(&d)).as_deref())
}
