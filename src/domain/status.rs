// src/domain/status.rs

use crate::domain::{ApplicationCategory, Lot};
use crate::permits::Permit;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    ReadyToMove,
    ReadySoon,
    InConstruction,
    Other,
}

impl LotStatus {
    pub fn label(self) -> &'static str {
        match self {
            LotStatus::ReadyToMove => "Ready to move",
            LotStatus::ReadySoon => "Ready soon",
            LotStatus::InConstruction => "In construction",
            LotStatus::Other => "Other",
        }
    }
}

/// A building permit counts as complete once it has a final inspection or a
/// certificate of occupancy.
pub fn is_complete(permit: &Permit) -> bool {
    permit.coo_date.is_some() || permit.final_date.is_some()
}

/// Determines the coarse status of a lot from its permits.
///
/// The house hangs off the building permit, so the lot is only "Ready to
/// move" when there is exactly one of them. With several building permits we
/// can't tell which one is authoritative and the lot stays in `Other`.
pub fn derive_lot_status(lot: &Lot) -> LotStatus {
    let building: Vec<&Permit> = lot.permits_in(ApplicationCategory::Building).collect();

    let the_building_permit = match building.as_slice() {
        [] => return LotStatus::Other,
        [only] => *only,
        _ => return LotStatus::Other,
    };

    if is_complete(the_building_permit) {
        return LotStatus::ReadyToMove;
    }

    let trade_finished = lot.permits().any(|p| {
        ApplicationCategory::from_application_type(&p.application_type).is_trade()
            && p.final_date.is_some()
    });
    if trade_finished {
        return LotStatus::ReadySoon;
    }

    LotStatus::InConstruction
}
