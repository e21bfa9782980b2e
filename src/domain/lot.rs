// src/domain/lot.rs

use crate::domain::ApplicationCategory;
use crate::permits::Permit;
use serde::Serialize;
use std::collections::HashMap;

/// Lot number encoded in a parcel number: the four characters before the
/// last one, read as a number. `"312431779300010"` is lot 1.
///
/// Short parcel numbers are not guarded: an empty slice reads as 0 and
/// anything non-numeric has no lot number at all.
pub fn lot_number_of(parcel_number: &str) -> Option<u32> {
    let chars: Vec<char> = parcel_number.chars().collect();
    let start = chars.len().saturating_sub(5);
    let end = chars.len().saturating_sub(1);

    let slice: String = chars.get(start..end).unwrap_or_default().iter().collect();
    let slice = slice.trim();
    if slice.is_empty() {
        return Some(0);
    }
    slice.parse().ok()
}

/// How permits of an already-seen lot are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationPolicy {
    /// Only the oldest permit of each application category. The oldest one is
    /// taken as the source of truth for that category's status.
    #[default]
    EarliestPerCategory,
    /// Every permit, in input order.
    AllPermits,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedPermit {
    pub category: ApplicationCategory,
    pub permit: Permit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LotPermits {
    ByCategory(Vec<CategorizedPermit>),
    All(Vec<Permit>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lot {
    /// Parcel number of the first permit seen for this lot.
    pub id: String,
    pub number: Option<u32>,
    pub address: String,
    pub permits: LotPermits,
    /// Lowercased `"<number> <address>"`, matched by `search_lots`.
    pub search_index: String,
}

impl Lot {
    fn seed(number: Option<u32>, permit: Permit, policy: AggregationPolicy) -> Self {
        let address = permit.permit_address.clone().unwrap_or_default();
        let search_index = match number {
            Some(n) => format!("{n} {address}"),
            None => address.clone(),
        }
        .to_lowercase();

        let id = permit.parcel_number.clone();
        let permits = match policy {
            AggregationPolicy::AllPermits => LotPermits::All(vec![permit]),
            AggregationPolicy::EarliestPerCategory => {
                LotPermits::ByCategory(vec![CategorizedPermit {
                    category: ApplicationCategory::from_application_type(&permit.application_type),
                    permit,
                }])
            }
        };

        Self {
            id,
            number,
            address,
            permits,
            search_index,
        }
    }

    fn absorb(&mut self, permit: Permit) {
        match &mut self.permits {
            LotPermits::All(permits) => permits.push(permit),
            LotPermits::ByCategory(slots) => {
                let category = ApplicationCategory::from_application_type(&permit.application_type);
                match slots.iter_mut().find(|slot| slot.category == category) {
                    Some(slot) => {
                        if processed_earlier(&permit, &slot.permit) {
                            slot.permit = permit;
                        }
                    }
                    None => slots.push(CategorizedPermit { category, permit }),
                }
            }
        }
    }

    pub fn permits(&self) -> Box<dyn Iterator<Item = &Permit> + '_> {
        match &self.permits {
            LotPermits::All(permits) => Box::new(permits.iter()),
            LotPermits::ByCategory(slots) => Box::new(slots.iter().map(|slot| &slot.permit)),
        }
    }

    pub fn permit_count(&self) -> usize {
        match &self.permits {
            LotPermits::All(permits) => permits.len(),
            LotPermits::ByCategory(slots) => slots.len(),
        }
    }

    /// Distinct categories present on the lot, in first-seen order.
    pub fn categories(&self) -> Vec<ApplicationCategory> {
        let mut seen = Vec::new();
        for permit in self.permits() {
            let category = ApplicationCategory::from_application_type(&permit.application_type);
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    pub fn permits_in(&self, category: ApplicationCategory) -> impl Iterator<Item = &Permit> + '_ {
        self.permits()
            .filter(move |p| ApplicationCategory::from_application_type(&p.application_type) == category)
    }
}

// Strict comparison: ties and missing dates keep the permit already held.
fn processed_earlier(candidate: &Permit, current: &Permit) -> bool {
    match (candidate.processed_date, current.processed_date) {
        (Some(candidate), Some(current)) => candidate < current,
        _ => false,
    }
}

/// Groups permits into lots.
///
/// Permits are visited in input order and that order is part of the
/// contract: the first permit seen for a lot fixes its `id` and `address`, and
/// under `EarliestPerCategory` a permit whose `processed_date` equals the one
/// already held does not replace it. Callers wanting "oldest permit wins" for
/// the address should sort by `processed_date` first (the loader does).
///
/// Lots come back in order of first appearance.
pub fn aggregate_lots<I>(permits: I, policy: AggregationPolicy) -> Vec<Lot>
where
    I: IntoIterator<Item = Permit>,
{
    let mut lots: Vec<Lot> = Vec::new();
    let mut index: HashMap<Option<u32>, usize> = HashMap::new();

    for permit in permits {
        let number = lot_number_of(&permit.parcel_number);
        match index.get(&number) {
            Some(&i) => lots[i].absorb(permit),
            None => {
                index.insert(number, lots.len());
                lots.push(Lot::seed(number, permit, policy));
            }
        }
    }

    lots
}

/// Whitespace-separated tokens; a lot matches if any token is a substring of
/// its search index. Blank input matches everything.
pub fn search_lots<'a>(lots: &'a [Lot], text: &str) -> Vec<&'a Lot> {
    let text = text.to_lowercase();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return lots.iter().collect();
    }

    lots.iter()
        .filter(|lot| tokens.iter().any(|token| lot.search_index.contains(token)))
        .collect()
}
