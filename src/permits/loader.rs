// loader.rs
use crate::permits::{Permit, PermitFetcher, PermitQuery};
use serde_json::Value;
use std::cmp::Ordering;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Result of one load. A view that went away before its response arrived
/// gets `Discarded` instead of data.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    Discarded,
}

impl<T> Loaded<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Loaded::Ready(value) => Some(value),
            Loaded::Discarded => None,
        }
    }
}

pub struct PermitLoader<'a> {
    fetcher: &'a PermitFetcher,
}

impl<'a> PermitLoader<'a> {
    pub fn new(fetcher: &'a PermitFetcher) -> Self {
        Self { fetcher }
    }

    /// One fetch attempt. Failures are logged and come back as an empty list;
    /// successful results are ordered oldest first.
    pub fn load(&self, query: &PermitQuery, cancel: &CancellationToken) -> Loaded<Vec<Permit>> {
        if cancel.is_cancelled() {
            debug!(?query, "view already closed, skipping fetch");
            return Loaded::Discarded;
        }

        let mut permits = match self.fetcher.fetch(query) {
            Ok(permits) => permits,
            Err(e) => {
                error!(error = %e, ?query, "permit fetch failed");
                Vec::new()
            }
        };

        if cancel.is_cancelled() {
            debug!(?query, count = permits.len(), "view closed, discarding permits");
            return Loaded::Discarded;
        }

        sort_by_processed_date(&mut permits);
        Loaded::Ready(permits)
    }

    /// Same boundary rules as `load`, but the records stay as upstream JSON.
    /// No block-list, no sorting.
    pub fn load_raw(&self, query: &PermitQuery, cancel: &CancellationToken) -> Loaded<Vec<Value>> {
        if cancel.is_cancelled() {
            return Loaded::Discarded;
        }

        let records = self.fetcher.fetch_raw(query).unwrap_or_else(|e| {
            error!(error = %e, ?query, "raw permit fetch failed");
            Vec::new()
        });

        if cancel.is_cancelled() {
            return Loaded::Discarded;
        }
        Loaded::Ready(records)
    }
}

/// Stable, oldest first. Permits without a processed date go last.
pub fn sort_by_processed_date(permits: &mut [Permit]) {
    permits.sort_by(|a, b| match (a.processed_date, b.processed_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
