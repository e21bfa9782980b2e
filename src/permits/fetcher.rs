// fetcher.rs
// Dataset docs: https://dev.socrata.com/foundry/data.cityoforlando.net/5pzm-dn5w
use crate::permits::{FetchError, Permit};
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://data.cityoforlando.net/resource/5pzm-dn5w.json";

/// Parcels whose records are known to be wrong upstream.
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "312431779300120", // lot 12
];

const USER_AGENT: &str = concat!("permit_tracker/", env!("CARGO_PKG_VERSION"));

/// Equality filters sent as query parameters. Setting a field twice keeps the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermitQuery {
    params: Vec<(String, String)>,
}

impl PermitQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(name, _)| name == field) {
            Some(slot) => slot.1 = value,
            None => self.params.push((field.to_string(), value)),
        }
        self
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    #[cfg(test)]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        url
    }
}

/// Where permit records come from.
pub trait PermitSource: Send + Sync {
    /// Records exactly as the upstream sent them, unknown fields included.
    fn fetch_raw_records(&self, query: &PermitQuery) -> Result<Vec<Value>, FetchError>;

    fn fetch_records(&self, query: &PermitQuery) -> Result<Vec<Permit>, FetchError> {
        let records = self.fetch_raw_records(query)?;
        serde_json::from_value(Value::Array(records)).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// The live open-data API.
pub struct CityPermitApi {
    client: Client,
    endpoint: Url,
}

impl CityPermitApi {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|e| FetchError::Endpoint(e.to_string()))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl PermitSource for CityPermitApi {
    fn fetch_raw_records(&self, query: &PermitQuery) -> Result<Vec<Value>, FetchError> {
        let url = query.to_url(&self.endpoint);
        debug!(%url, "fetching permits");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    parcels: HashSet<String>,
}

impl Blocklist {
    pub fn new<I, S>(parcels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parcels: parcels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, parcel_number: &str) -> bool {
        self.parcels.contains(parcel_number)
    }

    pub fn retain_allowed(&self, permits: &mut Vec<Permit>) {
        permits.retain(|p| !self.contains(&p.parcel_number));
    }
}

/// Runs queries against a source and drops block-listed parcels.
pub struct PermitFetcher {
    source: Box<dyn PermitSource>,
    blocklist: Blocklist,
}

impl PermitFetcher {
    pub fn new(source: Box<dyn PermitSource>, blocklist: Blocklist) -> Self {
        Self { source, blocklist }
    }

    pub fn fetch(&self, query: &PermitQuery) -> Result<Vec<Permit>, FetchError> {
        let mut permits = self.source.fetch_records(query)?;
        let before = permits.len();
        self.blocklist.retain_allowed(&mut permits);

        if permits.len() != before {
            debug!(dropped = before - permits.len(), "filtered block-listed permits");
        }

        Ok(permits)
    }

    /// Raw upstream records, passed through untouched. The block-list is not
    /// applied.
    pub fn fetch_raw(&self, query: &PermitQuery) -> Result<Vec<Value>, FetchError> {
        self.source.fetch_raw_records(query)
    }
}
