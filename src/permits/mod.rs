mod fetch_error;
mod fetcher;
mod loader;
mod models;

pub use fetch_error::FetchError;
pub use fetcher::{
    Blocklist, CityPermitApi, PermitFetcher, PermitQuery, PermitSource, DEFAULT_BLOCKLIST,
    DEFAULT_ENDPOINT,
};
pub use loader::PermitLoader;
pub use models::Permit;
#[cfg(test)]
pub use models::socrata_date;
