// config.rs
use crate::permits::{DEFAULT_BLOCKLIST, DEFAULT_ENDPOINT};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {0:?}: {1}")]
    Listen(String, String),
    #[error("invalid permit endpoint {0:?}: {1}")]
    Endpoint(String, String),
    #[error("workers must be at least 1")]
    Workers,
}

/// Summerdale Park building status.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address the web server binds to.
    #[arg(long, env = "PERMITS_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// Worker threads serving requests.
    #[arg(long, env = "PERMITS_WORKERS", default_value_t = 8)]
    pub workers: usize,

    /// Socrata resource holding the permit records.
    #[arg(long, env = "PERMITS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Parcel numbers to drop from every result, comma separated.
    #[arg(
        long,
        env = "PERMITS_BLOCKLIST",
        value_delimiter = ',',
        default_values_t = DEFAULT_BLOCKLIST.iter().map(|s| s.to_string())
    )]
    pub blocklist: Vec<String>,

    /// Upstream request timeout.
    #[arg(long, env = "PERMITS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen: SocketAddr,
    pub workers: usize,
    pub endpoint: Url,
    pub blocklist: Vec<String>,
    pub timeout: Duration,
}

impl TryFrom<Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let listen = cli
            .listen
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Listen(cli.listen.clone(), e.to_string()))?;

        let endpoint = Url::parse(&cli.endpoint)
            .map_err(|e| ConfigError::Endpoint(cli.endpoint.clone(), e.to_string()))?;

        if cli.workers == 0 {
            return Err(ConfigError::Workers);
        }

        let blocklist = cli
            .blocklist
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            listen,
            workers: cli.workers,
            endpoint,
            blocklist,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
