use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON decode error: {0}")]
    Decode(String),
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}
