// errors.rs
use thiserror::Error;

/// Errors raised while routing or rendering a request. Upstream fetch
/// failures never reach this type: the loader turns them into empty results.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error: {0}")]
    Internal(String),
    #[error("View closed before its data arrived")]
    Cancelled,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Internal(_) => 500,
            ServerError::Cancelled => 503,
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::Internal(format!("JSON encode failed: {e}"))
    }
}
