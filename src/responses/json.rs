// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize `value` as the response body.
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    let body = serde_json::to_vec(value)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|e| ServerError::Internal(e.to_string()))
}
