//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use axum::extract::Request;
use serde::de::DeserializeOwned;

/// Maximum request body size (1 MiB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Read and deserialize a JSON request body.
///
/// Anything that is not well-formed JSON of the expected shape is a
/// bad request, reported through the standard error envelope.
pub async fn read_json_body<T: DeserializeOwned>(req: Request) -> ApiResult<T> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(format!("invalid JSON: {e}")))
}
