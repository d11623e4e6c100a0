//! Helpers shared by the endpoint tests.

use axum::response::Response;
use serde_json::Value;

/// Read a response body to completion and parse it as JSON.
///
/// # Panics
/// Panics if the body cannot be read or is not valid JSON.
pub async fn parse_json_body(response: Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read response body");

    serde_json::from_slice(&body_bytes).expect("response body should be valid JSON")
}
