//! Response assertions

use axum::{body::to_bytes, http::StatusCode, response::Response};
use serde_json::Value;

/// Status and JSON body of a response. An empty body reads as `Null`.
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, body)
}

/// Assert an error response with the given status and message
pub async fn assert_error(response: Response, expected: StatusCode) -> Value {
    let (status, body) = read_json(response).await;
    assert_eq!(status, expected, "unexpected body: {}", body);
    assert_eq!(body["status"].as_u64(), Some(expected.as_u16() as u64));
    assert!(body["error"].is_string());
    body
}

/// Ids of a JSON array of user summaries
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("JSON array")
        .iter()
        .map(|u| u["id"].as_i64().expect("id"))
        .collect()
}
