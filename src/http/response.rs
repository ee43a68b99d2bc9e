use serde::Deserialize;
use serde_json::Value;

/// Successful answer of `POST /generate`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTests {
    pub file_content: String,
}

/// One row of `GET /registered-apis`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisteredService {
    pub url: String,
    #[serde(rename = "type", default)]
    pub test_style: String,
    #[serde(default)]
    pub registration_time: String,
    #[serde(default)]
    pub last_test_result: bool,
}

/// Message the backend put in `error`, or failing that in `detail`.
///
/// FastAPI validation errors carry a structured `detail`; it is shown as JSON.
pub fn backend_message(body: &Value) -> Option<String> {
    ["error", "detail"].iter().find_map(|key| match body.get(*key)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    })
}

/// Only the `detail` field, as returned by FastAPI for HTTP errors.
pub fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
