use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::testing::TestStyle;
use crate::testing::results::ExecutionMetrics;

use super::request::{GenerateRequest, RunRequest};
use super::response::{GeneratedTests, RegisteredService, backend_message, detail_message};

pub const NO_TEST_CODE: &str = "No test code generated";
pub const INVALID_RESULTS: &str = "Invalid test results format";
pub const RUN_FAILED: &str = "Test execution failed";

/// HTTP access to the test backend. Cheap to clone; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

/// Status and raw text of a response; the body is parsed on demand.
struct Reply {
    status: StatusCode,
    raw: String,
}

impl Reply {
    fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.raw).ok()
    }
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads `<service_url>/openapi.json` and returns it pretty-printed.
    pub async fn fetch_spec(&self, service_url: &str) -> Result<String, ClientError> {
        let url = openapi_url(service_url);
        debug!(%url, "fetching OpenAPI specification");

        let request = self
            .http
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let reply = self.send(request).await?;
        let body = reply.json();

        if !reply.status.is_success() {
            warn!(%url, status = %reply.status, "OpenAPI specification request failed");
            return Err(match body.as_ref().and_then(detail_message) {
                Some(detail) => ClientError::Backend(detail),
                None => ClientError::Transport(status_failure(reply.status)),
            });
        }

        let body = body.ok_or_else(|| {
            ClientError::Malformed(format!("`{url}` did not return a JSON document"))
        })?;
        serde_json::to_string_pretty(&body)
            .map_err(|e| ClientError::Malformed(format!("Failed to format specification: {e}")))
    }

    /// Asks the backend to write tests for `service_url`.
    pub async fn generate(
        &self,
        service_url: &str,
        test_style: TestStyle,
    ) -> Result<GeneratedTests, ClientError> {
        let body = GenerateRequest::new(service_url, test_style);
        debug!(service = %body.fastapi_url, style = test_style.as_str(), "requesting test generation");

        let reply = self.post_json("generate", &body).await?;
        let json = reply.json().unwrap_or(Value::Null);

        if !reply.status.is_success() {
            warn!(status = %reply.status, "test generation failed");
            return Err(match backend_message(&json) {
                Some(message) => ClientError::Backend(message),
                None => ClientError::Transport(status_failure(reply.status)),
            });
        }

        match json.get("file_content").and_then(Value::as_str) {
            Some(content) if !content.is_empty() => Ok(GeneratedTests {
                file_content: content.to_string(),
            }),
            _ => {
                warn!("generation response carried no test code");
                Err(match backend_message(&json) {
                    Some(message) => ClientError::Backend(message),
                    None => ClientError::Malformed(NO_TEST_CODE.to_string()),
                })
            }
        }
    }

    /// Runs the most recently generated tests and returns the counters.
    pub async fn run(&self, test_style: TestStyle) -> Result<ExecutionMetrics, ClientError> {
        debug!(style = test_style.as_str(), "requesting test run");

        let reply = self.post_json("run", &RunRequest { test_style }).await?;
        let json = reply.json();

        if !reply.status.is_success() {
            warn!(status = %reply.status, "test run failed");
            let message = json
                .as_ref()
                .and_then(backend_message)
                .unwrap_or_else(|| RUN_FAILED.to_string());
            return Err(ClientError::Backend(message));
        }

        let json = json.ok_or_else(|| ClientError::Malformed(INVALID_RESULTS.to_string()))?;
        if json.get("passed_tests").is_none() {
            warn!("run response has no passed_tests");
            return Err(ClientError::Malformed(INVALID_RESULTS.to_string()));
        }
        serde_json::from_value(json)
            .map_err(|e| ClientError::Malformed(format!("{INVALID_RESULTS}: {e}")))
    }

    pub async fn registered_services(&self) -> Result<Vec<RegisteredService>, ClientError> {
        let url = self.endpoint("registered-apis");
        debug!(%url, "listing registered services");

        let reply = self.send(self.http.get(&url)).await?;
        if !reply.status.is_success() {
            warn!(status = %reply.status, "listing registered services failed");
            return Err(ClientError::Backend(status_failure(reply.status)));
        }

        let json = reply
            .json()
            .ok_or_else(|| ClientError::Malformed("Registered services list is not JSON".to_string()))?;
        serde_json::from_value(json)
            .map_err(|e| ClientError::Malformed(format!("Unexpected registered services list: {e}")))
    }

    /// Triggers the dashboard run. The payload is passed on untouched; a
    /// non-JSON body comes back as a JSON string.
    pub async fn run_dashboard(&self) -> Result<Value, ClientError> {
        let url = self.endpoint("run-tests");
        debug!(%url, "requesting dashboard run");

        let reply = self.send(self.http.post(&url)).await?;
        let json = reply.json();

        if !reply.status.is_success() {
            let message = json
                .as_ref()
                .and_then(backend_message)
                .unwrap_or_else(|| status_failure(reply.status));
            return Err(ClientError::Backend(message));
        }

        Ok(json.unwrap_or(Value::String(reply.raw)))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Reply, ClientError> {
        let request = self.http.post(self.endpoint(path)).json(body);
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Reply, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "backend unreachable");
            ClientError::Transport(format!("Request failed: {e}"))
        })?;
        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response: {e}")))?;

        Ok(Reply { status, raw })
    }
}

/// `<service_url>/openapi.json` with exactly one slash before the file name.
/// A URL that already points at the document is used as is.
pub fn openapi_url(service_url: &str) -> String {
    let base = service_url.trim().trim_end_matches('/');
    if base.ends_with("/openapi.json") {
        base.to_string()
    } else {
        format!("{base}/openapi.json")
    }
}

fn status_failure(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}
