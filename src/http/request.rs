use serde::Serialize;

use crate::testing::TestStyle;

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub fastapi_url: String,
    #[serde(rename = "type")]
    pub test_style: TestStyle,
}

impl GenerateRequest {
    pub fn new(service_url: &str, test_style: TestStyle) -> Self {
        Self {
            fastapi_url: service_url.trim().trim_end_matches('/').to_string(),
            test_style,
        }
    }
}

/// Body of `POST /run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest {
    #[serde(rename = "type")]
    pub test_style: TestStyle,
}
