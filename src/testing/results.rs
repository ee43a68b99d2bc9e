//! Results handed to the results page and the numbers shown from them.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{TestCase, TestStatus, TestStyle};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters reported by the backend after a run. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    #[serde(default)]
    pub total_tests: Option<u64>,
    #[serde(default)]
    pub passed_tests: Option<u64>,
    #[serde(default)]
    pub failed_tests: Option<u64>,
    #[serde(default)]
    pub execution_time_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestResults {
    pub output: String,
    pub execution_metrics: Option<ExecutionMetrics>,
    pub test_cases: Vec<TestCase>,
    /// Last known outcome when only a summary row was available.
    pub last_passed: Option<bool>,
}

impl TestResults {
    /// Results of a finished registration run.
    pub fn from_run(generated_code: &str, metrics: ExecutionMetrics) -> Self {
        Self {
            output: generated_code.to_string(),
            execution_metrics: Some(metrics),
            test_cases: super::extract_test_cases(generated_code),
            last_passed: None,
        }
    }

    /// Placeholder results for a service picked from the registered list.
    pub fn from_last_result(passed: bool) -> Self {
        Self {
            output: "Loading...".to_string(),
            execution_metrics: None,
            test_cases: Vec::new(),
            last_passed: Some(passed),
        }
    }

    /// Reads an opaque backend payload without failing on unknown shapes.
    ///
    /// Metrics come from `executionMetrics`/`execution_metrics`, or from the
    /// top level when it carries `passed_tests`.
    pub fn from_value(value: &Value) -> Self {
        let output = match value.get("output") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => pretty(value),
            Some(other) => pretty(other),
        };

        let metrics_source = value
            .get("executionMetrics")
            .or_else(|| value.get("execution_metrics"))
            .or_else(|| value.get("passed_tests").map(|_| value));
        let execution_metrics =
            metrics_source.and_then(|source| serde_json::from_value(source.clone()).ok());

        let test_cases = value
            .get("testCases")
            .or_else(|| value.get("test_cases"))
            .and_then(Value::as_array)
            .map(|cases| {
                cases
                    .iter()
                    .filter_map(|case| serde_json::from_value::<TestCase>(case.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            output,
            execution_metrics,
            test_cases,
            last_passed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetails {
    pub url: String,
    pub test_style: String,
    pub registered_at: String,
}

impl ServiceDetails {
    /// Details stamped with the current time, for a service registered just now.
    pub fn registered_now(url: &str, test_style: TestStyle) -> Self {
        Self {
            url: url.to_string(),
            test_style: test_style.as_str().to_string(),
            registered_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Everything the results page renders. Lives for a single navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsBundle {
    pub results: Option<TestResults>,
    pub generated_code: Option<String>,
    pub service: Option<ServiceDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub execution_time_seconds: f64,
}

impl SummaryMetrics {
    /// Backend counters win field by field; the parsed cases fill the gaps.
    pub fn from_results(results: &TestResults) -> Self {
        let metrics = results.execution_metrics.clone().unwrap_or_default();
        let count = |status: TestStatus| {
            results
                .test_cases
                .iter()
                .filter(|case| case.status == status)
                .count() as u64
        };

        Self {
            total: metrics
                .total_tests
                .unwrap_or(results.test_cases.len() as u64),
            passed: metrics
                .passed_tests
                .unwrap_or_else(|| count(TestStatus::Passed)),
            failed: metrics
                .failed_tests
                .unwrap_or_else(|| count(TestStatus::Failed)),
            execution_time_seconds: metrics.execution_time_seconds.unwrap_or(0.0),
        }
    }

    /// Passed share in `0.0..=100.0`; zero when nothing ran.
    pub fn success_ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64 * 100.0) as f32
    }

    pub fn success_percent(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        (self.passed as f64 / self.total as f64 * 100.0).round() as u64
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Overall badge for the API card.
pub fn rollup_passed(results: &TestResults, summary: &SummaryMetrics) -> bool {
    match (&results.execution_metrics, results.last_passed) {
        (None, Some(last_passed)) => last_passed,
        _ => summary.all_passed(),
    }
}

/// Renders backend or client timestamps in local time, leaving unknown
/// formats untouched.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
