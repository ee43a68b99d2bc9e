//! # Generated tests
//!
//! Test styles offered by the backend and the line matcher that lists the
//! test functions contained in generated code.

pub mod results;

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// File name used when saving BDD output.
pub const BDD_FILE_NAME: &str = "api_tests.feature";
/// File name used when saving any other generated output.
pub const PYTEST_FILE_NAME: &str = "generated_tests.py";

/// Matches one declaration style only: `def test_<name>(`.
static TEST_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdef\s+(test_[A-Za-z0-9_]*)\s*\(").expect("valid test pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStyle {
    #[default]
    Pytest,
    Bdd,
}

impl TestStyle {
    pub const ALL: [TestStyle; 2] = [TestStyle::Pytest, TestStyle::Bdd];

    /// Name sent to the backend in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStyle::Pytest => "pytest",
            TestStyle::Bdd => "bdd",
        }
    }
}

impl Display for TestStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStyle::Pytest => "Pytest",
            TestStyle::Bdd => "BDD",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pending,
    Passed,
    Failed,
}

impl Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStatus::Pending => "PENDING",
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub test_case: String,
    pub status: TestStatus,
}

/// Lists the test functions declared in generated code, in source order.
///
/// Every case starts out `Pending`; nothing in the client moves it further.
/// Feature files contain no `def test_` lines and therefore yield nothing.
pub fn extract_test_cases(code: &str) -> Vec<TestCase> {
    code.lines()
        .filter_map(|line| TEST_FUNCTION.captures(line))
        .map(|captures| TestCase {
            test_case: captures[1].to_string(),
            status: TestStatus::Pending,
        })
        .collect()
}

/// Name of the file the generated code is saved under for a given style.
pub fn download_file_name(test_style: &str) -> &'static str {
    if test_style == TestStyle::Bdd.as_str() {
        BDD_FILE_NAME
    } else {
        PYTEST_FILE_NAME
    }
}
