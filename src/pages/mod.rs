//! Page state and update logic, one module per route. Rendering lives in
//! `crate::ui`.

pub mod dashboard;
pub mod registered;
pub mod registration;
pub mod results;

use std::path::PathBuf;

use iced::Task;

use crate::Route;
use crate::http::client::BackendClient;
use crate::testing::results::ResultsBundle;

/// Shared, read-only services handed to every page update.
#[derive(Debug, Clone)]
pub struct Context {
    pub client: BackendClient,
    pub downloads_dir: PathBuf,
}

/// A page transition plus the payload it carries. The bundle only survives
/// this one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub bundle: Option<ResultsBundle>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, bundle: None }
    }

    pub fn results(bundle: ResultsBundle) -> Self {
        Self {
            route: Route::Results,
            bundle: Some(bundle),
        }
    }
}

/// What a page asks the shell to do after handling a message.
pub enum Outcome<M> {
    None,
    Task(Task<M>),
    Navigate(Navigation),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Inline status line shown by the page that started an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    Context {
        client: BackendClient::new("http://127.0.0.1:1"),
        downloads_dir: std::env::temp_dir(),
    }
}
