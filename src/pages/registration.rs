use std::sync::LazyLock;

use iced::Task;
use regex::Regex;
use tracing::{info, warn};

use crate::Route;
use crate::error::ClientError;
use crate::http::client::BackendClient;
use crate::http::response::GeneratedTests;
use crate::testing::TestStyle;
use crate::testing::results::{ExecutionMetrics, ResultsBundle, ServiceDetails, TestResults};

use super::{Context, Navigation, Notice, Outcome};

pub const SPEC_FETCHED: &str = "OpenAPI specification fetched successfully.";
pub const SPEC_FETCH_FAILED: &str =
    "Failed to fetch OpenAPI specification. Please check the link and ensure the backend is running.";
pub const NO_SPEC: &str = "No OpenAPI specification to register.";
pub const INVALID_URL: &str = "Enter a URL starting with http:// or https://";
pub const GENERATING: &str = "Generating test cases...";
pub const EXECUTING: &str = "Test cases generated, now executing...";

static SERVICE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid service URL pattern"));

#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    StyleSelected(TestStyle),
    FetchSpecPressed,
    SpecFetched(Result<String, ClientError>),
    SpecToggled,
    RegisterPressed,
    Generated(Result<GeneratedTests, ClientError>),
    RunFinished(Result<ExecutionMetrics, ClientError>),
    ViewResultsPressed,
    ViewRegisteredPressed,
}

#[derive(Debug, Default)]
pub struct RegistrationPage {
    pub service_url: String,
    pub test_style: TestStyle,
    pub spec: Option<String>,
    pub spec_expanded: bool,
    pub fetching: bool,
    pub registering: bool,
    pub notice: Option<Notice>,
    /// Code from the generation step, held until the run reports back.
    pub generated_code: Option<String>,
    /// Set only after a complete generate-and-run cycle.
    pub bundle: Option<ResultsBundle>,
}

impl RegistrationPage {
    pub fn can_fetch(&self) -> bool {
        !self.fetching && !self.service_url.trim().is_empty()
    }

    pub fn can_register(&self) -> bool {
        self.spec.is_some() && !self.registering
    }

    pub fn update(&mut self, message: Message, ctx: &Context) -> Outcome<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.service_url = url;
                Outcome::None
            }
            Message::StyleSelected(style) => {
                self.test_style = style;
                Outcome::None
            }
            Message::FetchSpecPressed => {
                if !self.can_fetch() {
                    return Outcome::None;
                }
                self.fetching = true;

                let client = ctx.client.clone();
                let service_url = self.service_url.trim().to_string();
                Outcome::Task(Task::perform(
                    async move { client.fetch_spec(&service_url).await },
                    Message::SpecFetched,
                ))
            }
            Message::SpecFetched(result) => {
                self.fetching = false;
                match result {
                    Ok(spec) => {
                        self.spec = Some(spec);
                        self.notice = Some(Notice::success(SPEC_FETCHED));
                    }
                    Err(err) => {
                        warn!(error = %err, "fetching OpenAPI specification failed");
                        self.spec = None;
                        self.spec_expanded = false;
                        let text = match err {
                            ClientError::Backend(detail) => detail,
                            _ => SPEC_FETCH_FAILED.to_string(),
                        };
                        self.notice = Some(Notice::error(text));
                    }
                }
                Outcome::None
            }
            Message::SpecToggled => {
                self.spec_expanded = !self.spec_expanded;
                Outcome::None
            }
            Message::RegisterPressed => {
                if self.registering {
                    return Outcome::None;
                }
                if self.spec.is_none() {
                    self.notice = Some(Notice::error(NO_SPEC));
                    return Outcome::None;
                }
                let service_url = self.service_url.trim().to_string();
                if !SERVICE_URL.is_match(&service_url) {
                    self.notice = Some(Notice::error(INVALID_URL));
                    return Outcome::None;
                }

                self.registering = true;
                self.bundle = None;
                self.generated_code = None;
                self.notice = Some(Notice::info(GENERATING));

                Outcome::Task(Task::perform(
                    generate_tests(ctx.client.clone(), service_url, self.test_style),
                    Message::Generated,
                ))
            }
            Message::Generated(result) => {
                if !self.registering {
                    return Outcome::None;
                }
                match result {
                    Ok(generated) => {
                        self.generated_code = Some(generated.file_content);
                        self.notice = Some(Notice::info(EXECUTING));
                        Outcome::Task(Task::perform(
                            run_tests(ctx.client.clone(), self.test_style),
                            Message::RunFinished,
                        ))
                    }
                    Err(err) => {
                        self.fail_registration(err);
                        Outcome::None
                    }
                }
            }
            Message::RunFinished(result) => {
                if !self.registering {
                    return Outcome::None;
                }
                self.registering = false;
                let code = self.generated_code.take().unwrap_or_default();
                match result {
                    Ok(metrics) => {
                        let passed = metrics.passed_tests.unwrap_or(0);
                        self.notice = Some(Notice::success(format!("Testing completed! {passed} tests passed")));
                        self.bundle = Some(ResultsBundle {
                            results: Some(TestResults::from_run(&code, metrics)),
                            generated_code: Some(code),
                            service: None,
                        });
                    }
                    Err(err) => self.fail_registration(err),
                }
                Outcome::None
            }
            Message::ViewResultsPressed => match &self.bundle {
                Some(bundle) => {
                    let mut bundle = bundle.clone();
                    bundle.service = Some(ServiceDetails::registered_now(
                        self.service_url.trim(),
                        self.test_style,
                    ));
                    Outcome::Navigate(Navigation::results(bundle))
                }
                None => Outcome::None,
            },
            Message::ViewRegisteredPressed => Outcome::Navigate(Navigation::to(Route::RegisteredServices)),
        }
    }

    /// The first failing step ends the attempt.
    fn fail_registration(&mut self, err: ClientError) {
        self.registering = false;
        self.generated_code = None;
        self.bundle = None;
        self.notice = Some(Notice::error(err.to_string()));
    }
}

/// First registration step. The run is only issued once this succeeds.
pub async fn generate_tests(
    client: BackendClient,
    service_url: String,
    test_style: TestStyle,
) -> Result<GeneratedTests, ClientError> {
    let generated = client.generate(&service_url, test_style).await.inspect_err(|err| {
        warn!(service = %service_url, error = %err, "test generation failed");
    })?;
    info!(service = %service_url, bytes = generated.file_content.len(), "tests generated");
    Ok(generated)
}

pub async fn run_tests(client: BackendClient, test_style: TestStyle) -> Result<ExecutionMetrics, ClientError> {
    let metrics = client.run(test_style).await.inspect_err(|err| {
        warn!(error = %err, "test run failed");
    })?;
    info!(
        passed = ?metrics.passed_tests,
        total = ?metrics.total_tests,
        "test run finished"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::client::{INVALID_RESULTS, NO_TEST_CODE};
    use crate::pages::{Severity, test_context};
    use crate::testing::TestStatus;

    fn finished_bundle(passed: u64) -> ResultsBundle {
        ResultsBundle {
            results: Some(TestResults::from_run(
                "def test_a():\n    pass\n",
                ExecutionMetrics {
                    total_tests: Some(1),
                    passed_tests: Some(passed),
                    failed_tests: Some(1 - passed),
                    execution_time_seconds: Some(0.2),
                },
            )),
            generated_code: Some("def test_a():\n    pass\n".to_string()),
            service: None,
        }
    }

    #[test]
    fn register_without_spec_is_refused_locally() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            service_url: "http://localhost:8001".to_string(),
            ..Default::default()
        };

        let outcome = page.update(Message::RegisterPressed, &ctx);

        assert!(matches!(outcome, Outcome::None));
        assert!(!page.registering);
        assert_eq!(page.notice, Some(Notice::error(NO_SPEC)));
    }

    #[test]
    fn register_with_invalid_url_is_refused_locally() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            service_url: "localhost:8001".to_string(),
            spec: Some("{}".to_string()),
            ..Default::default()
        };

        let outcome = page.update(Message::RegisterPressed, &ctx);

        assert!(matches!(outcome, Outcome::None));
        assert_eq!(page.notice, Some(Notice::error(INVALID_URL)));
    }

    #[test]
    fn register_starts_workflow_and_disables_trigger() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            service_url: "http://localhost:8001/".to_string(),
            spec: Some("{}".to_string()),
            bundle: Some(finished_bundle(1)),
            ..Default::default()
        };

        let outcome = page.update(Message::RegisterPressed, &ctx);

        assert!(matches!(outcome, Outcome::Task(_)));
        assert!(page.registering);
        assert!(!page.can_register());
        assert!(page.bundle.is_none());
        assert_eq!(page.notice, Some(Notice::info(GENERATING)));

        let again = page.update(Message::RegisterPressed, &ctx);
        assert!(matches!(again, Outcome::None));
    }

    #[test]
    fn fetch_needs_a_url_and_no_request_in_flight() {
        let ctx = test_context();
        let mut page = RegistrationPage::default();
        assert!(matches!(page.update(Message::FetchSpecPressed, &ctx), Outcome::None));

        page.update(Message::UrlChanged("http://localhost:8001".to_string()), &ctx);
        assert!(matches!(page.update(Message::FetchSpecPressed, &ctx), Outcome::Task(_)));
        assert!(page.fetching);
        assert!(matches!(page.update(Message::FetchSpecPressed, &ctx), Outcome::None));
    }

    #[test]
    fn fetched_spec_is_stored() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            fetching: true,
            ..Default::default()
        };

        page.update(Message::SpecFetched(Ok("{\n  \"openapi\": \"3.1.0\"\n}".to_string())), &ctx);

        assert!(!page.fetching);
        assert!(page.spec.is_some());
        assert_eq!(page.notice, Some(Notice::success(SPEC_FETCHED)));
    }

    #[test]
    fn failed_fetch_clears_spec_and_shows_detail() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            spec: Some("{}".to_string()),
            fetching: true,
            ..Default::default()
        };

        page.update(Message::SpecFetched(Err(ClientError::Backend("Not Found".to_string()))), &ctx);

        assert!(page.spec.is_none());
        assert_eq!(page.notice, Some(Notice::error("Not Found")));
    }

    #[test]
    fn failed_fetch_without_detail_shows_fallback() {
        let ctx = test_context();
        let mut page = RegistrationPage::default();

        page.update(
            Message::SpecFetched(Err(ClientError::Transport("Request failed: refused".to_string()))),
            &ctx,
        );

        assert_eq!(page.notice, Some(Notice::error(SPEC_FETCH_FAILED)));
    }

    fn generated(code: &str) -> Message {
        Message::Generated(Ok(GeneratedTests {
            file_content: code.to_string(),
        }))
    }

    fn one_passed() -> ExecutionMetrics {
        ExecutionMetrics {
            total_tests: Some(1),
            passed_tests: Some(1),
            failed_tests: Some(0),
            execution_time_seconds: Some(0.2),
        }
    }

    #[test]
    fn generated_code_moves_on_to_execution() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            registering: true,
            ..Default::default()
        };

        let outcome = page.update(generated("def test_a():\n    pass\n"), &ctx);

        assert!(matches!(outcome, Outcome::Task(_)));
        assert!(page.registering);
        assert_eq!(page.notice, Some(Notice::info(EXECUTING)));
        assert_eq!(page.generated_code.as_deref(), Some("def test_a():\n    pass\n"));
        assert!(page.bundle.is_none());
    }

    #[test]
    fn failed_generation_stops_before_running() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            registering: true,
            ..Default::default()
        };

        let outcome = page.update(
            Message::Generated(Err(ClientError::Malformed(NO_TEST_CODE.to_string()))),
            &ctx,
        );

        assert!(matches!(outcome, Outcome::None));
        assert!(!page.registering);
        assert_eq!(page.notice, Some(Notice::error(NO_TEST_CODE)));
    }

    #[test]
    fn late_step_replies_are_ignored_when_idle() {
        let ctx = test_context();
        let mut page = RegistrationPage::default();

        assert!(matches!(page.update(generated("def test_a():\n"), &ctx), Outcome::None));
        assert!(matches!(page.update(Message::RunFinished(Ok(one_passed())), &ctx), Outcome::None));
        assert!(page.bundle.is_none());
        assert!(page.notice.is_none());
    }

    #[test]
    fn finished_registration_reports_passed_count_and_enables_results() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            service_url: "http://localhost:8001".to_string(),
            test_style: TestStyle::Bdd,
            registering: true,
            ..Default::default()
        };

        page.update(generated("def test_a():\n    pass\n"), &ctx);
        page.update(Message::RunFinished(Ok(one_passed())), &ctx);

        assert!(!page.registering);
        assert!(page.generated_code.is_none());
        assert_eq!(page.notice, Some(Notice::success("Testing completed! 1 tests passed")));

        let Outcome::Navigate(navigation) = page.update(Message::ViewResultsPressed, &ctx) else {
            panic!("expected navigation");
        };
        assert_eq!(navigation.route, Route::Results);
        let bundle = navigation.bundle.unwrap();
        let service = bundle.service.unwrap();
        assert_eq!(service.url, "http://localhost:8001");
        assert_eq!(service.test_style, "bdd");
        assert!(!service.registered_at.is_empty());
        assert_eq!(bundle.generated_code.as_deref(), Some("def test_a():\n    pass\n"));
        assert_eq!(bundle.results.unwrap().test_cases[0].test_case, "test_a");
    }

    #[test]
    fn failed_registration_clears_success() {
        let ctx = test_context();
        let mut page = RegistrationPage {
            registering: true,
            generated_code: Some("def test_a():\n".to_string()),
            ..Default::default()
        };

        page.update(
            Message::RunFinished(Err(ClientError::Malformed(INVALID_RESULTS.to_string()))),
            &ctx,
        );

        assert!(page.bundle.is_none());
        assert!(page.generated_code.is_none());
        assert!(!page.registering);
        assert_eq!(page.notice.as_ref().map(|notice| notice.severity), Some(Severity::Error));
        assert!(matches!(page.update(Message::ViewResultsPressed, &ctx), Outcome::None));
    }

    #[test]
    fn registered_list_is_reachable() {
        let ctx = test_context();
        let mut page = RegistrationPage::default();
        let Outcome::Navigate(navigation) = page.update(Message::ViewRegisteredPressed, &ctx) else {
            panic!("expected navigation");
        };
        assert_eq!(navigation, Navigation::to(Route::RegisteredServices));
    }

    #[tokio::test]
    async fn generation_without_code_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let err = generate_tests(client, "http://svc".to_string(), TestStyle::Pytest)
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Malformed(NO_TEST_CODE.to_string()));
    }

    #[tokio::test]
    async fn malformed_run_response_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "done" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let err = run_tests(client, TestStyle::Pytest).await.unwrap_err();

        assert_eq!(err, ClientError::Malformed(INVALID_RESULTS.to_string()));
    }

    #[tokio::test]
    async fn complete_workflow_builds_bundle() {
        let code = "def test_list_transactions():\n    pass\n\ndef test_create_transaction():\n    pass\n";
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_content": code })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_tests": 2,
                "passed_tests": 2,
                "failed_tests": 0,
                "execution_time_seconds": 0.8
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let ctx = Context {
            client: client.clone(),
            ..test_context()
        };
        let mut page = RegistrationPage {
            service_url: "http://svc/".to_string(),
            spec: Some("{}".to_string()),
            ..Default::default()
        };

        let _ = page.update(Message::RegisterPressed, &ctx);
        let generated = generate_tests(client.clone(), "http://svc/".to_string(), TestStyle::Pytest).await;
        let _ = page.update(Message::Generated(generated), &ctx);
        assert_eq!(page.notice, Some(Notice::info(EXECUTING)));
        let metrics = run_tests(client, TestStyle::Pytest).await;
        let _ = page.update(Message::RunFinished(metrics), &ctx);

        assert_eq!(page.notice, Some(Notice::success("Testing completed! 2 tests passed")));
        let bundle = page.bundle.unwrap();
        let results = bundle.results.unwrap();
        assert_eq!(results.output, code);
        assert_eq!(results.execution_metrics.unwrap().passed_tests, Some(2));
        assert_eq!(results.test_cases.len(), 2);
        assert_eq!(results.test_cases[0].test_case, "test_list_transactions");
        assert!(results.test_cases.iter().all(|case| case.status == TestStatus::Pending));
        assert_eq!(bundle.generated_code.as_deref(), Some(code));
        assert!(bundle.service.is_none());
    }
}
