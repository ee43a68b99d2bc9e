use iced::Task;
use tracing::{error, info};

use crate::error::ClientError;
use crate::http::response::RegisteredService;
use crate::testing::results::{ResultsBundle, ServiceDetails, TestResults};

use super::{Context, Navigation, Outcome};

pub const LOAD_FAILED: &str = "Failed to fetch registered APIs";

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<RegisteredService>, ClientError>),
    ViewResultsPressed(usize),
}

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<RegisteredService>),
    Failed(String),
}

#[derive(Debug)]
pub struct RegisteredPage {
    pub state: LoadState,
}

impl RegisteredPage {
    /// Mounting the page immediately asks the backend for the list.
    pub fn new(ctx: &Context) -> (Self, Task<Message>) {
        let client = ctx.client.clone();
        let task = Task::perform(
            async move { client.registered_services().await },
            Message::Loaded,
        );
        (
            Self {
                state: LoadState::Loading,
            },
            task,
        )
    }

    pub fn update(&mut self, message: Message) -> Outcome<Message> {
        match message {
            Message::Loaded(Ok(services)) => {
                info!(count = services.len(), "registered services loaded");
                self.state = LoadState::Loaded(services);
                Outcome::None
            }
            Message::Loaded(Err(err)) => {
                error!(error = %err, "listing registered services failed");
                self.state = LoadState::Failed(LOAD_FAILED.to_string());
                Outcome::None
            }
            Message::ViewResultsPressed(index) => {
                let LoadState::Loaded(services) = &self.state else {
                    return Outcome::None;
                };
                match services.get(index) {
                    Some(service) => Outcome::Navigate(Navigation::results(summary_bundle(service))),
                    None => Outcome::None,
                }
            }
        }
    }
}

/// Only the last pass/fail flag is known for a listed service.
fn summary_bundle(service: &RegisteredService) -> ResultsBundle {
    ResultsBundle {
        results: Some(TestResults::from_last_result(service.last_test_result)),
        generated_code: None,
        service: Some(ServiceDetails {
            url: service.url.clone(),
            test_style: service.test_style.clone(),
            registered_at: service.registration_time.clone(),
        }),
    }
}
