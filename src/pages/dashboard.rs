use iced::Task;
use serde_json::Value;
use tracing::{error, info};

use crate::error::ClientError;
use crate::testing::results::{ResultsBundle, TestResults};

use super::results::ResultsPage;
use super::{Context, Outcome, results};

#[derive(Debug, Clone)]
pub enum Message {
    RunPressed,
    RunFinished(Result<Value, ClientError>),
    Report(results::Message),
}

/// Fallback entry point: one button, results rendered in place.
#[derive(Debug, Default)]
pub struct DashboardPage {
    pub running: bool,
    pub report: Option<ResultsPage>,
}

impl DashboardPage {
    pub fn update(&mut self, message: Message, ctx: &Context) -> Outcome<Message> {
        match message {
            Message::RunPressed => {
                if self.running {
                    return Outcome::None;
                }
                self.running = true;

                let client = ctx.client.clone();
                Outcome::Task(Task::perform(
                    async move { client.run_dashboard().await },
                    Message::RunFinished,
                ))
            }
            Message::RunFinished(result) => {
                self.running = false;
                match result {
                    Ok(payload) => {
                        info!("dashboard run finished");
                        let bundle = ResultsBundle {
                            results: Some(TestResults::from_value(&payload)),
                            generated_code: None,
                            service: None,
                        };
                        self.report = Some(ResultsPage::new(Some(bundle)));
                    }
                    // Not shown to the user; the previous report stays.
                    Err(err) => error!(error = %err, "dashboard run failed"),
                }
                Outcome::None
            }
            Message::Report(results::Message::BackPressed) => Outcome::None,
            Message::Report(message) => match &mut self.report {
                Some(report) => match report.update(message, ctx) {
                    Outcome::Task(task) => Outcome::Task(task.map(Message::Report)),
                    _ => Outcome::None,
                },
                None => Outcome::None,
            },
        }
    }
}
