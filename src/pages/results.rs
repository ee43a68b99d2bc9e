use std::path::Path;

use tracing::{info, warn};

use crate::storage;
use crate::testing::download_file_name;
use crate::testing::results::ResultsBundle;

use super::{Context, Notice, Outcome};

#[derive(Debug, Clone)]
pub enum Message {
    BackPressed,
    DownloadPressed,
}

/// Results handed over by the previous page. `None` after a direct visit.
#[derive(Debug, Default)]
pub struct ResultsPage {
    pub bundle: Option<ResultsBundle>,
    pub notice: Option<Notice>,
}

impl ResultsPage {
    pub fn new(bundle: Option<ResultsBundle>) -> Self {
        Self { bundle, notice: None }
    }

    pub fn has_results(&self) -> bool {
        self.bundle.as_ref().is_some_and(|bundle| bundle.results.is_some())
    }

    pub fn update(&mut self, message: Message, ctx: &Context) -> Outcome<Message> {
        match message {
            Message::BackPressed => Outcome::Back,
            Message::DownloadPressed => {
                if let Some(bundle) = &self.bundle {
                    if let Some(notice) = download(bundle, &ctx.downloads_dir) {
                        self.notice = Some(notice);
                    }
                }
                Outcome::None
            }
        }
    }
}

/// Saves the generated code of `bundle`; `None` when there is nothing to save.
pub fn download(bundle: &ResultsBundle, dir: &Path) -> Option<Notice> {
    let code = bundle.generated_code.as_deref().filter(|code| !code.is_empty())?;
    let style = bundle
        .service
        .as_ref()
        .map(|service| service.test_style.as_str())
        .unwrap_or_default();
    let file_name = download_file_name(style);

    Some(match storage::save_generated_code(dir, file_name, code) {
        Ok(path) => {
            info!(path = %path.display(), "generated code saved");
            Notice::success(format!("Saved {file_name} to {}", path.display()))
        }
        Err(err) => {
            warn!(error = %err, "saving generated code failed");
            Notice::error(err.to_string())
        }
    })
}
