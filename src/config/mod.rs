use std::path::PathBuf;

use clap::Parser;

use crate::Route;
use crate::error::ConfigError;
use crate::storage;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILTER: &str = "fastapi_tester=info";

/// Desktop client for generating and running tests against FastAPI services.
#[derive(Parser, Debug, Clone)]
#[command(name = "fastapi-tester", version)]
pub struct CliArgs {
    /// Base URL of the test backend
    #[arg(long = "backend-url", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Page to open on launch (/, /dashboard, /registered-apis, /results)
    #[arg(long = "route", default_value = "/")]
    pub route: String,

    /// Where downloaded test code is written (defaults to the Downloads folder)
    #[arg(long = "download-dir")]
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub initial_route: Route,
    pub downloads_dir: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let backend_url = args.backend_url.trim().trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&backend_url).map_err(|e| ConfigError::InvalidBackendUrl {
            url: args.backend_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBackendUrl {
                url: args.backend_url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        let initial_route =
            Route::from_path(&args.route).ok_or_else(|| ConfigError::UnknownRoute(args.route.clone()))?;

        Ok(Self {
            backend_url,
            initial_route,
            downloads_dir: args.download_dir.unwrap_or_else(storage::default_downloads_dir),
        })
    }
}
