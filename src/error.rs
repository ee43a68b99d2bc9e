use std::path::PathBuf;

/// Failure of a call against the test backend (or the service under test).
///
/// Carries only rendered text so it can travel inside iced messages, which
/// must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("{0}")]
    Transport(String),

    /// The backend answered and reported an `error` or `detail` message.
    #[error("{0}")]
    Backend(String),

    /// The backend answered but a field we rely on is missing.
    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create directory `{}`: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid backend URL `{url}`: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("Unknown route `{0}` (expected one of /, /dashboard, /registered-apis, /results)")]
    UnknownRoute(String),
}
