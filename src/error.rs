/// Error types shared by the web handlers and the CLI
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while serving the control panel
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup configuration is missing or malformed (e.g. the credential file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A host script could not be started, exited non-zero, or produced
    /// output that does not follow its contract
    #[error("External command {command} failed: {reason}")]
    ExternalCommand {
        command: String,
        reason: String,
    },

    /// Page rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn external(command: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::ExternalCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// Any failure that reaches a handler is a server fault; details stay in the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
