use reqwest::StatusCode;
use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    /// Short text suitable for the status bar or the error panel.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status { status, .. } => format!(
                "The server responded with {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("error")
            ),
            AppError::Reqwest(err) if err.is_timeout() => "The request timed out".to_string(),
            AppError::Reqwest(err) if err.is_connect() => {
                "Could not connect to the transaction service".to_string()
            }
            AppError::Reqwest(err) if err.is_decode() => {
                "The server returned an unexpected response".to_string()
            }
            other => other.to_string(),
        }
    }
}
