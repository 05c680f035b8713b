//! Failure taxonomy for a single weather fetch.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// No usable HTTP response was obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed")]
    Request(#[source] BoxError),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider responded with status {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// A response body was obtained but is not a usable weather payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed weather response")]
    Json(#[from] serde_json::Error),

    #[error("weather response contained no conditions")]
    EmptyConditions,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(TransportError::Request(_)) => {
                "Network error. Check your connection.".to_string()
            }
            Self::Transport(TransportError::Timeout(after)) => {
                format!("The weather service did not answer within {}s.", after.as_secs())
            }
            Self::Transport(TransportError::Status { status, message }) => {
                if status.as_u16() == 401 {
                    "The API key was rejected. Run `clima configure` to update it.".to_string()
                } else if status.as_u16() == 404 {
                    "Location not found.".to_string()
                } else {
                    format!("Weather service error ({}): {}", status.as_u16(), message)
                }
            }
            Self::Decode(_) => "Received an unreadable weather report.".to_string(),
        }
    }
}
