use beesight_types::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("session expired or not signed in")]
    Unauthorized,

    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
        errors: Option<ValidationErrors>,
    },

    #[error("backend rejected the request: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        message: Option<String>,
        errors: Option<ValidationErrors>,
    },

    #[error("response carried no data")]
    MissingData,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ClientError {
    /// The string a screen should show: the backend's own message when it
    /// sent one, otherwise `fallback` with a short cause.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Status {
                message: Some(m), ..
            }
            | ClientError::Rejected {
                message: Some(m), ..
            } if !m.is_empty() => m.clone(),
            ClientError::Status { status, .. } => format!("{fallback} (status: {status})"),
            ClientError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            ClientError::Request(_) => format!("{fallback}: the backend is unreachable"),
            _ => fallback.to_string(),
        }
    }

    /// Field-level validation errors reported by the backend, if any.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Status { errors, .. } | ClientError::Rejected { errors, .. } => {
                errors.as_ref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
