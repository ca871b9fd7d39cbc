//! Error types for trigger queue operations.

use crate::client::ApiResponse;

/// Result type for trigger queue operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Error type for trigger queue operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API call failed with status '{status}' and message '{message}'")]
    RemoteApi { status: String, message: String },

    #[error(
        "submission stopped after {} successful triggers: API call failed with status '{status}' and message '{message}'",
        .completed.len()
    )]
    PartialSubmit {
        status: String,
        message: String,
        /// Per-call responses gathered before the failing entry.
        completed: Vec<ApiResponse>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Build a `RemoteApi` error from a non-success response envelope.
    pub fn from_response(response: &ApiResponse) -> Self {
        ApiError::RemoteApi {
            status: response.status.clone(),
            message: response.message.clone().unwrap_or_default(),
        }
    }
}
