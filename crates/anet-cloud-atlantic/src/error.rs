//! Atlantic.Net provider error types

use anet_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlanticError {
    #[error("Atlantic.Net authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Atlantic.Net API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Unexpected response to {action}: {detail}")]
    UnexpectedResponse { action: String, detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AtlanticError>;

impl From<AtlanticError> for CloudError {
    fn from(err: AtlanticError) -> Self {
        match err {
            AtlanticError::AuthenticationFailed(msg) => CloudError::AuthenticationFailed(msg),
            AtlanticError::JsonError(e) => CloudError::Json(e),
            other => CloudError::ApiError(other.to_string()),
        }
    }
}
