//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid host id '{0}': expected an integer cloudserver id")]
    InvalidHostId(String),

    #[error("Invalid cloudserver record: {0}")]
    InvalidRecord(String),

    #[error("Cache is empty and --force-cache was specified")]
    CacheEmpty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
