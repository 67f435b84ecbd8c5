//! Error types for the demo reset workflow.
//!
//! `StoreError` describes a single failed request against the remote store and is
//! always absorbed by the inventory or executor. `ResetError` is reserved for
//! conditions that end the run.

use serde::Serialize;
use thiserror::Error;

/// Failure of one request against the remote store
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StoreError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("HTTP error: {0}")]
    Transport(String),
}

/// Errors that abort the run
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read confirmation: {0}")]
    PromptError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<config::ConfigError> for ResetError {
    fn from(err: config::ConfigError) -> Self {
        ResetError::ConfigError(err.to_string())
    }
}
