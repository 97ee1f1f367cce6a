//! Error types for leafprobe

use std::time::Duration;
use thiserror::Error;

/// Result type alias for leafprobe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in leafprobe operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error at {path}: {reason}")]
    Store { path: String, reason: String },

    #[error("Decode error at {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Leaf not found: {0}")]
    NotFound(String),

    #[error("Fetch of {path} timed out after {timeout:?}")]
    Timeout { path: String, timeout: Duration },
}
