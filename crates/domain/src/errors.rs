//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the mass schedule pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MessesError {
    /// Network failure, timeout or unexpected HTTP status while fetching.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The remote API reported a failure in its status array.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An expected field or tag is missing or malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A refresh cycle failed; wraps the error that aborted it.
    #[error("{message}")]
    UpdateFailed {
        message: String,
        #[source]
        cause: Box<MessesError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MessesError {
    /// Wrap a pipeline failure into the unified coordinator failure.
    pub fn update_failed(cause: MessesError) -> Self {
        Self::UpdateFailed {
            message: format!("Error fetching mass data: {cause}"),
            cause: Box::new(cause),
        }
    }

    /// The error that originally aborted a refresh cycle.
    ///
    /// Returns `self` for every variant other than `UpdateFailed`.
    pub fn root_cause(&self) -> &MessesError {
        match self {
            Self::UpdateFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Stable label suitable for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Parse(_) => "parse",
            Self::UpdateFailed { .. } => "update_failed",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for mass schedule operations
pub type Result<T> = std::result::Result<T, MessesError>;
