//! Error types for the replay engine
//!
//! The error taxonomy keeps "service cannot answer" distinct from "valid
//! query, nothing matched": empty results and inactive trips are normal
//! result values in [`crate::replay::query`], never errors. Only genuine
//! preconditions (no dataset loaded, bad configuration, bad inputs) appear
//! here.

use crate::store::StoreError;
use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;

/// Errors that can occur while serving replay queries
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The trip store has not been loaded yet
    ///
    /// A precondition failure, distinct from an empty query result: callers
    /// must not conflate "service unavailable" with "no active trips".
    #[error("Trip store not loaded")]
    StoreNotLoaded,

    /// Dataset loading failed
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),

    /// A caller-supplied timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for ReplayError {
    fn from(error: anyhow::Error) -> Self {
        ReplayError::InvalidTimestamp(error.to_string())
    }
}

impl ReplayError {
    /// Create an invalid-timestamp error
    pub fn invalid_timestamp(msg: impl Into<String>) -> Self {
        Self::InvalidTimestamp(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ReplayError::StoreNotLoaded => "Store",
            ReplayError::StoreError(_) => "Store",
            ReplayError::ConfigurationError(_) => "Configuration",
            ReplayError::ValidationError(_) => "Configuration",
            ReplayError::InvalidTimestamp(_) => "Input",
            ReplayError::IoError(_) => "IO",
            ReplayError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;
