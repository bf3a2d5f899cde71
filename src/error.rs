//! Error types for Casebench
//!
//! This module defines all error types used throughout the workbench,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Casebench operations
///
/// Store and workbench operations fail fast with one of these variants
/// instead of silently ignoring a bad request. Every variant is recoverable
/// at the caller boundary.
#[derive(Error, Debug)]
pub enum CasebenchError {
    /// A referenced task, version or test case does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of entity was looked up ("task", "version", ...)
        kind: &'static str,
        /// The id that failed to resolve
        id: String,
    },

    /// Input rejected before any state was touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login rejected by the authenticator
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Export could not be written
    #[error("Export error: {0}")]
    Export(String),

    /// A simulated operation was cancelled before it completed
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CasebenchError {
    /// Build a `NotFound` error for the given entity kind and id
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true for `NotFound` errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for `Validation` errors
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for application-level operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Result type alias for store and workbench operations
///
/// Keeps the concrete error so callers can match on the failure kind.
pub type StoreResult<T> = std::result::Result<T, CasebenchError>;
