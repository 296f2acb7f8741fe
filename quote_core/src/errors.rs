//! # Error Types
//!
//! Structured error types for quote_core. The pricing engine itself never
//! fails: degenerate input degrades to zero-valued output. Errors only come
//! from the seams around it (reading JSON files, decoding archived records).
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::QuoteError;
//!
//! let err = QuoteError::file_error("open", "prices.json", "No such file or directory");
//! assert_eq!(err.error_code(), "FILE_ERROR");
//! assert!(err.to_string().contains("prices.json"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type CoreResult<T> = Result<T, QuoteError>;

/// Structured error type for the collaborator seams of the engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Archived record schema version mismatch
    #[error("Version mismatch: record version {record_version}, expected {expected_version}")]
    VersionMismatch {
        record_version: String,
        expected_version: String,
    },
}

impl QuoteError {
    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        QuoteError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::serialization(err)
    }
}
