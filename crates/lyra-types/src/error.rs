//! Error types for the lyra router.
//!
//! [`LyraError`] is non-exhaustive so new failure modes can be added
//! without breaking downstream matches. None of these errors ever reach the
//! hook caller: the binary degrades every failure to "no route".

use thiserror::Error;

/// Top-level error type for the lyra crates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LyraError {
    /// Configuration is semantically invalid (duplicate ids, zero weights,
    /// dangling redirect targets, ...).
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("failed to parse config {path}: {reason}")]
    ConfigParse {
        /// Path of the offending file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// A signal pattern failed to compile.
    #[error("invalid pattern in category '{category}': {reason}")]
    InvalidPattern {
        /// Category that owns the pattern.
        category: String,
        /// Compiler message.
        reason: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the lyra crates.
pub type Result<T> = std::result::Result<T, LyraError>;
