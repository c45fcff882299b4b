//! Unified error types for the kodictl workspace.
//!
//! Startup-time failures (unreadable or malformed configuration) are the
//! only errors that may abort the process; the RPC crate defines its own
//! error enum for per-call failures that are absorbed inside the session.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum KodictlError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The configuration file could not be parsed.
    #[error("configuration parse error: {source}")]
    Parse {
        /// Underlying TOML error.
        #[from]
        source: toml::de::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, KodictlError>;
