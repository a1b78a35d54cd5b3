//! Error type definitions.
//!
//! Only orchestration failures are errors. Anything that goes wrong while
//! probing a domain is a status, not an error.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for loading the domain list.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The domain list file could not be read.
    #[error("Failed to read domain list {}: {source}", path.display())]
    Read {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read domain list from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}
