//! Error types for the emulator core.

use crate::logbook::LogChannel;
use std::path::PathBuf;
use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("IMSI must not be empty")]
    InvalidIdentity,

    #[error("IMSI not found in database: {0}")]
    IdentityNotFound(String),

    #[error("Authentication failed for IMSI {0}")]
    AuthenticationFailed(String),

    #[error("Register a SIM first")]
    NotRegistered,

    #[error("{0} is not registered")]
    CalleeUnregistered(String),

    #[error("Log error: {0}")]
    LogWrite(#[from] LogError),

    #[error("Subscriber directory error: {0}")]
    Directory(String),
}

/// Failure to write to or read from a log file.
///
/// Log failures never change the outcome of a registration, call or SMS;
/// they travel next to the result as warnings.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Error writing to {channel} log {path:?}: {source}")]
    Write {
        channel: LogChannel,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading {channel} log {path:?}: {source}")]
    Read {
        channel: LogChannel,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Directory(format!("JSON parse error: {}", e))
    }
}

/// Result type alias for core operations.
pub type SimResult<T> = Result<T, SimError>;
