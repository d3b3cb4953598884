//! Error types for emuconsole
//!
//! Provides a unified error type for all client operations.
//!
//! A `KO:` reply from the console is not an error. It is a normal
//! [`Outcome::Failure`](crate::protocol::Outcome::Failure) carried by the
//! returned [`Response`](crate::protocol::Response).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::session::{Endpoint, SessionState};

/// Result type alias using ConsoleError
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Unified error type for emuconsole operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: std::io::Error,
    },

    #[error("Session is not connected (state: {state})")]
    NotConnected { state: SessionState },

    #[error("Connection closed by console before response completed")]
    ConnectionClosed,

    #[error("Timed out after {0:?} waiting for response")]
    Timeout(Duration),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Cannot encode token {token:?}: byte {byte:#04x} is not allowed on the wire")]
    Encoding { token: String, byte: u32 },

    #[error("Cannot decode console output: {0}")]
    Decoding(#[from] std::string::FromUtf8Error),

    // -------------------------------------------------------------------------
    // Command Facade Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command arguments: {0}")]
    InvalidArguments(String),

    #[error("Cannot read auth token from {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
