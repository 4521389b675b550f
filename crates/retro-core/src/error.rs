//! Error types for retrospect.
//!
//! Every synthesis failure mode is terminal for that attempt: nothing is
//! silently recovered, and each variant carries enough detail (the violated
//! rule plus the offending fragment) to diagnose without re-calling the
//! text-generation service.

use thiserror::Error;

/// Result type alias using retrospect's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for retrospect operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No journal entries exist for the requested week; synthesis never attempted.
    #[error("No entries for week: {0}")]
    NoEntries(String),

    /// The external generation call failed or timed out.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response is not extractable/parseable JSON or lacks required keys.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Shape/limits validation rejected the parsed response.
    #[error("Shape error: {0}")]
    Shape(String),

    /// Window/links validation rejected the parsed response.
    #[error("Window error: {0}")]
    Window(String),

    /// Actionability validation rejected the parsed response.
    #[error("Actionability error: {0}")]
    Actionability(String),

    /// Entry not found
    #[error("Entry not found: {0}")]
    EntryNotFound(uuid::Uuid),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
