//! Error types for Urdu Notebook
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.
//!
//! Store I/O has its own pair of error enums, [`LoadError`] and
//! [`SaveError`], so callers that care can tell a missing chat file apart
//! from a corrupt one or from a failing disk. The fail-soft entry points on
//! [`crate::storage::ChatStore`] collapse all of them into an empty store or a
//! `false` return.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Urdu Notebook operations
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A message, text or question was blank after trimming
    #[error("Input cannot be empty: {0}")]
    EmptyInput(String),

    /// The requested chat id is not in the store
    #[error("Unknown chat session: {0}")]
    UnknownSession(String),

    /// Chat store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Line editor errors from the interactive chat
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Why the chat document could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    /// No chat file exists yet
    #[error("chat store {} does not exist", path.display())]
    Absent {
        /// Location that was probed
        path: PathBuf,
    },

    /// The file exists but is not a valid chat document
    #[error("chat store {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Location of the unreadable document
        path: PathBuf,
        /// Parser failure
        #[source]
        source: serde_json::Error,
    },

    /// The file exists but could not be read
    #[error("failed to read chat store {}: {source}", path.display())]
    Io {
        /// Location of the file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Returns true when the store simply has not been written yet
    pub fn is_absent(&self) -> bool {
        matches!(self, LoadError::Absent { .. })
    }
}

/// Why the chat document could not be written
#[derive(Error, Debug)]
pub enum SaveError {
    /// Creating the directory or temporary file, or writing to it, failed
    #[error("failed to write chat store {}: {source}", path.display())]
    Io {
        /// Target location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("failed to serialize chat store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The finished temporary file could not replace the target
    #[error("failed to replace chat store {}: {source}", path.display())]
    Persist {
        /// Target location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Urdu Notebook operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
