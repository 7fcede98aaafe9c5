//! Error types for chat_htm.
//!
//! This module provides a unified error type for every fallible operation in
//! the crate, using the `thiserror` crate for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for chat_htm operations.
///
/// Construction-time failures (encoders, cursors, runtime wiring) are reported
/// here and never leave a half-built value behind.
#[derive(Error, Debug)]
pub enum ChatHtmError {
    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input size does not match expected size
    #[error("Invalid input size: expected {expected}, got {actual}")]
    InvalidInputSize {
        /// Expected size
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Corpus file could not be opened or read
    #[error("Cannot read corpus file {}: {source}", path.display())]
    CorpusUnreadable {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Corpus contained no symbols after loading/tokenizing
    #[error("Corpus is empty: {origin}")]
    EmptyCorpus {
        /// File path, or `<memory>` for in-memory text
        origin: String,
    },

    /// Configuration document could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for chat_htm operations.
pub type Result<T> = std::result::Result<T, ChatHtmError>;
