//! Error types for the Spyglass library.
//!
//! All fallible engine operations return [`Result`], whose error side is the
//! [`SpyglassError`] enum. Validation always happens before the index is
//! touched, so an error never leaves the engine half-updated.
//!
//! # Examples
//!
//! ```
//! use spyglass::error::{Result, SpyglassError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpyglassError::invalid_query_word("--cat"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::DocumentId;

/// The main error type for Spyglass operations.
///
/// Uses `thiserror` for the `Error` implementation and provides constructor
/// helpers for the string-carrying variants.
#[derive(Error, Debug)]
pub enum SpyglassError {
    /// Negative document id, or an id that is already indexed.
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(DocumentId),

    /// A document or stop word token contains a control character.
    #[error("Word {0:?} is invalid")]
    InvalidWord(String),

    /// A malformed query token (empty, lone `-`, `--` prefix, control characters).
    #[error("Query word {0:?} is invalid")]
    InvalidQueryWord(String),

    /// The operation requires a document that is not indexed.
    #[error("Unknown document id: {0}")]
    UnknownDocumentId(DocumentId),

    /// The worker pool for parallel evaluation could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O errors (document files read by the CLI)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpyglassError.
pub type Result<T> = std::result::Result<T, SpyglassError>;

impl SpyglassError {
    /// Create a new invalid word error.
    pub fn invalid_word<S: Into<String>>(word: S) -> Self {
        SpyglassError::InvalidWord(word.into())
    }

    /// Create a new invalid query word error.
    pub fn invalid_query_word<S: Into<String>>(word: S) -> Self {
        SpyglassError::InvalidQueryWord(word.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        SpyglassError::ThreadPool(msg.into())
    }
}
