//! Error types for the Yari library.
//!
//! This module provides error handling for all Yari operations.
//! All errors are represented by the [`YariError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use yari::error::{Result, YariError};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(YariError::codec("postings blob truncated"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Yari operations.
///
/// This enum represents all possible errors that can occur in the Yari library.
/// It uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for creating specific error types.
#[derive(Error, Debug)]
pub enum YariError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, separator handling)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors (posting accumulation, merging)
    #[error("Index error: {0}")]
    Index(String),

    /// Codec errors (corrupt or truncated posting blobs)
    #[error("Codec error: {0}")]
    Codec(String),

    /// Token store errors (token-id assignment failures)
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// Postings store errors (blob fetch/store failures)
    #[error("Postings store error: {0}")]
    PostingsStore(String),

    /// Resource exhausted
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with YariError.
pub type Result<T> = std::result::Result<T, YariError>;

impl YariError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        YariError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        YariError::Index(msg.into())
    }

    /// Create a new codec error.
    pub fn codec<S: Into<String>>(msg: S) -> Self {
        YariError::Codec(msg.into())
    }

    /// Create a new token store error.
    pub fn token_store<S: Into<String>>(msg: S) -> Self {
        YariError::TokenStore(msg.into())
    }

    /// Create a new postings store error.
    pub fn postings_store<S: Into<String>>(msg: S) -> Self {
        YariError::PostingsStore(msg.into())
    }

    /// Create a new resource exhausted error.
    pub fn resource_exhausted<S: Into<String>>(msg: S) -> Self {
        YariError::ResourceExhausted(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        YariError::Other(msg.into())
    }
}
