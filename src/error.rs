//! Error types for the Pilum library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`PilumError`] enum. Each variant corresponds to a caller-visible
//! violation; the index never raises an error after it has started
//! mutating state, so a failed operation leaves the index unchanged.
//!
//! # Examples
//!
//! ```
//! use pilum::error::{PilumError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PilumError::query("minus word is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::document::DocumentId;

/// The main error type for Pilum operations.
#[derive(Error, Debug)]
pub enum PilumError {
    /// A stop word supplied at construction contains a control character.
    #[error("invalid stop word: {0:?}")]
    InvalidStopWord(String),

    /// A document was inserted with a negative id.
    #[error("invalid document id: {0}")]
    InvalidDocumentId(DocumentId),

    /// A document was inserted with an id that is already live.
    #[error("duplicate document id: {0}")]
    DuplicateDocumentId(DocumentId),

    /// A match was requested for an id that is not in the index.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Document text contains a control character.
    #[error("invalid document content: {0}")]
    InvalidContent(String),

    /// Query text fails the lexical rules (empty term, double minus,
    /// control character).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Internal error (thread pool construction and similar).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with [`PilumError`].
pub type Result<T> = std::result::Result<T, PilumError>;

impl PilumError {
    /// Create a new invalid-query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidQuery(msg.into())
    }

    /// Create a new invalid-content error.
    pub fn content<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidContent(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        PilumError::Internal(msg.into())
    }
}
