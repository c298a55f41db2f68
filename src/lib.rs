//! # Pilum
//!
//! An in-memory TF-IDF text search index.
//!
//! ## Features
//!
//! - Pure Rust, fully in-memory inverted index
//! - Plus/minus query terms with stop-word filtering
//! - TF-IDF ranking with a rating tie-break, top-5 truncation
//! - Per-document matching with minus-term veto
//! - Sequential and data-parallel document removal
//! - Parallel batch query execution on a rayon pool
//!
//! ## Example
//!
//! ```
//! use pilum::document::DocumentStatus;
//! use pilum::index::SearchIndex;
//!
//! let mut index = SearchIndex::with_stop_words_text("and with").unwrap();
//! index
//!     .add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[1, 2])
//!     .unwrap();
//! index
//!     .add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2])
//!     .unwrap();
//!
//! let hits = index.find_top_documents("curly and funny").unwrap();
//! assert_eq!(hits.first().map(|hit| hit.doc_id), Some(2));
//! ```

pub mod analysis;
pub mod document;
pub mod error;
pub mod index;
pub mod parallel;
pub mod query;
pub mod search;

pub use document::{DocumentId, DocumentStatus, SearchHit};
pub use error::{PilumError, Result};
pub use index::{ExecutionMode, SearchIndex};
pub use parallel::{process_queries, process_queries_joined};
pub use search::{MAX_RESULTS, RELEVANCE_EPSILON};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
