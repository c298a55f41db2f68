//! The in-memory inverted index.
//!
//! [`SearchIndex`] maintains three containers that must stay in sync:
//! the inverted mapping from term to posting bucket (document id →
//! term frequency), the forward mapping from document id to
//! [`DocumentEntry`], and the ordered set of live ids. A term is a key
//! of the inverted mapping exactly while at least one live document
//! contains it.
//!
//! The index supports many concurrent readers or one writer, never
//! both; it carries no internal locking.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{StopWordFilter, is_valid_word, split_words};
use crate::document::{DocumentId, DocumentStatus, average_rating};
use crate::error::{PilumError, Result};

/// Execution strategy for operations that offer a data-parallel variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Fan disjoint sub-tasks out across the rayon pool.
    Parallel,
}

/// Per-document data held in the forward map.
#[derive(Clone, Debug)]
pub(crate) struct DocumentEntry {
    pub(crate) rating: i32,
    pub(crate) status: DocumentStatus,
    pub(crate) word_frequencies: BTreeMap<String, f64>,
}

/// An in-memory TF-IDF search index.
///
/// Documents are inserted with a status and a list of user ratings,
/// queried with [`find_top_documents`](SearchIndex::find_top_documents)
/// and removed with [`remove_document`](SearchIndex::remove_document).
///
/// # Examples
///
/// ```
/// use pilum::document::DocumentStatus;
/// use pilum::index::SearchIndex;
///
/// let mut index = SearchIndex::with_stop_words_text("in the").unwrap();
/// index
///     .add_document(1, "white cat and fashion collar", DocumentStatus::Actual, &[8, -3])
///     .unwrap();
///
/// assert_eq!(index.document_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    pub(crate) stop_words: StopWordFilter,
    /// term → (document id → term frequency)
    pub(crate) term_index: BTreeMap<String, BTreeMap<DocumentId, f64>>,
    pub(crate) documents: BTreeMap<DocumentId, DocumentEntry>,
    pub(crate) document_ids: BTreeSet<DocumentId>,
}

static EMPTY_WORD_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

impl SearchIndex {
    /// Create an index with no stop words.
    pub fn new() -> Self {
        SearchIndex::default()
    }

    /// Create an index from a whitespace-separated stop-word string.
    pub fn with_stop_words_text(stop_words: &str) -> Result<Self> {
        Ok(SearchIndex {
            stop_words: StopWordFilter::from_text(stop_words)?,
            ..SearchIndex::default()
        })
    }

    /// Create an index from a collection of stop words.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(SearchIndex {
            stop_words: StopWordFilter::from_words(stop_words)?,
            ..SearchIndex::default()
        })
    }

    /// The stop-word filter this index was configured with.
    pub fn stop_words(&self) -> &StopWordFilter {
        &self.stop_words
    }

    /// Insert a document.
    ///
    /// Fails with [`PilumError::InvalidDocumentId`] for a negative id,
    /// [`PilumError::DuplicateDocumentId`] for a live id and
    /// [`PilumError::InvalidContent`] when the text contains a control
    /// character. Validation happens before any mutation, so a failed
    /// insert leaves the index unchanged.
    ///
    /// The rating stored for the document is the truncated integer mean
    /// of `ratings`; an empty slice averages to 0.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(PilumError::InvalidDocumentId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(PilumError::DuplicateDocumentId(document_id));
        }
        if !is_valid_word(text) {
            return Err(PilumError::content(format!(
                "document {document_id} contains a control character"
            )));
        }

        let words = self.split_into_words_no_stop(text);

        let inverse_word_count = 1.0 / words.len() as f64;

        let mut word_frequencies: BTreeMap<String, f64> = BTreeMap::new();
        for word in words {
            *self
                .term_index
                .entry(word.clone())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inverse_word_count;
            *word_frequencies.entry(word).or_insert(0.0) += inverse_word_count;
        }

        self.document_ids.insert(document_id);
        self.documents.insert(
            document_id,
            DocumentEntry {
                rating: average_rating(ratings),
                status,
                word_frequencies,
            },
        );

        Ok(())
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Iterate over live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Per-document term frequencies, or an empty map for an unknown id.
    ///
    /// The returned borrow is tied to the index and ends at the next
    /// mutation.
    pub fn word_frequencies(&self, document_id: DocumentId) -> &BTreeMap<String, f64> {
        match self.documents.get(&document_id) {
            Some(entry) => &entry.word_frequencies,
            None => &EMPTY_WORD_FREQUENCIES,
        }
    }

    /// Remove a document sequentially. No-op for an unknown id.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        self.remove_document_with_mode(document_id, ExecutionMode::Sequential);
    }

    /// Remove a document with an explicit execution mode.
    ///
    /// In [`ExecutionMode::Parallel`] the per-term posting buckets are
    /// detached from the inverted map and the id is erased from each
    /// bucket on the rayon pool; the buckets are disjoint, so no lock
    /// is needed. Compaction of emptied terms and the forward-map and
    /// live-set cleanup stay sequential.
    pub fn remove_document_with_mode(&mut self, document_id: DocumentId, mode: ExecutionMode) {
        let Some(entry) = self.documents.get(&document_id) else {
            return;
        };

        let words: Vec<String> = entry.word_frequencies.keys().cloned().collect();

        let mut buckets: Vec<BTreeMap<DocumentId, f64>> = words
            .iter()
            .map(|word| self.term_index.remove(word).unwrap_or_default())
            .collect();

        match mode {
            ExecutionMode::Parallel => {
                buckets.par_iter_mut().for_each(|bucket| {
                    bucket.remove(&document_id);
                });
            }
            ExecutionMode::Sequential => {
                for bucket in &mut buckets {
                    bucket.remove(&document_id);
                }
            }
        }

        for (word, bucket) in words.into_iter().zip(buckets) {
            if !bucket.is_empty() {
                self.term_index.insert(word, bucket);
            }
        }

        self.documents.remove(&document_id);
        self.document_ids.remove(&document_id);
    }

    /// Tokenize text and drop stop words, keeping duplicates and order.
    fn split_into_words_no_stop(&self, text: &str) -> Vec<String> {
        split_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.is_stop_word(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(stop_words: &str) -> SearchIndex {
        SearchIndex::with_stop_words_text(stop_words).unwrap()
    }

    #[test]
    fn test_add_document_accumulates_frequencies() {
        let mut index = index_with("");
        index
            .add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();

        let frequencies = index.word_frequencies(2);
        assert_eq!(frequencies.len(), 3);
        assert!((frequencies["fluffy"] - 0.5).abs() < 1e-9);
        assert!((frequencies["cat"] - 0.25).abs() < 1e-9);
        assert!((frequencies["tail"] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_add_document_drops_stop_words() {
        let mut index = index_with("and the");
        index
            .add_document(1, "the cat and dog", DocumentStatus::Actual, &[1])
            .unwrap();

        let frequencies = index.word_frequencies(1);
        assert_eq!(frequencies.len(), 2);
        assert!((frequencies["cat"] - 0.5).abs() < 1e-9);
        assert!(!frequencies.contains_key("the"));
    }

    #[test]
    fn test_add_document_all_stop_words() {
        let mut index = index_with("in the");
        index
            .add_document(9, "in the", DocumentStatus::Actual, &[1])
            .unwrap();

        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(9).is_empty());
    }

    #[test]
    fn test_add_document_rejects_negative_id() {
        let mut index = index_with("");
        let result = index.add_document(-1, "cat", DocumentStatus::Actual, &[1]);
        assert!(matches!(result, Err(PilumError::InvalidDocumentId(-1))));
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn test_add_document_rejects_duplicate_id() {
        let mut index = index_with("");
        index.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        let result = index.add_document(1, "dog", DocumentStatus::Actual, &[1]);
        assert!(matches!(result, Err(PilumError::DuplicateDocumentId(1))));

        // The failed insert changed nothing.
        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(1).contains_key("cat"));
    }

    #[test]
    fn test_add_document_rejects_control_characters() {
        let mut index = index_with("");
        let result = index.add_document(1, "white\u{3}cat", DocumentStatus::Actual, &[1]);
        assert!(matches!(result, Err(PilumError::InvalidContent(_))));
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn test_removed_id_may_be_reinserted() {
        let mut index = index_with("");
        index.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        index.remove_document(1);
        index.add_document(1, "dog", DocumentStatus::Actual, &[2]).unwrap();

        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(1).contains_key("dog"));
    }

    #[test]
    fn test_word_frequencies_unknown_id_is_empty() {
        let index = index_with("");
        assert!(index.word_frequencies(42).is_empty());
    }

    #[test]
    fn test_document_ids_ascending() {
        let mut index = index_with("");
        for id in [5, 1, 3] {
            index.add_document(id, "cat", DocumentStatus::Actual, &[1]).unwrap();
        }

        let ids: Vec<_> = index.document_ids().collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_remove_document_compacts_terms() {
        let mut index = index_with("");
        index.add_document(1, "a b c", DocumentStatus::Actual, &[1]).unwrap();
        index.add_document(2, "b c d", DocumentStatus::Actual, &[1]).unwrap();
        index.remove_document(2);

        assert_eq!(index.document_count(), 1);
        // "d" only lived in document 2, so its term key is gone.
        assert!(!index.term_index.contains_key("d"));
        assert_eq!(index.term_index["b"].len(), 1);
        assert!(index.term_index["b"].contains_key(&1));
    }

    #[test]
    fn test_remove_document_unknown_id_is_noop() {
        let mut index = index_with("");
        index.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        index.remove_document(7);
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn test_remove_document_parallel_matches_sequential() {
        let build = || {
            let mut index = index_with("");
            index.add_document(1, "a b c", DocumentStatus::Actual, &[1]).unwrap();
            index.add_document(2, "b c d", DocumentStatus::Actual, &[1]).unwrap();
            index.add_document(3, "c d e", DocumentStatus::Actual, &[1]).unwrap();
            index
        };

        let mut sequential = build();
        sequential.remove_document_with_mode(2, ExecutionMode::Sequential);

        let mut parallel = build();
        parallel.remove_document_with_mode(2, ExecutionMode::Parallel);

        assert_eq!(
            sequential.document_ids().collect::<Vec<_>>(),
            parallel.document_ids().collect::<Vec<_>>()
        );
        assert_eq!(
            sequential.term_index.keys().collect::<Vec<_>>(),
            parallel.term_index.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_inverted_and_forward_maps_agree() {
        let mut index = index_with("the");
        index.add_document(1, "the white cat", DocumentStatus::Actual, &[1]).unwrap();
        index.add_document(2, "white dog", DocumentStatus::Banned, &[2]).unwrap();
        index.remove_document(1);

        for id in index.document_ids() {
            for (word, _) in index.word_frequencies(id) {
                assert!(index.term_index[word].contains_key(&id));
            }
        }
        for (word, bucket) in &index.term_index {
            assert!(!bucket.is_empty(), "term {word:?} has an empty bucket");
            for id in bucket.keys() {
                assert!(index.word_frequencies(*id).contains_key(word));
            }
        }
    }
}
