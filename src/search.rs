//! Ranked retrieval and per-document matching.
//!
//! Relevance is TF-IDF: for every query plus word present in the index,
//! each posting contributes `tf * ln(document_count / posting_len)` to
//! its document. Minus words veto whole documents. Results are sorted
//! by descending relevance with a rating tie-break and truncated to
//! [`MAX_RESULTS`].

use std::collections::BTreeMap;

use crate::document::{DocumentId, DocumentStatus, SearchHit};
use crate::error::{PilumError, Result};
use crate::index::{ExecutionMode, SearchIndex};
use crate::query::Query;

/// Maximum number of hits returned by a single query.
pub const MAX_RESULTS: usize = 5;

/// Two relevance values closer than this are considered equal and fall
/// back to the rating tie-break.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

impl SearchIndex {
    /// Rank documents for a query, keeping only [`DocumentStatus::Actual`] ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use pilum::document::DocumentStatus;
    /// use pilum::index::SearchIndex;
    ///
    /// let mut index = SearchIndex::with_stop_words_text("in the").unwrap();
    /// index
    ///     .add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
    ///     .unwrap();
    ///
    /// let hits = index.find_top_documents("fluffy cat").unwrap();
    /// assert_eq!(hits[0].doc_id, 2);
    /// ```
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Rank documents for a query, keeping only those with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        desired_status: DocumentStatus,
    ) -> Result<Vec<SearchHit>> {
        self.find_top_documents_with(raw_query, |_, status, _| status == desired_status)
    }

    /// Rank documents for a query, filtered by an arbitrary predicate
    /// over `(document id, status, rating)`.
    ///
    /// An empty outcome — no plus word is indexed, or every candidate
    /// is vetoed or filtered — is `Ok` with an empty vector, not an
    /// error.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;

        let mut hits: Vec<SearchHit> = self
            .find_all_documents(&query)
            .into_iter()
            .filter(|hit| {
                let entry = &self.documents[&hit.doc_id];
                predicate(hit.doc_id, entry.status, entry.rating)
            })
            .collect();

        hits.sort_by(|left, right| {
            if (left.relevance - right.relevance).abs() < RELEVANCE_EPSILON {
                right.rating.cmp(&left.rating)
            } else {
                right.relevance.total_cmp(&left.relevance)
            }
        });
        hits.truncate(MAX_RESULTS);

        Ok(hits)
    }

    /// Report which query plus words a single document contains.
    ///
    /// Returns the matched words (ascending, deduplicated) and the
    /// document's status. Any minus word present in the document clears
    /// the matched words. Fails with [`PilumError::DocumentNotFound`]
    /// for an id that is not live; iterate
    /// [`document_ids`](SearchIndex::document_ids) to obtain valid ids.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with_mode(raw_query, document_id, ExecutionMode::Sequential)
    }

    /// [`match_document`](SearchIndex::match_document) with an explicit
    /// execution mode. Both modes run the same single-threaded body;
    /// the parameter mirrors
    /// [`remove_document_with_mode`](SearchIndex::remove_document_with_mode).
    pub fn match_document_with_mode(
        &self,
        raw_query: &str,
        document_id: DocumentId,
        _mode: ExecutionMode,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;

        let entry = self
            .documents
            .get(&document_id)
            .ok_or(PilumError::DocumentNotFound(document_id))?;

        let mut matched_words = Vec::new();
        for word in &query.plus_words {
            if let Some(bucket) = self.term_index.get(word)
                && bucket.contains_key(&document_id)
            {
                matched_words.push(word.clone());
            }
        }

        for word in &query.minus_words {
            if let Some(bucket) = self.term_index.get(word)
                && bucket.contains_key(&document_id)
            {
                matched_words.clear();
                break;
            }
        }

        Ok((matched_words, entry.status))
    }

    /// Accumulate TF-IDF relevance for every non-vetoed candidate.
    fn find_all_documents(&self, query: &Query) -> Vec<SearchHit> {
        let mut relevance_by_id: BTreeMap<DocumentId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let Some(bucket) = self.term_index.get(word) else {
                continue;
            };

            let idf = self.inverse_document_frequency(bucket.len());
            for (&document_id, &term_frequency) in bucket {
                *relevance_by_id.entry(document_id).or_insert(0.0) += term_frequency * idf;
            }
        }

        for word in &query.minus_words {
            let Some(bucket) = self.term_index.get(word) else {
                continue;
            };

            for document_id in bucket.keys() {
                relevance_by_id.remove(document_id);
            }
        }

        relevance_by_id
            .into_iter()
            .map(|(document_id, relevance)| {
                SearchHit::new(document_id, relevance, self.documents[&document_id].rating)
            })
            .collect()
    }

    /// `ln(live documents / documents containing the word)`.
    ///
    /// Only called for words present in the index, so `containing > 0`.
    fn inverse_document_frequency(&self, containing: usize) -> f64 {
        (self.document_count() as f64 / containing as f64).ln()
    }
}
