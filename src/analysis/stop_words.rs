//! Stop-word filtering.
//!
//! Stop words are noise terms excluded from both indexing and queries.
//! The filter is configured once at index construction and validates
//! every supplied word.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::StopWordFilter;
//!
//! let filter = StopWordFilter::from_text("in the").unwrap();
//! assert!(filter.is_stop_word("the"));
//! assert!(!filter.is_stop_word("cat"));
//! ```

use std::collections::BTreeSet;

use crate::analysis::{is_valid_word, split_words_view};
use crate::error::{PilumError, Result};

/// A validated set of stop words.
///
/// Construction fails with [`PilumError::InvalidStopWord`] when any
/// supplied word contains a control character.
#[derive(Clone, Debug, Default)]
pub struct StopWordFilter {
    stop_words: BTreeSet<String>,
}

impl StopWordFilter {
    /// Create an empty filter: no word is treated as a stop word.
    pub fn new() -> Self {
        StopWordFilter::default()
    }

    /// Create a filter from a whitespace-separated string of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use pilum::analysis::StopWordFilter;
    ///
    /// let filter = StopWordFilter::from_text("and with").unwrap();
    /// assert_eq!(filter.len(), 2);
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_words_view(text))
    }

    /// Create a filter from a collection of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use pilum::analysis::StopWordFilter;
    ///
    /// let filter = StopWordFilter::from_words(vec!["in", "the"]).unwrap();
    /// assert!(filter.is_stop_word("in"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stop_words = BTreeSet::new();

        for word in words {
            let word = word.into();
            if !is_valid_word(&word) {
                return Err(PilumError::InvalidStopWord(word));
            }

            stop_words.insert(word);
        }

        Ok(StopWordFilter { stop_words })
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let filter = StopWordFilter::from_text("in the  the").unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("in"));
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("cat"));
    }

    #[test]
    fn test_from_words() {
        let filter = StopWordFilter::from_words(vec!["and", "or"]).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("or"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopWordFilter::new();
        assert!(filter.is_empty());
        assert!(!filter.is_stop_word("the"));
    }

    #[test]
    fn test_control_character_rejected() {
        let result = StopWordFilter::from_words(vec!["in", "th\u{2}e"]);
        assert!(matches!(result, Err(PilumError::InvalidStopWord(w)) if w == "th\u{2}e"));
    }
}
