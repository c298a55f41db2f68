//! Query parsing.
//!
//! A raw query string is classified token by token into plus words
//! (required present), minus words (required absent, written with a
//! leading `-`) and discarded stop words. Any lexically invalid token
//! fails the whole parse.

use std::collections::BTreeSet;

use crate::analysis::{StopWordFilter, is_valid_word, split_words};
use crate::error::{PilumError, Result};

/// A parsed query: unique plus words and unique minus words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms required to be present in a matching document.
    pub plus_words: BTreeSet<String>,
    /// Terms whose presence vetoes a document.
    pub minus_words: BTreeSet<String>,
}

/// A single classified query token.
#[derive(Clone, Debug, PartialEq, Eq)]
struct QueryWord {
    text: String,
    is_minus: bool,
    is_stop: bool,
}

impl Query {
    /// Parse a raw query against a stop-word filter.
    ///
    /// Per-token rules: a leading `-` marks a minus word and is
    /// stripped; the remainder must be non-empty, must not start with
    /// another `-` and must not contain a control character, otherwise
    /// the parse fails with [`PilumError::InvalidQuery`]. Stop words
    /// are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use pilum::analysis::StopWordFilter;
    /// use pilum::query::Query;
    ///
    /// let stop_words = StopWordFilter::from_text("the").unwrap();
    /// let query = Query::parse("the fluffy -cat", &stop_words).unwrap();
    ///
    /// assert!(query.plus_words.contains("fluffy"));
    /// assert!(query.minus_words.contains("cat"));
    /// assert!(!query.plus_words.contains("the"));
    /// ```
    pub fn parse(text: &str, stop_words: &StopWordFilter) -> Result<Query> {
        let mut query = Query::default();

        for word in split_words(text) {
            let query_word = parse_query_word(word, stop_words)?;

            if query_word.is_stop {
                continue;
            }

            if query_word.is_minus {
                query.minus_words.insert(query_word.text);
            } else {
                query.plus_words.insert(query_word.text);
            }
        }

        Ok(query)
    }

    /// Check whether the query has neither plus nor minus words.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

fn parse_query_word(mut text: String, stop_words: &StopWordFilter) -> Result<QueryWord> {
    let is_minus = text.starts_with('-');
    if is_minus {
        text.remove(0);
    }

    if text.is_empty() {
        return Err(PilumError::query("empty term"));
    }
    if text.starts_with('-') {
        return Err(PilumError::query(format!("double minus in {text:?}")));
    }
    if !is_valid_word(&text) {
        return Err(PilumError::query(format!(
            "control character in {text:?}"
        )));
    }

    let is_stop = stop_words.is_stop_word(&text);

    Ok(QueryWord {
        text,
        is_minus,
        is_stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words(text: &str) -> StopWordFilter {
        StopWordFilter::from_text(text).unwrap()
    }

    #[test]
    fn test_parse_classifies_words() {
        let query = Query::parse("fluffy -cat in the tail", &stop_words("in the")).unwrap();

        let plus: Vec<&str> = query.plus_words.iter().map(String::as_str).collect();
        let minus: Vec<&str> = query.minus_words.iter().map(String::as_str).collect();
        assert_eq!(plus, vec!["fluffy", "tail"]);
        assert_eq!(minus, vec!["cat"]);
    }

    #[test]
    fn test_parse_deduplicates() {
        let query = Query::parse("cat cat -dog -dog", &stop_words("")).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn test_stop_word_with_minus_is_discarded() {
        // "-the" parses to a minus stop word, which is dropped.
        let query = Query::parse("-the cat", &stop_words("the")).unwrap();
        assert!(query.minus_words.is_empty());
        assert_eq!(query.plus_words.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bare_minus() {
        assert!(matches!(
            Query::parse("cat -", &stop_words("")),
            Err(PilumError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_parse_rejects_double_minus() {
        assert!(matches!(
            Query::parse("--cat", &stop_words("")),
            Err(PilumError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_parse_rejects_control_character() {
        assert!(matches!(
            Query::parse("ca\u{1}t", &stop_words("")),
            Err(PilumError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_parse_empty_query() {
        let query = Query::parse("", &stop_words("")).unwrap();
        assert!(query.is_empty());
    }
}
