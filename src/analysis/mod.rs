//! Text analysis: tokenization and stop-word handling.

pub mod stop_words;
pub mod tokenizer;

pub use stop_words::StopWordFilter;
pub use tokenizer::{split_words, split_words_view};

/// Check that a word carries no control character (byte value < 0x20).
///
/// Applied to stop words at construction, to document text at insertion
/// and to query terms during parsing.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < 0x20)
}
