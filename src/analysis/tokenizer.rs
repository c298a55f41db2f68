//! Whitespace tokenization.
//!
//! Two forms are provided: an owning form that splits on any standard
//! ASCII whitespace, and a borrowed-view form that splits on the single
//! space byte only. Neither form emits empty tokens.

/// Split text into owned words on standard whitespace.
///
/// Delegates to [`str::split_whitespace`], so tab, newline and carriage
/// return all separate words.
///
/// # Examples
///
/// ```
/// use pilum::analysis::split_words;
///
/// let words = split_words("white cat\tfashion  collar\n");
/// assert_eq!(words, vec!["white", "cat", "fashion", "collar"]);
/// ```
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Split text into borrowed words on the space byte (0x20) only.
///
/// Runs of adjacent spaces produce no empty tokens.
///
/// # Examples
///
/// ```
/// use pilum::analysis::split_words_view;
///
/// let words = split_words_view("in  the white cat");
/// assert_eq!(words, vec!["in", "the", "white", "cat"]);
/// ```
pub fn split_words_view(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}
