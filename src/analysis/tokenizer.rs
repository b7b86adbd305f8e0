//! Space tokenizer.
//!
//! Splitting never fails. Whether a word is acceptable is decided by the
//! consumer (document insertion, query parsing) through [`is_valid_word`].
//!
//! # Examples
//!
//! ```
//! use spyglass::analysis::tokenizer::split_words;
//!
//! let words: Vec<_> = split_words("  white cat   and collar ").collect();
//! assert_eq!(words, vec!["white", "cat", "and", "collar"]);
//! ```

/// Split `text` into words on the space character.
///
/// Runs of spaces collapse, and leading or trailing spaces produce no empty
/// words. Other whitespace (tabs, newlines) is part of a word.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it contains no control character below the space.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}
