//! Stop word set.
//!
//! Stop words are fixed when a server is built and never change afterwards.
//! They are excluded from both indexing and querying.
//!
//! # Examples
//!
//! ```
//! use spyglass::analysis::stop_words::StopWords;
//!
//! let stop_words = StopWords::from_text("and in on").unwrap();
//! assert!(stop_words.contains("in"));
//! assert!(!stop_words.contains("cat"));
//! ```

use std::collections::BTreeSet;

use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::error::{Result, SpyglassError};

/// An immutable set of words excluded from indexing and querying.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build a stop word set from a collection of words.
    ///
    /// Empty strings are dropped. Fails with [`SpyglassError::InvalidWord`]
    /// if any word contains a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SpyglassError::invalid_word(word));
            }
            set.insert(word.to_string());
        }
        Ok(StopWords { words: set })
    }

    /// Build a stop word set from space-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    /// Check whether `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate the stop words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
