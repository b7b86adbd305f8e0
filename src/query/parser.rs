//! Query parser for converting raw query strings into [`Query`] values.
//!
//! Parsed words borrow from the raw query text; a [`Query`] lives only for
//! the duration of one engine call.
//!
//! # Examples
//!
//! ```
//! use spyglass::analysis::StopWords;
//! use spyglass::query::QueryParser;
//!
//! let stop_words = StopWords::from_text("and in").unwrap();
//! let parser = QueryParser::new(&stop_words);
//!
//! let query = parser.parse("fluffy cat -collar in cat").unwrap();
//! assert_eq!(query.plus_words, vec!["cat", "fluffy"]);
//! assert_eq!(query.minus_words, vec!["collar"]);
//! ```

use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::error::{Result, SpyglassError};

/// A structured query: words that must contribute and words that exclude.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query<'q> {
    /// Words that contribute to relevance.
    pub plus_words: Vec<&'q str>,
    /// Words that exclude a document outright.
    pub minus_words: Vec<&'q str>,
}

impl Query<'_> {
    /// Check whether the query has neither plus- nor minus-words.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

/// A single classified query token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryWord<'q> {
    /// The word without its minus prefix.
    pub text: &'q str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Parses raw query strings against a server's stop words.
#[derive(Clone, Copy, Debug)]
pub struct QueryParser<'a> {
    stop_words: &'a StopWords,
}

impl<'a> QueryParser<'a> {
    /// Create a parser that drops the given stop words.
    pub fn new(stop_words: &'a StopWords) -> Self {
        QueryParser { stop_words }
    }

    /// Parse a query, sorting and deduplicating plus- and minus-words independently.
    pub fn parse<'q>(&self, text: &'q str) -> Result<Query<'q>> {
        let mut query = self.parse_raw(text)?;

        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();

        Ok(query)
    }

    /// Parse a query keeping the words in query order, duplicates included.
    pub fn parse_raw<'q>(&self, text: &'q str) -> Result<Query<'q>> {
        let mut query = Query::default();
        for token in split_words(text) {
            let word = self.parse_word(token)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.push(word.text);
            } else {
                query.plus_words.push(word.text);
            }
        }
        Ok(query)
    }

    /// Classify one token.
    ///
    /// Fails with [`SpyglassError::InvalidQueryWord`] for an empty token, a
    /// lone `-`, a `--` prefix, or a control character.
    pub fn parse_word<'q>(&self, token: &'q str) -> Result<QueryWord<'q>> {
        if token.is_empty() {
            return Err(SpyglassError::invalid_query_word(token));
        }

        let (text, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if text.is_empty() || text.starts_with('-') || !is_valid_word(text) {
            return Err(SpyglassError::invalid_query_word(token));
        }

        Ok(QueryWord {
            text,
            is_minus,
            is_stop: self.stop_words.contains(text),
        })
    }
}
