//! Query parsing.
//!
//! A raw query is a space-separated list of words. Words prefixed with a
//! single `-` are minus-words: a document containing any of them is excluded
//! from the results. All other words are plus-words and contribute to
//! relevance.

pub mod parser;

pub use self::parser::{Query, QueryParser, QueryWord};
