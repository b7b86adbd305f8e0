//! Text analysis for Spyglass.
//!
//! Documents and queries go through the same two steps: the text is split
//! into words on the space character, and words listed in the server's
//! [`StopWords`](stop_words::StopWords) are dropped.

pub mod stop_words;
pub mod tokenizer;

pub use stop_words::StopWords;
pub use tokenizer::{is_valid_word, split_words};
