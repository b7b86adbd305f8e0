//! Index module for Spyglass.
//!
//! The inverted index keeps the forward mapping word → (document → term
//! frequency) used at query time, and its exact transpose used for removal
//! and duplicate detection.

pub mod inverted;

pub use inverted::{DocumentData, InvertedIndex};
