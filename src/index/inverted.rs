//! In-memory inverted index.
//!
//! Two maps are kept in lockstep:
//!
//! ```text
//! word_to_document_freqs:  "cat"  -> { 0: 0.2, 1: 0.25 }
//! document_to_word_freqs:  1      -> { "cat": 0.25, "fluffy": 0.5, "tail": 0.25 }
//! ```
//!
//! A word is present under a document on one side exactly when the document
//! is present under the word on the other side, with the same frequency.
//! Words are owned strings, so no index entry borrows from document text.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;

use crate::document::{DocumentId, DocumentStatus};

/// Metadata stored for every indexed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentData {
    rating: i32,
    status: DocumentStatus,
    text: String,
}

impl DocumentData {
    pub fn new<S: Into<String>>(rating: i32, status: DocumentStatus, text: S) -> Self {
        DocumentData {
            rating,
            status,
            text: text.into(),
        }
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    /// The original document text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Word ↔ document term frequency index with document metadata.
///
/// The index does no validation of its own; callers check ids and words
/// before inserting.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: AHashMap<String, BTreeMap<DocumentId, f64>>,
    document_to_word_freqs: BTreeMap<DocumentId, BTreeMap<String, f64>>,
    documents: AHashMap<DocumentId, DocumentData>,
    document_ids: BTreeSet<DocumentId>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document made of `words` (stop words already removed).
    ///
    /// Term frequency of a word is its occurrence count divided by the total
    /// number of words. Replaces nothing: `id` must not be present.
    pub fn insert(&mut self, id: DocumentId, words: &[&str], data: DocumentData) {
        debug_assert!(!self.documents.contains_key(&id));

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in words {
            *counts.entry(word).or_insert(0) += 1;
        }

        let total = words.len() as f64;
        let mut word_freqs = BTreeMap::new();
        for (word, count) in counts {
            let term_freq = count as f64 / total;
            self.word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .insert(id, term_freq);
            word_freqs.insert(word.to_string(), term_freq);
        }

        self.document_to_word_freqs.insert(id, word_freqs);
        self.documents.insert(id, data);
        self.document_ids.insert(id);
    }

    /// Remove a document from both directions of the index.
    ///
    /// Forward entries left without documents are dropped. Returns `false` if
    /// the id was not indexed.
    pub fn remove(&mut self, id: DocumentId) -> bool {
        if self.documents.remove(&id).is_none() {
            return false;
        }

        if let Some(word_freqs) = self.document_to_word_freqs.remove(&id) {
            for word in word_freqs.keys() {
                if let Some(postings) = self.word_to_document_freqs.get_mut(word.as_str()) {
                    postings.remove(&id);
                    if postings.is_empty() {
                        self.word_to_document_freqs.remove(word.as_str());
                    }
                }
            }
        }
        self.document_ids.remove(&id);
        true
    }

    /// Check whether a document is indexed.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Metadata of an indexed document.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Word → term frequency map of a document.
    pub fn word_frequencies(&self, id: DocumentId) -> Option<&BTreeMap<String, f64>> {
        self.document_to_word_freqs.get(&id)
    }

    /// Document → term frequency map of a word.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    /// The index-owned copy of `word` together with its postings.
    pub fn entry(&self, word: &str) -> Option<(&str, &BTreeMap<DocumentId, f64>)> {
        self.word_to_document_freqs
            .get_key_value(word)
            .map(|(key, postings)| (key.as_str(), postings))
    }

    /// Check whether `word` occurs in document `id`.
    pub fn word_in_document(&self, word: &str, id: DocumentId) -> bool {
        self.postings(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// `ln(document_count / documents_containing_word)`, or `None` for an unknown word.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        let postings = self.postings(word)?;
        if postings.is_empty() {
            return None;
        }
        Some((self.documents.len() as f64 / postings.len() as f64).ln())
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    /// Indexed document ids in ascending order.
    pub fn document_ids(&self) -> std::collections::btree_set::Iter<'_, DocumentId> {
        self.document_ids.iter()
    }
}
