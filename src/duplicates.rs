//! Detection and removal of documents with identical word sets.
//!
//! Two documents are duplicates when they contain exactly the same distinct
//! (non-stop) words, regardless of frequency or order. The document with the
//! smallest id in a group is kept.

use ahash::AHashSet;
use tracing::info;

use crate::document::DocumentId;
use crate::search::SearchServer;
use crate::util::LogDuration;

/// Ids of documents whose word set equals that of a document with a smaller id.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: AHashSet<Vec<String>> = AHashSet::new();
    let mut duplicates = Vec::new();

    for id in server {
        // keys of a BTreeMap are sorted, so the Vec is a canonical set
        let words: Vec<String> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate found by [`find_duplicates`] and return their ids
/// in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let _guard = LogDuration::new("remove_duplicates");

    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        info!(id, "Found duplicate document id {id}");
        server.remove_document(id);
    }
    duplicates
}
