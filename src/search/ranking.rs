//! Ordering and truncation of ranked results.

use std::cmp::{Ordering, Reverse};

use crate::document::Document;
use crate::search::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

/// Sort documents by descending relevance.
///
/// Two documents whose relevance differs by at most [`RELEVANCE_EPSILON`]
/// are tied and ordered by descending rating, then ascending id. A document
/// is never placed above one whose relevance exceeds its own by more than
/// [`RELEVANCE_EPSILON`].
pub fn sort_by_relevance(documents: &mut Vec<Document>) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));

    let mut sorted: Vec<Document> = Vec::with_capacity(documents.len());
    for document in documents.drain(..) {
        // Everything already placed has relevance >= document.relevance, so
        // the last element it must follow is usually near the end.
        let position = sorted
            .iter()
            .rposition(|placed| must_follow(&document, placed))
            .map_or(0, |index| index + 1);
        sorted.insert(position, document);
    }
    *documents = sorted;
}

/// Whether `document` has to be ranked below `placed`.
fn must_follow(document: &Document, placed: &Document) -> bool {
    if placed.relevance > document.relevance + RELEVANCE_EPSILON {
        true
    } else if document.relevance > placed.relevance + RELEVANCE_EPSILON {
        false
    } else {
        let key = |d: &Document| (d.rating, Reverse(d.id));
        key(placed).cmp(&key(document)) == Ordering::Greater
    }
}

/// Sort and keep at most [`MAX_RESULT_DOCUMENT_COUNT`] documents.
pub fn top_documents(mut documents: Vec<Document>) -> Vec<Document> {
    sort_by_relevance(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
