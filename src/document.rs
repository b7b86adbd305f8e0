//! Document identifiers, statuses and search results.
//!
//! A document enters the engine through
//! [`SearchServer::add_document`](crate::search::SearchServer::add_document)
//! and leaves only through explicit removal; there is no update-in-place.
//! The types here are what the engine hands back to callers: ranked
//! [`Document`] summaries and [`DocumentMatch`] word lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document identifier. Valid ids are non-negative.
pub type DocumentId = i32;

/// Status tag attached to every indexed document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    /// Canonical upper-case name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTUAL" => Ok(DocumentStatus::Actual),
            "IRRELEVANT" => Ok(DocumentStatus::Irrelevant),
            "BANNED" => Ok(DocumentStatus::Banned),
            "REMOVED" => Ok(DocumentStatus::Removed),
            other => Err(format!("unknown document status: {other}")),
        }
    }
}

/// A ranked search result.
///
/// This is an independent snapshot; it stays valid after the document it
/// describes is removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id
    pub id: DocumentId,
    /// TF-IDF relevance for the query that produced this result
    pub relevance: f64,
    /// Average rating computed at insertion
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Result of matching a query against a single document.
///
/// `words` borrow from the server's index, so the document cannot be
/// removed while a match is alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMatch<'a> {
    /// Sorted, deduplicated plus-words present in the document. Empty when a
    /// minus-word matched.
    pub words: Vec<&'a str>,
    /// Status of the matched document
    pub status: DocumentStatus,
}

impl DocumentMatch<'_> {
    /// Check whether no plus-word matched.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Integer average of `ratings`, truncated toward zero. Empty ratings average to 0.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(compute_average_rating(&[8, -3]), 2);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(compute_average_rating(&[-7]), -7);
        assert_eq!(compute_average_rating(&[-3, -4]), -3);
        assert_eq!(compute_average_rating(&[]), 0);
    }

    #[test]
    fn test_average_rating_does_not_overflow() {
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            DocumentStatus::Actual,
            DocumentStatus::Irrelevant,
            DocumentStatus::Banned,
            DocumentStatus::Removed,
        ] {
            assert_eq!(status.to_string().parse::<DocumentStatus>(), Ok(status));
        }
        assert_eq!("banned".parse::<DocumentStatus>(), Ok(DocumentStatus::Banned));
        assert!("archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&DocumentStatus::Irrelevant).unwrap();
        assert_eq!(json, "\"IRRELEVANT\"");
        let status: DocumentStatus = serde_json::from_str("\"BANNED\"").unwrap();
        assert_eq!(status, DocumentStatus::Banned);
    }

    #[test]
    fn test_document_display() {
        let doc = Document::new(1, 0.5, 4);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 1, relevance = 0.5, rating = 4 }"
        );
    }
}
