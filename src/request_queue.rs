//! Bookkeeping of empty search results over a trailing window of requests.
//!
//! A [`RequestQueue`] wraps a server and forwards top-documents queries to it,
//! remembering for the most recent [`MIN_IN_DAY`] requests whether each one
//! came back empty.

use std::collections::VecDeque;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::search::SearchServer;

/// Number of requests remembered, one per minute of a day.
pub const MIN_IN_DAY: usize = 1440;

/// Tracks how many of the most recent requests returned no documents.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    /// `true` for requests that returned no documents, oldest first.
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(MIN_IN_DAY),
            no_result_requests: 0,
        }
    }

    /// Forward to [`SearchServer::find_top_documents`] and record the outcome.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let documents = self.server.find_top_documents(raw_query)?;
        self.record(&documents);
        Ok(documents)
    }

    /// Forward to [`SearchServer::find_top_documents_by_status`] and record the outcome.
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let documents = self
            .server
            .find_top_documents_by_status(raw_query, status)?;
        self.record(&documents);
        Ok(documents)
    }

    /// Forward to [`SearchServer::find_top_documents_by`] and record the outcome.
    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let documents = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(&documents);
        Ok(documents)
    }

    /// Number of empty results among the remembered requests.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Number of remembered requests (at most [`MIN_IN_DAY`]).
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, documents: &[Document]) {
        if self.requests.len() >= MIN_IN_DAY {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }

        let is_empty = documents.is_empty();
        if is_empty {
            self.no_result_requests += 1;
        }
        self.requests.push_back(is_empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
        server
            .add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        server
            .add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        server
            .add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8])
            .unwrap();
        server
    }

    #[test]
    fn test_counts_empty_results() {
        let server = create_test_server();
        let mut queue = RequestQueue::new(&server);

        assert!(queue.add_find_request("empty request").unwrap().is_empty());
        assert_eq!(queue.add_find_request("curly dog").unwrap().len(), 2);
        queue
            .add_find_request_by_status("cat", DocumentStatus::Banned)
            .unwrap();
        queue
            .add_find_request_by("cat", |id, _, _| id == 3)
            .unwrap();

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.no_result_requests(), 2);
    }

    #[test]
    fn test_predicate_request_with_cell() {
        use std::cell::Cell;

        let server = create_test_server();
        let mut queue = RequestQueue::new(&server);
        let seen = Cell::new(0);

        let documents = queue
            .add_find_request_by("cat", |_, _, _| {
                seen.set(seen.get() + 1);
                false
            })
            .unwrap();

        assert!(documents.is_empty());
        assert_eq!(seen.get(), 2);
        assert_eq!(queue.no_result_requests(), 1);
    }

    #[test]
    fn test_failed_request_is_not_recorded() {
        let server = create_test_server();
        let mut queue = RequestQueue::new(&server);

        assert!(queue.add_find_request("--cat").is_err());
        assert!(queue.is_empty());
        assert_eq!(queue.no_result_requests(), 0);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let server = create_test_server();
        let mut queue = RequestQueue::new(&server);

        for _ in 0..MIN_IN_DAY - 1 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 1);

        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.len(), MIN_IN_DAY);
        assert_eq!(queue.no_result_requests(), MIN_IN_DAY - 2);
    }
}
