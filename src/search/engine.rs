//! The search server: document lifecycle, TF-IDF ranking and matching.
//!
//! # Concurrency
//!
//! Queries take `&self` and never mutate the index, so any number of them
//! may run at once. Adding and removing documents takes `&mut self`, which
//! keeps mutation from overlapping with queries. Wrap the server in a
//! `RwLock` to share it between readers and a writer.
//!
//! In [`ExecutionPolicy::Parallel`] mode each plus-word and then each
//! minus-word becomes a task on the server's thread pool. Relevance is
//! accumulated in a [`ConcurrentMap`]; results are only read after both
//! passes finish.
//!
//! # Examples
//!
//! ```
//! use spyglass::document::DocumentStatus;
//! use spyglass::search::SearchServer;
//!
//! let mut server = SearchServer::from_stop_words_text("and in on").unwrap();
//! server
//!     .add_document(0, "white cat and fashion collar", DocumentStatus::Actual, &[8, -3])
//!     .unwrap();
//! server
//!     .add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
//!     .unwrap();
//!
//! let results = server.find_top_documents("fluffy cat").unwrap();
//! assert_eq!(results[0].id, 1);
//! assert_eq!(results[0].rating, 5);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, btree_set};
use std::iter::Copied;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::document::{
    Document, DocumentId, DocumentMatch, DocumentStatus, compute_average_rating,
};
use crate::error::{Result, SpyglassError};
use crate::index::{DocumentData, InvertedIndex};
use crate::query::{Query, QueryParser};
use crate::search::config::{ExecutionPolicy, SearchServerConfig};
use crate::search::ranking;
use crate::util::ConcurrentMap;

/// In-process TF-IDF search server.
#[derive(Debug)]
pub struct SearchServer {
    /// Words excluded from indexing and querying.
    stop_words: StopWords,

    /// Inverted index and document metadata.
    index: InvertedIndex,

    /// Configuration for the server.
    config: SearchServerConfig,

    /// Thread pool for parallel evaluation.
    thread_pool: Arc<ThreadPool>,
}

impl SearchServer {
    /// Create a server with the given stop words and default configuration.
    ///
    /// Empty stop words are ignored; a stop word containing a control
    /// character fails with [`SpyglassError::InvalidWord`].
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, SearchServerConfig::default())
    }

    /// Create a server from space-separated stop words.
    pub fn from_stop_words_text(stop_words: &str) -> Result<Self> {
        Self::new(split_words(stop_words))
    }

    /// Create a server with the given stop words and configuration.
    pub fn with_config<I, S>(stop_words: I, config: SearchServerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = StopWords::new(stop_words)?;
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("spyglass-search-{i}"))
            .build()
            .map_err(|e| SpyglassError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        debug!(
            stop_words = stop_words.len(),
            threads = thread_pool_size,
            buckets = config.bucket_count,
            "search server created"
        );

        Ok(SearchServer {
            stop_words,
            index: InvertedIndex::new(),
            config,
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Index a document.
    ///
    /// Fails with [`SpyglassError::InvalidDocumentId`] if `id` is negative or
    /// already indexed, and with [`SpyglassError::InvalidWord`] if a word
    /// contains a control character. Nothing is indexed on failure.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 || self.index.contains(id) {
            return Err(SpyglassError::InvalidDocumentId(id));
        }

        let words = self.split_into_words_no_stop(text)?;
        let data = DocumentData::new(compute_average_rating(ratings), status, text);
        self.index.insert(id, &words, data);

        debug!(
            id,
            words = words.len(),
            %status,
            vocabulary = self.index.word_count(),
            "document added"
        );
        Ok(())
    }

    /// Remove a document from the index. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId) {
        if self.index.remove(id) {
            debug!(id, vocabulary = self.index.word_count(), "document removed");
        }
    }

    /// Top documents with status [`DocumentStatus::Actual`], evaluated sequentially.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status, evaluated sequentially.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by `predicate`, evaluated sequentially.
    ///
    /// The predicate never leaves the calling thread, so it need not be `Sync`.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query, ExecutionPolicy::Sequential)?;
        Ok(ranking::top_documents(
            self.find_all_documents(&query, &predicate),
        ))
    }

    /// Top documents accepted by `predicate`, evaluated under `policy`.
    ///
    /// `predicate` receives the document id, status and rating. At most
    /// [`MAX_RESULT_DOCUMENT_COUNT`](crate::search::MAX_RESULT_DOCUMENT_COUNT)
    /// documents are returned, ordered by descending relevance, then
    /// descending rating, then ascending id.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query, policy)?;
        let matched = match policy {
            ExecutionPolicy::Sequential => self.find_all_documents(&query, &predicate),
            ExecutionPolicy::Parallel => self.find_all_documents_parallel(&query, &predicate),
        };
        Ok(ranking::top_documents(matched))
    }

    /// Plus-words of `raw_query` present in document `id`, evaluated sequentially.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<DocumentMatch<'_>> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Plus-words of `raw_query` present in document `id`, evaluated under `policy`.
    ///
    /// If any minus-word occurs in the document the word list is empty. Fails
    /// with [`SpyglassError::UnknownDocumentId`] if `id` is not indexed.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<DocumentMatch<'_>> {
        match policy {
            ExecutionPolicy::Sequential => self.match_document_sequential(raw_query, id),
            ExecutionPolicy::Parallel => self.match_document_parallel(raw_query, id),
        }
    }

    /// Word → term frequency map of a document; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> Cow<'_, BTreeMap<String, f64>> {
        match self.index.word_frequencies(id) {
            Some(word_freqs) => Cow::Borrowed(word_freqs),
            None => Cow::Owned(BTreeMap::new()),
        }
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Check whether a document is indexed.
    pub fn contains_document(&self, id: DocumentId) -> bool {
        self.index.contains(id)
    }

    /// Metadata of an indexed document.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.index.document(id)
    }

    /// Indexed document ids in ascending order.
    pub fn document_ids(&self) -> Copied<btree_set::Iter<'_, DocumentId>> {
        self.index.document_ids().copied()
    }

    /// The server's stop words.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// The server's configuration.
    pub fn config(&self) -> &SearchServerConfig {
        &self.config
    }

    /// Run `op` on the server's thread pool.
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.thread_pool.install(op)
    }

    fn parse_query<'q>(&self, raw_query: &'q str, policy: ExecutionPolicy) -> Result<Query<'q>> {
        let query = self.parser().parse(raw_query)?;
        debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            ?policy,
            "query parsed"
        );
        Ok(query)
    }

    fn parser(&self) -> QueryParser<'_> {
        QueryParser::new(&self.stop_words)
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SpyglassError::invalid_word(word));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn find_all_documents<P>(&self, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let (Some(postings), Some(idf)) = (
                self.index.postings(word),
                self.index.inverse_document_freq(word),
            ) else {
                continue;
            };
            for (&id, &term_freq) in postings {
                let Some(data) = self.index.document(id) else {
                    continue;
                };
                if predicate(id, data.status(), data.rating()) {
                    *document_to_relevance.entry(id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            }
        }

        self.collect_documents(document_to_relevance)
    }

    fn find_all_documents_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let document_to_relevance: ConcurrentMap<DocumentId, f64> =
            ConcurrentMap::new(self.config.bucket_count);

        self.install(|| {
            query.plus_words.par_iter().for_each(|word| {
                let (Some(postings), Some(idf)) = (
                    self.index.postings(word),
                    self.index.inverse_document_freq(word),
                ) else {
                    return;
                };
                for (&id, &term_freq) in postings {
                    let Some(data) = self.index.document(id) else {
                        continue;
                    };
                    if predicate(id, data.status(), data.rating()) {
                        *document_to_relevance.access(id) += term_freq * idf;
                    }
                }
            });

            query.minus_words.par_iter().for_each(|word| {
                if let Some(postings) = self.index.postings(word) {
                    for id in postings.keys() {
                        document_to_relevance.erase(id);
                    }
                }
            });
        });

        self.collect_documents(document_to_relevance.build_ordinary_map())
    }

    fn collect_documents(&self, document_to_relevance: BTreeMap<DocumentId, f64>) -> Vec<Document> {
        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index
                    .document(id)
                    .map(|data| Document::new(id, relevance, data.rating()))
            })
            .collect()
    }

    fn match_document_sequential(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<DocumentMatch<'_>> {
        let query = self.parser().parse(raw_query)?;
        let status = self.document_status(id)?;

        if query
            .minus_words
            .iter()
            .any(|word| self.index.word_in_document(word, id))
        {
            return Ok(DocumentMatch {
                words: Vec::new(),
                status,
            });
        }

        // plus_words are already sorted and unique
        let words = query
            .plus_words
            .iter()
            .filter_map(|word| self.index.entry(word))
            .filter(|(_, postings)| postings.contains_key(&id))
            .map(|(word, _)| word)
            .collect();

        Ok(DocumentMatch { words, status })
    }

    fn match_document_parallel(&self, raw_query: &str, id: DocumentId) -> Result<DocumentMatch<'_>> {
        let query = self.parser().parse_raw(raw_query)?;
        let status = self.document_status(id)?;

        let words = self.install(|| {
            if query
                .minus_words
                .par_iter()
                .any(|word| self.index.word_in_document(word, id))
            {
                return Vec::new();
            }

            let mut words: Vec<&str> = query
                .plus_words
                .par_iter()
                .filter_map(|word| self.index.entry(word))
                .filter(|(_, postings)| postings.contains_key(&id))
                .map(|(word, _)| word)
                .collect();
            words.par_sort_unstable();
            words.dedup();
            words
        });

        Ok(DocumentMatch { words, status })
    }

    fn document_status(&self, id: DocumentId) -> Result<DocumentStatus> {
        self.index
            .document(id)
            .map(DocumentData::status)
            .ok_or(SpyglassError::UnknownDocumentId(id))
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = Copied<btree_set::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}
