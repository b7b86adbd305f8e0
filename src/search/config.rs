//! Configuration for the search server.

use serde::{Deserialize, Serialize};

/// Maximum number of documents returned by a top-documents query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are considered equal when ranking.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of buckets in the parallel relevance accumulator.
pub const DEFAULT_BUCKET_COUNT: usize = 16;

/// Configuration for [`SearchServer`](crate::search::SearchServer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchServerConfig {
    /// Number of independently locked buckets used to accumulate relevance
    /// in parallel mode.
    pub bucket_count: usize,

    /// Thread pool size for parallel evaluation.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

impl Default for SearchServerConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            thread_pool_size: None,
        }
    }
}

impl SearchServerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accumulator bucket count.
    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Set the worker thread count.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}

/// How a query is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionPolicy {
    /// Single-threaded evaluation on the calling thread.
    #[default]
    Sequential,

    /// Per-word tasks on the server's thread pool.
    Parallel,
}
