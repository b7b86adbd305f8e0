//! Search engine for indexing documents and answering ranked queries.

pub mod batch;
pub mod config;
pub mod engine;
pub mod ranking;

pub use self::batch::{process_queries, process_queries_joined};
pub use self::config::{
    DEFAULT_BUCKET_COUNT, ExecutionPolicy, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON,
    SearchServerConfig,
};
pub use self::engine::SearchServer;
