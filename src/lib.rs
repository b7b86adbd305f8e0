//! # Spyglass
//!
//! An in-memory TF-IDF document search engine.
//!
//! ## Features
//!
//! - Stop-word filtering and strict word validation
//! - Plus/minus word queries ranked by TF-IDF, ties broken by rating
//! - Status and custom predicate filters
//! - Sequential or thread-pool parallel query evaluation
//! - Batch query processing, request statistics and duplicate removal
//!
//! ```
//! use spyglass::prelude::*;
//!
//! let mut server = SearchServer::from_stop_words_text("and in on").unwrap();
//! server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let top = server.find_top_documents("fluffy cat").unwrap();
//! assert_eq!(top[0].id, 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::document::{Document, DocumentId, DocumentMatch, DocumentStatus};
    pub use crate::duplicates::{find_duplicates, remove_duplicates};
    pub use crate::error::{Result, SpyglassError};
    pub use crate::request_queue::RequestQueue;
    pub use crate::search::{
        ExecutionPolicy, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON, SearchServer,
        SearchServerConfig, process_queries, process_queries_joined,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
