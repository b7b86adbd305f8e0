//! Parallel evaluation of independent queries against one server.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::search::engine::SearchServer;

/// Evaluate every query with
/// [`find_top_documents`](SearchServer::find_top_documents) in parallel.
///
/// Results are in query order. The first invalid query fails the batch.
pub fn process_queries<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Vec<Document>>>
where
    Q: AsRef<str> + Sync,
{
    server.install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// Like [`process_queries`], with all results concatenated in query order.
pub fn process_queries_joined<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Document>>
where
    Q: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
