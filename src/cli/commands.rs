//! Command implementations for the Spyglass CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{DocumentId, DocumentStatus};
use crate::duplicates::remove_duplicates;
use crate::error::Result;
use crate::search::{SearchServer, SearchServerConfig, process_queries, process_queries_joined};
use crate::util::Timer;

/// One line of a JSONL document file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Parse JSONL document records. Blank lines are skipped.
pub fn load_documents<R: BufRead>(reader: R) -> Result<Vec<DocumentRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Read JSONL document records from a file.
pub fn load_documents_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<DocumentRecord>> {
    let file = File::open(path.as_ref())?;
    load_documents(BufReader::new(file))
}

/// Build a server from the stop words and document file named by `args`.
pub fn build_server(args: &SpyglassArgs) -> Result<SearchServer> {
    let timer = Timer::start();

    let mut config = SearchServerConfig::default();
    if let Some(threads) = args.threads {
        config = config.with_thread_pool_size(threads);
    }

    let mut server =
        SearchServer::with_config(args.stop_words.split(' ').filter(|w| !w.is_empty()), config)?;

    let records = load_documents_from_file(&args.documents)?;
    for record in &records {
        server.add_document(record.id, &record.text, record.status, &record.ratings)?;
    }

    info!(
        documents = server.document_count(),
        elapsed_ms = timer.stop().as_millis() as u64,
        "Loaded documents from {}",
        args.documents.display()
    );
    Ok(server)
}

/// Execute a CLI command, writing results to stdout.
pub fn execute_command(args: SpyglassArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args, &mut out)
}

/// Execute a CLI command, writing results to `out`.
pub fn run_command<W: Write>(args: &SpyglassArgs, out: &mut W) -> Result<()> {
    let mut server = build_server(args)?;
    match &args.command {
        Command::Search(search_args) => search(&server, search_args, args, out),
        Command::Match(match_args) => match_document(&server, match_args, args, out),
        Command::Batch(batch_args) => batch(&server, batch_args, args, out),
        Command::Dedup => dedup(&mut server, args, out),
    }
}

/// Search the loaded documents.
fn search<W: Write>(
    server: &SearchServer,
    args: &SearchArgs,
    cli_args: &SpyglassArgs,
    out: &mut W,
) -> Result<()> {
    debug!(query = %args.query, parallel = args.parallel, "search");
    let timer = Timer::start();

    let status = args.status.unwrap_or_default();
    let documents = server.find_top_documents_with(args.policy(), &args.query, |_, s, _| {
        s == status
    })?;

    let results = SearchResults {
        query: args.query.clone(),
        documents,
        duration_ms: timer.stop().as_millis() as u64,
    };
    output_result(out, "Search completed", &results, cli_args)
}

/// Match a query against a single document.
fn match_document<W: Write>(
    server: &SearchServer,
    args: &MatchArgs,
    cli_args: &SpyglassArgs,
    out: &mut W,
) -> Result<()> {
    debug!(query = %args.query, id = args.id, parallel = args.parallel, "match");

    let matched = server.match_document_with(args.policy(), &args.query, args.id)?;
    let result = MatchResult {
        query: args.query.clone(),
        document_id: args.id,
        words: matched.words.iter().map(|w| w.to_string()).collect(),
        status: matched.status,
    };
    output_result(out, "Match completed", &result, cli_args)
}

/// Run every line of a query file as a separate query.
fn batch<W: Write>(
    server: &SearchServer,
    args: &BatchArgs,
    cli_args: &SpyglassArgs,
    out: &mut W,
) -> Result<()> {
    let reader = BufReader::new(File::open(&args.queries)?);
    let queries = reader
        .lines()
        .collect::<io::Result<Vec<String>>>()?;
    debug!(queries = queries.len(), joined = args.joined, "batch");

    let timer = Timer::start();
    if args.joined {
        let documents = process_queries_joined(server, queries.as_slice())?;
        let results = JoinedResults {
            query_count: queries.len(),
            documents,
            duration_ms: timer.stop().as_millis() as u64,
        };
        output_result(out, "Batch completed", &results, cli_args)
    } else {
        let documents = process_queries(server, queries.as_slice())?;
        let results = BatchResults {
            queries,
            documents,
            duration_ms: timer.stop().as_millis() as u64,
        };
        output_result(out, "Batch completed", &results, cli_args)
    }
}

/// Remove duplicate documents.
fn dedup<W: Write>(server: &mut SearchServer, cli_args: &SpyglassArgs, out: &mut W) -> Result<()> {
    let removed = remove_duplicates(server);
    let result = DedupResult {
        removed,
        remaining: server.document_count(),
    };
    output_result(out, "Duplicates removed", &result, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpyglassError;
    use std::io::Cursor;

    #[test]
    fn test_load_documents() {
        let input = concat!(
            "{\"id\": 1, \"text\": \"white cat\", \"ratings\": [8, -3]}\n",
            "\n",
            "{\"id\": 2, \"text\": \"fluffy dog\", \"status\": \"BANNED\"}\n",
        );

        let records = load_documents(Cursor::new(input)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].status, DocumentStatus::Actual);
        assert_eq!(records[0].ratings, vec![8, -3]);
        assert_eq!(records[1].status, DocumentStatus::Banned);
        assert!(records[1].ratings.is_empty());
    }

    #[test]
    fn test_load_documents_rejects_malformed_line() {
        let input = "{\"id\": 1, \"text\": \"white cat\"}\nnot json\n";
        let result = load_documents(Cursor::new(input));
        assert!(matches!(result, Err(SpyglassError::Json(_))));
    }
}
