//! Output formatting for CLI commands.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpyglassArgs};
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub documents: Vec<Document>,
    pub duration_ms: u64,
}

/// Result structure for matching a query against a document.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: String,
    pub document_id: DocumentId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

/// Result structure for batch query processing.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResults {
    pub queries: Vec<String>,
    pub documents: Vec<Vec<Document>>,
    pub duration_ms: u64,
}

/// Result structure for batch processing with the results flattened.
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinedResults {
    pub query_count: usize,
    pub documents: Vec<Document>,
    pub duration_ms: u64,
}

/// Result structure for duplicate removal.
#[derive(Debug, Serialize, Deserialize)]
pub struct DedupResult {
    pub removed: Vec<DocumentId>,
    pub remaining: usize,
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Found {} document(s) for {:?} in {} ms",
            self.documents.len(),
            self.query,
            self.duration_ms
        )?;
        for document in &self.documents {
            writeln!(f, "{document}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, status = {}, words =",
            self.document_id, self.status
        )?;
        for word in &self.words {
            write!(f, " {word}")?;
        }
        writeln!(f, " }}")
    }
}

impl fmt::Display for BatchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} queries in {} ms",
            self.queries.len(),
            self.duration_ms
        )?;
        for (query, documents) in self.queries.iter().zip(&self.documents) {
            writeln!(f)?;
            writeln!(f, "{} document(s) for {:?}", documents.len(), query)?;
            for document in documents {
                writeln!(f, "{document}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for JoinedResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} queries in {} ms, {} document(s) total",
            self.query_count,
            self.duration_ms,
            self.documents.len()
        )?;
        for document in &self.documents {
            writeln!(f, "{document}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DedupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.removed {
            writeln!(f, "Found duplicate document id {id}")?;
        }
        writeln!(
            f,
            "Removed {} duplicate(s), {} document(s) remain",
            self.removed.len(),
            self.remaining
        )
    }
}

/// Write a result to `out` in the format selected by `args`.
pub fn output_result<W, T>(out: &mut W, message: &str, result: &T, args: &SpyglassArgs) -> Result<()>
where
    W: Write,
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output in human-readable format.
fn output_human<W, T>(out: &mut W, message: &str, result: &T, args: &SpyglassArgs) -> Result<()>
where
    W: Write,
    T: fmt::Display,
{
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    write!(out, "{result}")?;
    Ok(())
}

/// Output in JSON format.
fn output_json<W, T>(out: &mut W, result: &T, args: &SpyglassArgs) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}
