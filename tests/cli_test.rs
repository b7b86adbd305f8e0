use std::fs;

use clap::Parser;
use spyglass::cli::{SpyglassArgs, build_server, run_command};
use tempfile::TempDir;

const DOCUMENTS: &str = r#"{"id": 0, "text": "white cat and fashion collar", "ratings": [8, -3]}
{"id": 1, "text": "fluffy cat fluffy tail", "ratings": [7, 2, 7]}
{"id": 2, "text": "wellgroomed dog expressive eyes", "ratings": [5, -12, 2, 1]}
{"id": 3, "text": "wellgroomed starling eugene", "status": "BANNED", "ratings": [9]}
{"id": 4, "text": "fluffy tail cat", "ratings": [1]}
"#;

fn write_documents(dir: &TempDir) -> String {
    let path = dir.path().join("documents.jsonl");
    fs::write(&path, DOCUMENTS).unwrap();
    path.to_string_lossy().to_string()
}

fn run(args: &[&str]) -> String {
    let args = SpyglassArgs::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run_command(&args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_build_server_from_file() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);

    let args = SpyglassArgs::try_parse_from([
        "spyglass",
        "--stop-words",
        "and in on",
        "--documents",
        documents.as_str(),
        "dedup",
    ])
    .unwrap();
    let server = build_server(&args).unwrap();

    assert_eq!(server.document_count(), 5);
    assert_eq!(server.document(0).unwrap().rating(), 2);
    assert_eq!(server.word_frequencies(0).len(), 4);
}

#[test]
fn test_search_json_output() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);

    let output = run(&[
        "spyglass", "-s", "and in on", "-d", documents.as_str(), "-f", "json", "search", "fluffy cat",
    ]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let ids: Vec<i64> = value["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 4, 0]);
}

#[test]
fn test_search_by_status() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);

    let output = run(&[
        "spyglass",
        "-d",
        documents.as_str(),
        "-f",
        "json",
        "search",
        "wellgroomed",
        "--status",
        "banned",
        "--parallel",
    ]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["documents"].as_array().unwrap().len(), 1);
    assert_eq!(value["documents"][0]["id"], 3);
}

#[test]
fn test_match_human_output() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);

    let output = run(&["spyglass", "-d", documents.as_str(), "match", "tail cat -collar", "1"]);
    assert_eq!(
        output,
        "{ document_id = 1, status = ACTUAL, words = cat tail }\n"
    );
}

#[test]
fn test_dedup_output() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);

    let output = run(&["spyglass", "-d", documents.as_str(), "-f", "json", "dedup"]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["removed"], serde_json::json!([4]));
    assert_eq!(value["remaining"], 4);
}

#[test]
fn test_batch_output() {
    let dir = TempDir::new().unwrap();
    let documents = write_documents(&dir);
    let queries = dir.path().join("queries.txt");
    fs::write(&queries, "fluffy\nwellgroomed -eyes\nparrot\n").unwrap();
    let queries = queries.to_string_lossy().to_string();

    let output = run(&[
        "spyglass", "-d", documents.as_str(), "-f", "json", "batch", queries.as_str(),
    ]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let lengths: Vec<usize> = value["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_array().unwrap().len())
        .collect();
    // Document 3 is banned
    assert_eq!(lengths, vec![2, 0, 0]);

    let output = run(&[
        "spyglass", "-d", documents.as_str(), "-f", "json", "batch", queries.as_str(), "--joined",
    ]);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["query_count"], 3);
    assert_eq!(value["documents"].as_array().unwrap().len(), 2);
}

#[test]
fn test_missing_document_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.jsonl");
    let missing = missing.to_string_lossy().to_string();

    let args = SpyglassArgs::try_parse_from(["spyglass", "-d", missing.as_str(), "dedup"]).unwrap();
    assert!(run_command(&args, &mut Vec::new()).is_err());
}
