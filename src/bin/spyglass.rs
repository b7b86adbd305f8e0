//! Spyglass CLI binary.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spyglass::cli::args::*;
use spyglass::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = SpyglassArgs::parse();

    // RUST_LOG takes precedence over -v/-q
    let level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: SpyglassArgs) -> anyhow::Result<()> {
    let documents = args.documents.clone();
    execute_command(args).with_context(|| format!("failed to serve {}", documents.display()))
}
