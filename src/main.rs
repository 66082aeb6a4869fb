//! Thin binary front end. Takes a root directory as its only argument,
//! runs the pipeline, and prints a JSON summary to stdout. CLI surface
//! stays deliberately minimal — flags, subcommands, and colored output
//! are out of scope for the core (spec.md §1 Non-goals); a richer CLI is
//! a separate downstream concern.

use std::path::PathBuf;
use std::process::ExitCode;

use codegraph::config::IndexOptions;
use codegraph::pipeline;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct RunSummary {
    root: PathBuf,
    files_scanned: usize,
    files_parsed: usize,
    read_failures: usize,
    parse_failures: usize,
    total_calls: usize,
    resolved_calls: usize,
    unresolved_calls: usize,
    resolution_rate: f64,
    nodes_emitted: usize,
    edges_emitted: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let Some(root) = std::env::args().nth(1) else {
        eprintln!("usage: codegraph <root-directory>");
        return ExitCode::from(2);
    };
    let root = PathBuf::from(root);

    match pipeline::run(&root, &IndexOptions::default()) {
        Ok(report) => {
            let summary = RunSummary {
                root,
                files_scanned: report.files_scanned,
                files_parsed: report.files_parsed,
                read_failures: report.read_failures.len(),
                parse_failures: report.parse_failures.len(),
                total_calls: report.stats.total_calls,
                resolved_calls: report.stats.resolved_calls,
                unresolved_calls: report.stats.unresolved_calls,
                resolution_rate: report.stats.resolution_rate(),
                nodes_emitted: report.graph.nodes.len(),
                edges_emitted: report.graph.edges.len(),
            };
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("failed to serialize summary: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("codegraph failed: {e}");
            ExitCode::FAILURE
        }
    }
}
