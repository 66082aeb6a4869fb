//! Orchestrates one indexing run: scan → filter → read → parse → extract
//! → resolve → emit (spec.md §5). The scan/filter/read/parse stages are
//! embarrassingly parallel per file; grounded on the teacher's
//! `layoutmap.rs` `WalkDir::new(root).filter_entry(...)` walk combined
//! with the reference corpus's `rayon::ThreadPoolBuilder` sizing pattern
//! (`dean0x-skim`'s `crates/rskim/src/main.rs`), since the teacher itself
//! never needed a worker pool wide enough to justify one.

use std::path::{Path, PathBuf};
use std::thread::available_parallelism;

use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::IndexOptions;
use crate::error::{CoreError, FilesystemError, ParseError as CoreParseError};
use crate::filter::{should_parse_file, should_scan_directory};
use crate::graph::{self, GraphBatch};
use crate::model::{ParsedFile, SymbolTable};
use crate::parser;
use crate::resolver::resolve_all;
use crate::stats::ResolutionStats;

/// A file-level failure. Never aborts the run (spec.md §7 "Propagation
/// policy") — collected here and reported alongside the successful
/// output.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything one call to [`run`] produces.
#[derive(Debug)]
pub struct PipelineReport {
    pub files_scanned: usize,
    pub files_parsed: usize,
    pub read_failures: Vec<FileFailure>,
    pub parse_failures: Vec<FileFailure>,
    pub symbol_table: SymbolTable,
    pub stats: ResolutionStats,
    pub graph: GraphBatch,
}

/// Run the full pipeline over `root`. Fails only when `root` itself can't
/// be walked; every per-file failure downstream is soft and ends up in
/// [`PipelineReport::read_failures`] / [`PipelineReport::parse_failures`].
pub fn run(root: &Path, options: &IndexOptions) -> Result<PipelineReport, CoreError> {
    if !root.is_dir() {
        return Err(CoreError::Filesystem(FilesystemError {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "root is not a directory"),
        }));
    }

    let candidates = scan(root, options);
    info!(count = candidates.len(), "scan complete");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(available_parallelism().map(|n| n.get()).unwrap_or(1))
        .build()
        .map_err(|e| {
            CoreError::Filesystem(FilesystemError {
                path: root.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })
        })?;

    let (parsed_files, read_failures, parse_failures) = pool.install(|| read_and_parse(&candidates));
    info!(parsed = parsed_files.len(), "extraction complete");

    let (symbol_table, resolved, stats) = resolve_all(&parsed_files);
    debug!(resolution_rate = stats.resolution_rate(), "resolution complete");

    let graph_batch = graph::emit(&parsed_files, &resolved);

    Ok(PipelineReport {
        files_scanned: candidates.len(),
        files_parsed: parsed_files.len(),
        read_failures,
        parse_failures,
        symbol_table,
        stats,
        graph: graph_batch,
    })
}

/// Walk `root`, pruning skipped directories before descending into them
/// and keeping only files the filter and the parser registry both accept.
fn scan(root: &Path, options: &IndexOptions) -> Vec<PathBuf> {
    let filter_options = options.filter_options();
    let extra_excludes = options.extra_exclude_globset(root);

    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            should_scan_directory(&name, entry.path().to_str())
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let path_str = path.to_string_lossy();
            if !should_parse_file(&path_str, filter_options) {
                return false;
            }
            if let Some(globset) = &extra_excludes {
                if globset.is_match(path_str.as_ref()) {
                    return false;
                }
            }
            parser::is_file_supported(path)
        })
        .collect()
}

/// Read and parse every candidate file in parallel. Must run inside the
/// sized thread pool so rayon's work-stealing uses it rather than the
/// global default pool (spec.md §5 "A fixed-size worker pool (concurrency
/// = available hardware threads) is the expected implementation").
fn read_and_parse(candidates: &[PathBuf]) -> (Vec<ParsedFile>, Vec<FileFailure>, Vec<FileFailure>) {
    let outcomes: Vec<Result<ParsedFile, FileFailure>> = candidates
        .par_iter()
        .map(|path| read_and_parse_one(path))
        .collect();

    let mut parsed = Vec::with_capacity(outcomes.len());
    let mut read_failures = Vec::new();
    let mut parse_failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(file) => parsed.push(file),
            Err(failure) => {
                warn!(path = %failure.path.display(), reason = %failure.reason, "skipping file");
                if failure.reason.starts_with("read: ") {
                    read_failures.push(failure);
                } else {
                    parse_failures.push(failure);
                }
            }
        }
    }
    (parsed, read_failures, parse_failures)
}

fn read_and_parse_one(path: &Path) -> Result<ParsedFile, FileFailure> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| FileFailure { path: path.to_path_buf(), reason: format!("read: {e}") })?;

    let parser = parser::get_parser_for_file(path)
        .ok_or_else(|| FileFailure { path: path.to_path_buf(), reason: "no registered parser".to_string() })?;

    parser.parse(&source, path).map_err(|e: CoreParseError| FileFailure { path: path.to_path_buf(), reason: e.reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rejects_a_root_that_is_not_a_directory() {
        let temp = TempDir::new().expect("temp dir");
        let file_path = temp.path().join("not_a_dir.txt");
        fs::write(&file_path, "x").unwrap();

        let result = run(&file_path, &IndexOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn indexes_a_small_kotlin_project_end_to_end() {
        let temp = TempDir::new().expect("temp dir");
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::write(
            temp.path().join("pkg/Repo.kt"),
            "package pkg\ninterface Repo {\n    fun save(u: User)\n}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("pkg/Svc.kt"),
            "package pkg\nclass Svc(val repo: Repo) {\n    fun doIt() {\n        repo.save(User())\n    }\n}\n",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("node_modules")).unwrap();
        fs::write(temp.path().join("node_modules/vendored.kt"), "package vendored\nclass Ignored\n").unwrap();

        let report = run(temp.path(), &IndexOptions::default()).expect("pipeline run");

        assert_eq!(report.files_parsed, 2);
        assert!(report.read_failures.is_empty());
        assert!(report.parse_failures.is_empty());
        assert!(report.symbol_table.by_fqn.contains_key("pkg.Repo"));
        assert!(report.graph.nodes.iter().any(|n| n.fqn == "pkg.Svc"));
        assert!(report.stats.total_calls >= 1);
    }
}
