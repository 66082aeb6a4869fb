//! Error taxonomy for the indexing core.
//!
//! Only failures that abort processing of a *unit of work* (one file, one
//! graph-sink write) are represented here. Unresolved calls and type
//! references are not errors — they are data, recorded in
//! [`crate::stats::ResolutionStats`] per the propagation policy in the spec.

use std::path::PathBuf;

use crate::model::Language;

/// A file could not be read from disk.
#[derive(Debug, thiserror::Error)]
#[error("failed to read {path}: {source}")]
pub struct FilesystemError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A source file's concrete syntax tree could not be produced.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse {path} as {language:?}: {reason}")]
pub struct ParseError {
    pub path: PathBuf,
    pub language: Language,
    pub reason: String,
}

/// The graph sink rejected a record. The core only describes the contract;
/// it never constructs this itself, but downstream adapters can report
/// failures back through the same error enum.
#[derive(Debug, thiserror::Error)]
#[error("graph sink rejected record: {0}")]
pub struct WriterError(pub String);

/// Top-level error type for the core's public operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Writer(#[from] WriterError),
}
