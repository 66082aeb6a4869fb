use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::members::ParsedCall;

/// The outcome of resolving one call site. Unresolved is data, not a
/// failure — it still carries the call so its source location can be
/// reported (§7 "UnresolvedReference").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    Resolved(String),
    Unresolved,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    pub fn fqn(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Resolved(fqn) => Some(fqn),
            ResolutionOutcome::Unresolved => None,
        }
    }
}

/// True when the call was resolved to a constructor rather than an
/// ordinary method/function invocation (spec.md §4.8 step 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCall {
    pub from_fqn: String,
    pub call: ParsedCall,
    pub target: ResolutionOutcome,
    pub is_construction: bool,
}

/// Per-file accumulation of resolved calls, appended to during the
/// resolution phase (§3 "Lifecycles").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedFile {
    pub file_path: PathBuf,
    pub calls: Vec<ResolvedCall>,
}

impl ResolvedFile {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            calls: Vec::new(),
        }
    }
}
