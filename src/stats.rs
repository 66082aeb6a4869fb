//! Resolution statistics (spec.md §7) — "the primary quality signal for
//! regressions". An unresolved call is never an error; it's recorded here
//! alongside the calls that did resolve.

use serde::{Deserialize, Serialize};

use crate::model::ResolvedFile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub total_calls: usize,
    pub resolved_calls: usize,
    pub unresolved_calls: usize,
}

impl ResolutionStats {
    pub fn from_resolved_files(files: &[ResolvedFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            for call in &file.calls {
                stats.total_calls += 1;
                if call.target.is_resolved() {
                    stats.resolved_calls += 1;
                } else {
                    stats.unresolved_calls += 1;
                }
            }
        }
        stats
    }

    /// Fraction of call sites whose target FQN the resolver identified.
    /// `1.0` when there were no calls at all — an empty run has nothing to
    /// fail to resolve.
    pub fn resolution_rate(&self) -> f64 {
        if self.total_calls == 0 {
            1.0
        } else {
            self.resolved_calls as f64 / self.total_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParsedCall, ResolutionOutcome, ResolvedCall, SourceLocation};
    use std::path::PathBuf;

    fn call(target: ResolutionOutcome) -> ResolvedCall {
        ResolvedCall {
            from_fqn: "pkg.Svc.doIt".to_string(),
            call: ParsedCall {
                name: "save".to_string(),
                receiver: None,
                receiver_type: None,
                argument_types: None,
                argument_count: Some(0),
                is_safe_call: Some(false),
                is_constructor_call: Some(false),
                location: SourceLocation::new(PathBuf::from("pkg/Svc.kt"), 1, 0, 1, 0),
            },
            target,
            is_construction: false,
        }
    }

    #[test]
    fn computes_resolution_rate() {
        let mut file = ResolvedFile::new(PathBuf::from("pkg/Svc.kt"));
        file.calls.push(call(ResolutionOutcome::Resolved("pkg.Repo.save".to_string())));
        file.calls.push(call(ResolutionOutcome::Unresolved));
        file.calls.push(call(ResolutionOutcome::Unresolved));

        let stats = ResolutionStats::from_resolved_files(&[file]);
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.resolved_calls, 1);
        assert_eq!(stats.unresolved_calls, 2);
        assert!((stats.resolution_rate() - (1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_run_has_full_resolution_rate() {
        assert_eq!(ResolutionStats::default().resolution_rate(), 1.0);
    }
}
