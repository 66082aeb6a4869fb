//! Input options for a single indexing run: a root directory path plus
//! `{excludePatterns, excludeTests, includeDeclarationFiles,
//! includeConfigFiles, domainsConfigPath?}`. The optional domains config is
//! an optional TOML file loaded once, falling back to defaults rather than
//! failing the run when it's missing or malformed.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use tracing::warn;

use crate::filter::FilterOptions;

/// The options a caller passes into a single indexing run.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Extra user-supplied glob patterns rejected in addition to the
    /// built-in skip list (spec.md §4.1).
    pub exclude_patterns: Vec<String>,
    pub exclude_tests: bool,
    pub include_declaration_files: bool,
    pub include_config_files: bool,
    /// Optional path to a domain-specific TOML config, resolved relative to
    /// the indexed root (spec.md §6's `domainsConfigPath?`).
    pub domains_config_path: Option<PathBuf>,
}

impl IndexOptions {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_declaration_files: self.include_declaration_files,
            include_test_files: !self.exclude_tests,
            include_config_files: self.include_config_files,
        }
    }

    /// Compile `exclude_patterns` plus any patterns contributed by
    /// `domainsConfigPath` into one matcher. Returns `None` when there are
    /// no extra patterns at all, so callers can skip the check entirely.
    pub fn extra_exclude_globset(&self, root: &Path) -> Option<GlobSet> {
        let mut patterns = self.exclude_patterns.clone();
        if let Some(domains_path) = &self.domains_config_path {
            let resolved = if domains_path.is_absolute() { domains_path.clone() } else { root.join(domains_path) };
            patterns.extend(DomainsConfig::load(&resolved).additional_exclude_globs);
        }
        if patterns.is_empty() {
            return None;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => warn!(pattern, %err, "ignoring malformed exclude pattern"),
            }
        }
        builder.build().ok()
    }
}

/// A domain-specific overlay loaded from `domainsConfigPath`. Its schema is
/// intentionally small: the core only needs extra exclusions from it, the
/// way the teacher's `TauriConfig` layers extra exclusion lists onto the
/// built-in detection rules.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DomainsConfig {
    #[serde(default)]
    pub additional_exclude_globs: Vec<String>,
}

impl DomainsConfig {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %path.display(), %err, "failed to parse domains config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read domains config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_options_exclude_nothing_extra() {
        let opts = IndexOptions::default();
        assert!(opts.extra_exclude_globset(Path::new(".")).is_none());
    }

    #[test]
    fn filter_options_inverts_exclude_tests() {
        let opts = IndexOptions { exclude_tests: true, ..Default::default() };
        assert!(!opts.filter_options().include_test_files);
    }

    #[test]
    fn missing_domains_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let config = DomainsConfig::load(&temp.path().join("absent.toml"));
        assert!(config.additional_exclude_globs.is_empty());
    }

    #[test]
    fn loads_additional_exclude_globs_from_domains_config() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("domains.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, r#"additional_exclude_globs = ["**/generated/**"]"#).expect("write config");

        let opts = IndexOptions { domains_config_path: Some(path), ..Default::default() };
        let globset = opts.extra_exclude_globset(temp.path()).expect("globset built");
        assert!(globset.is_match("src/generated/model.kt"));
    }
}
