//! The fast classifier that prunes build/vendored/generated files before
//! parsing (spec.md §4.1). Both predicates are pure, perform no I/O, and
//! commute with forward-slash path normalization — the "Filter idempotence"
//! law in §8.
//!
//! Composed the way the teacher's `analyzer/classify.rs` and
//! `analyzer/scan.rs` build up boolean predicates: small named functions
//! chained with `||`/`&&` rather than a generic rule engine.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;

/// Directory basenames skipped unconditionally, regardless of options.
const SKIPPED_DIR_BASENAMES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "target",
    ".idea",
    ".vscode",
    ".next",
    ".nuxt",
    ".angular",
    ".turbo",
    ".vercel",
    ".output",
    ".svelte-kit",
    ".astro",
    "DerivedData",
    "Pods",
    ".xcbuild",
    "xcuserdata",
    ".gradle",
    ".m2",
    "coverage",
    "__coverage__",
    ".cache",
    ".tmp",
    ".temp",
    ".nx",
    ".pnpm",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
];

/// Exact basenames of bundler/linter/formatter/test-runner/package-manager
/// config files rejected outright.
const EXCLUDED_CONFIG_BASENAMES: &[&str] = &[
    "webpack.config.js",
    "rollup.config.js",
    "vite.config.ts",
    "vite.config.js",
    "babel.config.js",
    "babel.config.cjs",
    ".babelrc.js",
    "jest.config.js",
    "jest.config.ts",
    "jest.setup.js",
    "vitest.config.ts",
    "eslint.config.js",
    "eslint.config.mjs",
    ".eslintrc.js",
    ".eslintrc.cjs",
    "prettier.config.js",
    "postcss.config.js",
    "tailwind.config.js",
    "tailwind.config.ts",
    "next.config.js",
    "next.config.mjs",
    "metro.config.js",
    "package.json",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
];

const CONFIG_GLOB_PATTERNS: &[&str] = &[
    "*.config.ts",
    "*.config.js",
    "*.config.mjs",
    "*.config.cjs",
    "*.setup.ts",
    "*.setup.js",
    "*.setup.mjs",
    "*.setup.cjs",
    "*.d.ts",
    "*.d.mts",
    "*.d.cts",
    "*.min.js",
    "*.min.css",
    "*.bundle.js",
    "*.chunk.js",
    "*.generated.ts",
    "*.generated.js",
    "*.g.dart",
    "*-lock.json",
];

const TEST_GLOB_PATTERNS: &[&str] = &[
    "*.test.*",
    "*.spec.*",
    "*/__tests__/*",
    "*/test/*",
    "*/tests/*",
    "*Test.kt",
    "*Test.java",
];

const ANDROID_IOS_TEST_DIR_PATTERNS: &[&str] = &[
    "*/androidTest/*",
    "*/src/test/*",
    "*Tests/*",
    "*UITests/*",
];

fn build_globset(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        if let Ok(glob) = Glob::new(pat) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSetBuilder::new().build().unwrap())
}

static CONFIG_GLOBSET: Lazy<GlobSet> = Lazy::new(|| build_globset(CONFIG_GLOB_PATTERNS));
static TEST_GLOBSET: Lazy<GlobSet> = Lazy::new(|| build_globset(TEST_GLOB_PATTERNS));
static ANDROID_IOS_TEST_GLOBSET: Lazy<GlobSet> =
    Lazy::new(|| build_globset(ANDROID_IOS_TEST_DIR_PATTERNS));

/// Options toggling which files `shouldParseFile` accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub include_declaration_files: bool,
    pub include_test_files: bool,
    pub include_config_files: bool,
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Decide whether a directory should be descended into, from its basename
/// (and, for context-sensitive rules, its full path) alone.
pub fn should_scan_directory(dir_name: &str, full_path: Option<&str>) -> bool {
    if SKIPPED_DIR_BASENAMES.contains(&dir_name) {
        return false;
    }
    if dir_name == "public"
        && let Some(full) = full_path
    {
        let normalized = normalize(full);
        if path_segments(&normalized).any(|seg| seg == "ios" || seg == "android") {
            return false;
        }
    }
    if let Some(full) = full_path {
        let normalized = normalize(full);
        if path_segments(&normalized).any(|seg| seg == ".angular") {
            return false;
        }
    }
    true
}

fn has_excluded_dir_segment(path: &str) -> bool {
    path_segments(path).any(|seg| SKIPPED_DIR_BASENAMES.contains(&seg) || seg == ".angular")
}

fn is_test_path(path: &str) -> bool {
    TEST_GLOBSET.is_match(path)
        || ANDROID_IOS_TEST_GLOBSET.is_match(path)
        || path
            .to_ascii_lowercase()
            .ends_with("test.kt")
        || path.to_ascii_lowercase().ends_with("tests.kt")
}

fn is_declaration_file(path: &str) -> bool {
    path.ends_with(".d.ts") || path.ends_with(".d.mts") || path.ends_with(".d.cts")
}

/// Decide whether a file's content should be parsed, from its path alone.
pub fn should_parse_file(file_path: &str, options: FilterOptions) -> bool {
    let normalized = normalize(file_path);

    if has_excluded_dir_segment(&normalized) {
        return false;
    }

    let basename = normalized.rsplit('/').next().unwrap_or(&normalized);

    if EXCLUDED_CONFIG_BASENAMES.contains(&basename) {
        return false;
    }

    let is_declaration = is_declaration_file(&normalized);
    if is_declaration {
        if !options.include_declaration_files {
            return false;
        }
    } else if !options.include_config_files && CONFIG_GLOBSET.is_match(&normalized) {
        return false;
    }

    if !options.include_test_files && is_test_path(&normalized) {
        return false;
    }

    true
}

/// Sound but cheap pre-filter used by the scanner before a path is even
/// handed to `should_parse_file`: a directory walk never opens a file
/// inside a skipped directory.
pub fn is_within_skipped_directory(path: &Path) -> bool {
    let normalized = normalize(&path.to_string_lossy());
    has_excluded_dir_segment(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_hard_coded_directories() {
        assert!(!should_scan_directory("node_modules", None));
        assert!(!should_scan_directory(".git", None));
        assert!(should_scan_directory("src", None));
    }

    #[test]
    fn skips_public_under_mobile_platforms() {
        assert!(!should_scan_directory("public", Some("app/ios/public")));
        assert!(!should_scan_directory("public", Some("app/android/public")));
        assert!(should_scan_directory("public", Some("web/public")));
    }

    #[test]
    fn skips_angular_subtree() {
        assert!(!should_scan_directory("cache", Some(".angular/cache")));
    }

    #[test]
    fn rejects_files_under_excluded_directories() {
        let opts = FilterOptions::default();
        assert!(!should_parse_file("src/node_modules/pkg/index.ts", opts));
        assert!(!should_parse_file("target/debug/build.rs", opts));
    }

    #[test]
    fn rejects_exact_config_basenames() {
        let opts = FilterOptions::default();
        assert!(!should_parse_file("package.json", opts));
        assert!(!should_parse_file("webpack.config.js", opts));
    }

    #[test]
    fn rejects_config_glob_patterns_unless_included() {
        let opts = FilterOptions::default();
        assert!(!should_parse_file("src/app.config.ts", opts));
        assert!(!should_parse_file("src/setup.config.mjs", opts));
        assert!(!should_parse_file("dist/bundle.min.js", opts));

        let include_cfg = FilterOptions {
            include_config_files: true,
            ..opts
        };
        assert!(should_parse_file("src/app.config.ts", include_cfg));
    }

    #[test]
    fn declaration_files_opt_in() {
        let opts = FilterOptions::default();
        assert!(!should_parse_file("src/types.d.ts", opts));

        let include_decl = FilterOptions {
            include_declaration_files: true,
            ..opts
        };
        assert!(should_parse_file("src/types.d.ts", include_decl));
    }

    #[test]
    fn test_files_excluded_by_default() {
        let opts = FilterOptions::default();
        assert!(!should_parse_file("src/app.test.ts", opts));
        assert!(!should_parse_file("src/__tests__/app.ts", opts));
        assert!(!should_parse_file("pkg/AppTest.java", opts));

        let include_tests = FilterOptions {
            include_test_files: true,
            ..opts
        };
        assert!(should_parse_file("src/app.test.ts", include_tests));
    }

    #[test]
    fn accepts_ordinary_source_files() {
        let opts = FilterOptions::default();
        assert!(should_parse_file("src/index.ts", opts));
        assert!(should_parse_file("pkg/Repo.kt", opts));
        assert!(should_parse_file("pkg/App.java", opts));
    }

    /// Filter idempotence (§8): normalizing the path first must not change
    /// the verdict.
    #[test]
    fn idempotent_under_normalization() {
        let opts = FilterOptions::default();
        let backslashed = r"src\node_modules\pkg\index.ts";
        let forward = "src/node_modules/pkg/index.ts";
        assert_eq!(
            should_parse_file(backslashed, opts),
            should_parse_file(forward, opts)
        );
    }
}
