//! The lazy dispatch layer that picks the right language parser for a
//! file (spec.md §4.2).

pub mod adapter;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod literals;
pub mod registry;
pub mod typescript;

pub use registry::{LanguageParser, ParserRegistry};

use std::path::Path;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

/// The process-wide registry, pre-populated with the four built-in
/// parsers. Registration is expected to happen before scanning begins
/// (§5); `register_parser` may still replace an entry afterward, matching
/// spec.md §4.2's "re-registering replaces". A `Mutex` (rather than an
/// `RwLock`) guards it because every lookup can materialize a factory and
/// therefore needs exclusive access — this is the core's one process-wide
/// mutable state, guarded against torn initialization per §5.
static REGISTRY: Lazy<Mutex<ParserRegistry>> = Lazy::new(|| {
    let mut registry = ParserRegistry::new();
    registry.register(Arc::new(kotlin::KotlinParser::new()));
    registry.register(Arc::new(java::JavaParser::new()));
    registry.register(Arc::new(typescript::TypeScriptParser::new()));
    registry.register(Arc::new(javascript::JavaScriptParser::new()));
    Mutex::new(registry)
});

/// Register (or replace) a language parser in the global registry.
pub fn register_parser(parser: Arc<dyn LanguageParser>) {
    REGISTRY.lock().unwrap_or_else(|e| e.into_inner()).register(parser);
}

pub fn get_parser_for_file(path: &Path) -> Option<Arc<dyn LanguageParser>> {
    REGISTRY
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .get_parser_for_file(path)
}

pub fn get_supported_extensions() -> Vec<&'static str> {
    REGISTRY
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .supported_extensions()
}

pub fn is_file_supported(path: &Path) -> bool {
    get_parser_for_file(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn dispatches_by_extension() {
        assert_eq!(
            get_parser_for_file(Path::new("pkg/Repo.kt")).map(|p| p.language()),
            Some(crate::model::Language::Kotlin)
        );
        assert_eq!(
            get_parser_for_file(Path::new("pkg/App.java")).map(|p| p.language()),
            Some(crate::model::Language::Java)
        );
        assert_eq!(
            get_parser_for_file(Path::new("src/app.tsx")).map(|p| p.language()),
            Some(crate::model::Language::TypeScript)
        );
        assert_eq!(
            get_parser_for_file(Path::new("src/app.mjs")).map(|p| p.language()),
            Some(crate::model::Language::JavaScript)
        );
        assert!(get_parser_for_file(Path::new("src/app.py")).is_none());
    }

    #[test]
    #[serial]
    fn supported_extensions_is_the_union_of_registered_parsers() {
        let exts = get_supported_extensions();
        for expected in ["kt", "kts", "java", "ts", "tsx", "js", "jsx", "mjs", "cjs"] {
            assert!(exts.contains(&expected), "missing extension {expected}");
        }
    }

    #[test]
    #[serial]
    fn is_file_supported_matches_registry() {
        assert!(is_file_supported(Path::new("a.ts")));
        assert!(!is_file_supported(Path::new("a.rb")));
    }
}
