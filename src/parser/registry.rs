use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::ParseError;
use crate::model::{Language, ParsedFile};

/// Each parser exposes `language`, `extensions`, and `parse`. Implementors
/// are `Send + Sync` because the extraction phase fans a worker pool out
/// over them (§5).
pub trait LanguageParser: Send + Sync {
    fn language(&self) -> Language;
    fn extensions(&self) -> &'static [&'static str];
    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParseError>;
}

type ParserFactory = Box<dyn Fn() -> Arc<dyn LanguageParser> + Send + Sync>;

/// `registerParser(language, extensions, factory)` / `getParserForFile` /
/// `getSupportedExtensions` / `isFileSupported` (spec.md §4.2).
///
/// Factories are invoked lazily on first lookup and their result is cached
/// forever under the language key — re-registering a language replaces
/// both the factory and any cached instance, so the next lookup rebuilds
/// it. Extension lookups are case-insensitive.
pub struct ParserRegistry {
    factories: HashMap<Language, ParserFactory>,
    extensions: HashMap<String, Language>,
    instances: HashMap<Language, Arc<dyn LanguageParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            extensions: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    /// Register an already-constructed parser as its own factory. Most
    /// callers go through this; `register_with_factory` exists for
    /// genuinely expensive parsers that should defer construction.
    pub fn register(&mut self, parser: Arc<dyn LanguageParser>) {
        let language = parser.language();
        for ext in parser.extensions() {
            self.extensions.insert(ext.to_lowercase(), language);
        }
        self.instances.insert(language, parser.clone());
        self.factories.insert(language, Box::new(move || parser.clone()));
    }

    pub fn register_with_factory<F>(&mut self, language: Language, extensions: &[&str], factory: F)
    where
        F: Fn() -> Arc<dyn LanguageParser> + Send + Sync + 'static,
    {
        for ext in extensions {
            self.extensions.insert(ext.to_lowercase(), language);
        }
        self.instances.remove(&language);
        self.factories.insert(language, Box::new(factory));
    }

    fn parser_for_language(&mut self, language: Language) -> Option<Arc<dyn LanguageParser>> {
        if let Some(cached) = self.instances.get(&language) {
            return Some(cached.clone());
        }
        let factory = self.factories.get(&language)?;
        let built = factory();
        self.instances.insert(language, built.clone());
        Some(built)
    }

    /// Resolve a parser for `path`'s extension, materializing its factory
    /// and caching the result if this is the first lookup for that
    /// language.
    pub fn get_parser_for_file(&mut self, path: &Path) -> Option<Arc<dyn LanguageParser>> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        let language = *self.extensions.get(&ext)?;
        self.parser_for_language(language)
    }

    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self
            .instances
            .values()
            .flat_map(|p| p.extensions().iter().copied())
            .collect();
        exts.sort_unstable();
        exts.dedup();
        exts
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
