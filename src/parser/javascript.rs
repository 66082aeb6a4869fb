//! JavaScript/JSX/MJS/CJS extraction — reuses [`super::typescript`]'s oxc
//! pipeline with TypeScript syntax disabled, then re-stamps the language
//! (spec.md §4.2's "JavaScript reuses the TypeScript parser but stamps
//! `language=javascript`").

use std::path::Path;

use super::registry::LanguageParser;
use super::typescript::TypeScriptParser;
use crate::error::ParseError;
use crate::model::{Language, ParsedFile};

pub struct JavaScriptParser {
    inner: TypeScriptParser,
}

impl JavaScriptParser {
    pub fn new() -> Self {
        Self { inner: TypeScriptParser::new() }
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for JavaScriptParser {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParseError> {
        self.inner.parse_with(source, file_path, Language::JavaScript, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_javascript_language() {
        let file = JavaScriptParser::new().parse("export function run() {}\n", Path::new("app.js")).unwrap();
        assert_eq!(file.language, Language::JavaScript);
        assert_eq!(file.top_level_functions[0].name, "run");
    }
}
