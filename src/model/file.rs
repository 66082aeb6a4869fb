use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::class::{ParsedClass, ParsedDestructuringDeclaration, ParsedObjectExpression, ParsedTypeAlias};
use super::common::Language;
use super::imports::{ParsedImport, ParsedReexport};
use super::members::ParsedFunction;
use super::members::ParsedProperty;

/// A single source file's normalized, language-agnostic representation.
/// Produced once per file and never mutated afterward (§3 "Lifecycles").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    pub file_path: PathBuf,
    pub language: Language,
    pub package_name: Option<String>,
    pub imports: Vec<ParsedImport>,
    pub reexports: Vec<ParsedReexport>,
    pub classes: Vec<ParsedClass>,
    pub top_level_functions: Vec<ParsedFunction>,
    pub top_level_properties: Vec<ParsedProperty>,
    pub type_aliases: Vec<ParsedTypeAlias>,
    pub destructuring_declarations: Vec<ParsedDestructuringDeclaration>,
    pub object_expressions: Vec<ParsedObjectExpression>,
}

impl ParsedFile {
    pub fn empty(file_path: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            file_path: file_path.into(),
            language,
            package_name: None,
            imports: Vec::new(),
            reexports: Vec::new(),
            classes: Vec::new(),
            top_level_functions: Vec::new(),
            top_level_properties: Vec::new(),
            type_aliases: Vec::new(),
            destructuring_declarations: Vec::new(),
            object_expressions: Vec::new(),
        }
    }

    /// "The package of a symbol is its file path or a project-relative
    /// derived name" for file-oriented languages (§3 "FQN construction").
    /// The core is indifferent to the exact representation provided it is
    /// consistent, so the file path is used verbatim rather than mangled.
    pub fn package_or_file_proxy(&self) -> String {
        self.package_name
            .clone()
            .unwrap_or_else(|| self.file_path.to_string_lossy().into_owned())
    }
}
