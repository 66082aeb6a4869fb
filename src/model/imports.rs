use serde::{Deserialize, Serialize};

/// Normalized `import`-like construct. `path` is the raw module specifier —
/// relative (`./x`), absolute (`/x`), package (`foo/bar`), or bare
/// (`com.example`) — left unresolved here; path resolution is the module
/// resolver's job (§4.5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedImport {
    pub path: String,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub is_wildcard: bool,
    pub is_type_only: bool,
    pub is_dynamic: bool,
    /// Dynamic import whose specifier is a computed template literal —
    /// therefore unresolvable, e.g. `` import(`./${name}`) ``.
    pub is_template_literal: bool,
}

impl ParsedImport {
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            alias: None,
            is_wildcard: false,
            is_type_only: false,
            is_dynamic: false,
            is_template_literal: false,
        }
    }
}

/// Distinct from [`ParsedImport`]: a re-export republishes a name from one
/// module through the current module rather than binding it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReexport {
    pub source_path: String,
    pub original_name: Option<String>,
    pub exported_name: Option<String>,
    pub is_namespace_reexport: bool,
    pub is_wildcard: bool,
    pub is_type_only: bool,
}
