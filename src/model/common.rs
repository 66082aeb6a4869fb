use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::location::SourceLocation;

/// One of the four supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Kotlin,
    Java,
    TypeScript,
    JavaScript,
}

impl Language {
    pub fn file_extensions(self) -> &'static [&'static str] {
        match self {
            Language::Kotlin => &["kt", "kts"],
            Language::Java => &["java"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
        }
    }
}

/// Declared visibility. Package-private Java and unmarked Kotlin members
/// both normalize to `Internal` per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnnotation {
    pub name: String,
    /// Keyed by argument name, or `arg0`, `arg1`, ... for positional args.
    pub arguments: HashMap<String, String>,
}

impl ParsedAnnotation {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTypeParameter {
    pub name: String,
    pub bounds: Vec<String>,
    pub variance: Option<Variance>,
    pub is_reified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFunctionType {
    pub parameter_types: Vec<String>,
    pub return_type: String,
    pub is_suspend: bool,
    pub receiver_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedParameter {
    pub name: String,
    pub r#type: Option<String>,
    pub function_type: Option<ParsedFunctionType>,
    pub default_value: Option<String>,
    pub annotations: Vec<ParsedAnnotation>,
    pub is_crossinline: Option<bool>,
    pub is_noinline: Option<bool>,
}

impl ParsedParameter {
    pub fn simple(name: impl Into<String>, ty: Option<String>) -> Self {
        Self {
            name: name.into(),
            r#type: ty,
            function_type: None,
            default_value: None,
            annotations: Vec::new(),
            is_crossinline: None,
            is_noinline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTypeGuard {
    pub parameter: String,
    pub narrowed_type: String,
    pub is_assertion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructorDelegation {
    This,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedConstructor {
    pub parameters: Vec<ParsedParameter>,
    pub visibility: Visibility,
    pub delegates_to: Option<ConstructorDelegation>,
    pub annotations: Vec<ParsedAnnotation>,
    pub location: SourceLocation,
}
