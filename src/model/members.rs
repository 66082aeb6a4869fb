use serde::{Deserialize, Serialize};

use super::common::{ParsedAnnotation, ParsedParameter, ParsedTypeGuard, ParsedTypeParameter, Visibility};
use super::location::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProperty {
    pub name: String,
    pub r#type: Option<String>,
    pub visibility: Visibility,
    /// `true` for immutable bindings (`val`, `final`, `readonly`, `const`).
    pub is_val: bool,
    pub initializer: Option<String>,
    pub annotations: Vec<ParsedAnnotation>,
    pub location: SourceLocation,
}

/// A call site found while walking a function body. Left unresolved until
/// the resolution phase (§4.8) fills in a target FQN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCall {
    pub name: String,
    /// Textual expression before the dot, e.g. `this.repo` in `this.repo.save(u)`.
    pub receiver: Option<String>,
    /// Filled only when statically obvious (explicit cast, known local variable type).
    pub receiver_type: Option<String>,
    pub argument_types: Option<Vec<String>>,
    pub argument_count: Option<usize>,
    pub is_safe_call: Option<bool>,
    pub is_constructor_call: Option<bool>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOverloadSignature {
    pub parameters: Vec<ParsedParameter>,
    pub return_type: Option<String>,
    pub type_parameters: Option<Vec<ParsedTypeParameter>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFunction {
    pub name: String,
    pub visibility: Visibility,
    pub parameters: Vec<ParsedParameter>,
    pub return_type: Option<String>,
    pub is_abstract: bool,
    pub is_suspend: bool,
    pub is_extension: bool,
    pub receiver_type: Option<String>,
    pub is_inline: Option<bool>,
    pub is_infix: Option<bool>,
    pub is_operator: Option<bool>,
    pub type_parameters: Option<Vec<ParsedTypeParameter>>,
    pub annotations: Vec<ParsedAnnotation>,
    pub location: SourceLocation,
    pub calls: Vec<ParsedCall>,
    pub overloads: Option<Vec<ParsedOverloadSignature>>,
    pub is_overload_signature: Option<bool>,
    pub type_guard: Option<ParsedTypeGuard>,
}

impl ParsedFunction {
    pub fn new(name: impl Into<String>, visibility: Visibility, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            visibility,
            parameters: Vec::new(),
            return_type: None,
            is_abstract: false,
            is_suspend: false,
            is_extension: false,
            receiver_type: None,
            is_inline: None,
            is_infix: None,
            is_operator: None,
            type_parameters: None,
            annotations: Vec::new(),
            location,
            calls: Vec::new(),
            overloads: None,
            is_overload_signature: None,
            type_guard: None,
        }
    }
}
