use serde::{Deserialize, Serialize};

use super::common::{ParsedAnnotation, ParsedConstructor, ParsedTypeParameter, Visibility};
use super::location::SourceLocation;
use super::members::{ParsedFunction, ParsedProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedClass {
    pub name: String,
    pub kind: ClassKind,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_data: bool,
    pub is_sealed: bool,
    pub permitted_subclasses: Option<Vec<String>>,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub type_parameters: Option<Vec<ParsedTypeParameter>>,
    pub annotations: Vec<ParsedAnnotation>,
    pub properties: Vec<ParsedProperty>,
    pub functions: Vec<ParsedFunction>,
    pub nested_classes: Vec<ParsedClass>,
    pub companion_object: Option<Box<ParsedClass>>,
    pub secondary_constructors: Option<Vec<ParsedConstructor>>,
    pub location: SourceLocation,
}

impl ParsedClass {
    pub fn new(name: impl Into<String>, kind: ClassKind, visibility: Visibility, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            is_abstract: false,
            is_data: false,
            is_sealed: false,
            permitted_subclasses: None,
            super_class: None,
            interfaces: Vec::new(),
            type_parameters: None,
            annotations: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            nested_classes: Vec::new(),
            companion_object: None,
            secondary_constructors: None,
            location,
        }
    }
}

/// Structured view of `{ [K in C]: V }`. Optional — extractors may leave
/// this unset and rely on the raw `aliasedType` text alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMappedType {
    pub key_name: String,
    pub constraint_type: String,
    pub value_type: String,
    pub is_readonly: Option<bool>,
    pub is_optional: Option<bool>,
}

/// Structured view of `T extends U ? X : Y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedConditionalType {
    pub check_type: String,
    pub extends_type: String,
    pub true_type: String,
    pub false_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTypeAlias {
    pub name: String,
    pub aliased_type: String,
    pub visibility: Visibility,
    pub type_parameters: Option<Vec<ParsedTypeParameter>>,
    pub mapped_type: Option<ParsedMappedType>,
    pub conditional_type: Option<ParsedConditionalType>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDestructuringDeclaration {
    pub component_names: Vec<String>,
    pub component_types: Option<Vec<Option<String>>>,
    pub initializer: Option<String>,
    pub visibility: Visibility,
    pub is_val: bool,
    pub location: SourceLocation,
}

/// Anonymous object literal / class expression, kept for dependency
/// tracking rather than as a named declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedObjectExpression {
    pub super_types: Vec<String>,
    pub properties: Vec<ParsedProperty>,
    pub functions: Vec<ParsedFunction>,
    pub location: SourceLocation,
}
