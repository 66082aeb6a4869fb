//! Java extraction (spec.md §4.3, Java column).
//!
//! Mirrors [`super::kotlin`]'s direct-walk style against the
//! tree-sitter-java grammar's standard node kinds (`field_declaration`,
//! `method_declaration`, `method_invocation`, `object_creation_expression`).

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::adapter::{
    children_of_kind, first_child_of_kind, has_modifier, location, named_children, text_trimmed,
};
use super::literals::{infer_literal_type, LiteralShape};
use super::registry::LanguageParser;
use crate::error::ParseError;
use crate::model::{
    ClassKind, ConstructorDelegation, Language, ParsedAnnotation, ParsedCall, ParsedClass,
    ParsedConstructor, ParsedFile, ParsedFunction, ParsedImport, ParsedParameter, ParsedProperty,
    Visibility,
};

pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for JavaParser {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ParseError {
                path: file_path.to_path_buf(),
                language: Language::Java,
                reason: format!("grammar load failed: {e}"),
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| ParseError {
            path: file_path.to_path_buf(),
            language: Language::Java,
            reason: "tree-sitter returned no tree".to_string(),
        })?;

        let root = tree.root_node();
        let mut file = ParsedFile::empty(file_path.to_path_buf(), Language::Java);

        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    file.package_name = first_child_of_kind(child, "scoped_identifier")
                        .or_else(|| first_child_of_kind(child, "identifier"))
                        .map(|n| text_trimmed(n, source).to_string());
                }
                "import_declaration" => file.imports.push(parse_import(child, source)),
                "class_declaration" | "interface_declaration" | "enum_declaration"
                | "record_declaration" | "annotation_type_declaration" => {
                    file.classes.push(parse_class(child, source, file_path))
                }
                _ => {}
            }
        }

        Ok(file)
    }
}

fn parse_import(node: Node, source: &str) -> ParsedImport {
    let is_wildcard = first_child_of_kind(node, "asterisk").is_some() || text_trimmed(node, source).ends_with(".*;");
    let raw = first_child_of_kind(node, "scoped_identifier")
        .or_else(|| first_child_of_kind(node, "identifier"))
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    let (path, name) = if is_wildcard {
        (raw, None)
    } else if let Some((prefix, last)) = raw.rsplit_once('.') {
        (prefix.to_string(), Some(last.to_string()))
    } else {
        (raw.clone(), Some(raw))
    };

    ParsedImport {
        path,
        name,
        alias: None,
        is_wildcard,
        is_type_only: false,
        is_dynamic: false,
        is_template_literal: false,
    }
}

fn visibility_of(node: Node, source: &str) -> Visibility {
    if has_modifier(node, source, "public") {
        Visibility::Public
    } else if has_modifier(node, source, "private") {
        Visibility::Private
    } else if has_modifier(node, source, "protected") {
        Visibility::Protected
    } else {
        // package-private Java normalizes to Internal (spec.md §3).
        Visibility::Internal
    }
}

fn annotations_of(node: Node, source: &str) -> Vec<ParsedAnnotation> {
    let Some(modifiers) = node.child_by_field_name("modifiers").or_else(|| first_child_of_kind(node, "modifiers")) else {
        return Vec::new();
    };
    named_children(modifiers)
        .into_iter()
        .filter(|m| m.kind() == "marker_annotation" || m.kind() == "annotation")
        .filter_map(|a| {
            a.child_by_field_name("name")
                .map(|n| ParsedAnnotation::bare(text_trimmed(n, source)))
        })
        .collect()
}

fn type_text(node: Node, source: &str, field: &str) -> Option<String> {
    node.child_by_field_name(field).map(|t| text_trimmed(t, source).to_string())
}

/// `int matrix[][]` — tree-sitter-java attaches the `[]` pairs to the
/// declarator/parameter's `dimensions` field rather than the type node, so
/// they must be appended to the base type text by hand (spec.md §4.3
/// "Array dimensions may appear after the identifier").
fn append_dimensions(base_type: Option<String>, node: Node, source: &str) -> Option<String> {
    let suffix = node.child_by_field_name("dimensions").map(|d| text_trimmed(d, source).to_string());
    match (base_type, suffix) {
        (Some(ty), Some(dims)) if !dims.is_empty() => Some(format!("{ty}{dims}")),
        (ty, _) => ty,
    }
}

fn parse_class(node: Node, source: &str, file_path: &Path) -> ParsedClass {
    let name = node
        .child_by_field_name("name")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    let kind = match node.kind() {
        "interface_declaration" => ClassKind::Interface,
        "enum_declaration" => ClassKind::Enum,
        "annotation_type_declaration" => ClassKind::Annotation,
        _ => ClassKind::Class,
    };

    let mut class = ParsedClass::new(name, kind, visibility_of(node, source), location(node, file_path));
    class.is_abstract = has_modifier(node, source, "abstract");
    class.is_sealed = has_modifier(node, source, "sealed");
    class.is_data = node.kind() == "record_declaration";
    class.annotations = annotations_of(node, source);

    if let Some(superclass) = first_child_of_kind(node, "superclass") {
        class.super_class = superclass
            .named_child(0)
            .map(|t| text_trimmed(t, source).to_string());
    }
    if let Some(interfaces) = first_child_of_kind(node, "super_interfaces").or_else(|| first_child_of_kind(node, "extends_interfaces")) {
        if let Some(list) = first_child_of_kind(interfaces, "type_list") {
            class.interfaces = named_children(list)
                .into_iter()
                .map(|n| text_trimmed(n, source).to_string())
                .collect();
        }
    }
    if class.is_sealed {
        if let Some(permits) = first_child_of_kind(node, "permits") {
            class.permitted_subclasses = Some(
                named_children(permits)
                    .into_iter()
                    .map(|n| text_trimmed(n, source).to_string())
                    .collect(),
            );
        }
    }

    if node.kind() == "record_declaration" {
        if let Some(params) = first_child_of_kind(node, "formal_parameters") {
            for param in children_of_kind(params, "formal_parameter") {
                let param_name = param
                    .child_by_field_name("name")
                    .map(|n| text_trimmed(n, source).to_string())
                    .unwrap_or_default();
                class.properties.push(ParsedProperty {
                    name: param_name,
                    r#type: type_text(param, source, "type"),
                    visibility: Visibility::Public,
                    is_val: true,
                    initializer: None,
                    annotations: annotations_of(param, source),
                    location: location(param, file_path),
                });
            }
        }
    }

    let Some(body) = first_child_of_kind(node, "class_body")
        .or_else(|| first_child_of_kind(node, "interface_body"))
        .or_else(|| first_child_of_kind(node, "enum_body"))
        .or_else(|| first_child_of_kind(node, "annotation_type_body"))
    else {
        return class;
    };

    for member in named_children(body) {
        match member.kind() {
            "field_declaration" => {
                // Java allows multiple comma-separated declarators under a
                // single field_declaration; each expands to its own property
                // (spec.md §4.3 "Multi-declarator field expansion").
                let declared_type = type_text(member, source, "type");
                let visibility = visibility_of(member, source);
                let annotations = annotations_of(member, source);
                for declarator in children_of_kind(member, "variable_declarator") {
                    let decl_name = declarator
                        .child_by_field_name("name")
                        .map(|n| text_trimmed(n, source).to_string())
                        .unwrap_or_default();
                    class.properties.push(ParsedProperty {
                        name: decl_name,
                        r#type: append_dimensions(declared_type.clone(), declarator, source),
                        visibility,
                        is_val: has_modifier(member, source, "final"),
                        initializer: declarator
                            .child_by_field_name("value")
                            .map(|v| text_trimmed(v, source).to_string()),
                        annotations: annotations.clone(),
                        location: location(declarator, file_path),
                    });
                }
            }
            "method_declaration" => class.functions.push(parse_method(member, source, file_path)),
            "constructor_declaration" => {
                let ctor = parse_constructor(member, source, file_path);
                class.secondary_constructors.get_or_insert_with(Vec::new).push(ctor);
            }
            "class_declaration" | "interface_declaration" | "enum_declaration" | "record_declaration" => {
                class.nested_classes.push(parse_class(member, source, file_path))
            }
            _ => {}
        }
    }

    class
}

fn parse_parameter(node: Node, source: &str) -> ParsedParameter {
    // `array_type`-suffixed identifiers (`int[] xs`) and varargs
    // (`String... args`) both surface through the `dimensions`/`...` tokens
    // tree-sitter-java attaches after the identifier rather than the type.
    let base_type = append_dimensions(type_text(node, source, "type"), node, source).unwrap_or_default();
    let is_vararg = node.kind() == "spread_parameter";
    let ty = if is_vararg {
        format!("{base_type}...")
    } else {
        base_type
    };
    ParsedParameter {
        name: node
            .child_by_field_name("name")
            .map(|n| text_trimmed(n, source).to_string())
            .unwrap_or_default(),
        r#type: Some(ty),
        function_type: None,
        default_value: None,
        annotations: annotations_of(node, source),
        is_crossinline: None,
        is_noinline: None,
    }
}

fn parse_method(node: Node, source: &str, file_path: &Path) -> ParsedFunction {
    let name = node
        .child_by_field_name("name")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    let mut func = ParsedFunction::new(name, visibility_of(node, source), location(node, file_path));
    func.annotations = annotations_of(node, source);
    // `void` return normalizes to absent rather than a literal "void" type.
    func.return_type = type_text(node, source, "type").filter(|t| t != "void");
    func.is_abstract = has_modifier(node, source, "abstract") || first_child_of_kind(node, "block").is_none();

    if let Some(params) = first_child_of_kind(node, "formal_parameters") {
        func.parameters = named_children(params)
            .into_iter()
            .filter(|p| p.kind() == "formal_parameter" || p.kind() == "spread_parameter")
            .map(|p| parse_parameter(p, source))
            .collect();
    }

    if let Some(body) = first_child_of_kind(node, "block") {
        func.calls = extract_calls(body, source, file_path);
    }

    func
}

fn parse_constructor(node: Node, source: &str, file_path: &Path) -> ParsedConstructor {
    let parameters = first_child_of_kind(node, "formal_parameters")
        .map(|params| {
            named_children(params)
                .into_iter()
                .filter(|p| p.kind() == "formal_parameter" || p.kind() == "spread_parameter")
                .map(|p| parse_parameter(p, source))
                .collect()
        })
        .unwrap_or_default();

    // Delegation is detected from the constructor's first statement
    // (spec.md §4.3 "Constructor delegation detection") rather than any
    // dedicated grammar node: `this(...)`/`super(...)` as the first
    // expression statement in the body.
    let delegates_to = first_child_of_kind(node, "constructor_body").and_then(|body| {
        named_children(body).into_iter().next().and_then(|stmt| {
            let stmt_text = text_trimmed(stmt, source);
            if stmt_text.starts_with("this(") {
                Some(ConstructorDelegation::This)
            } else if stmt_text.starts_with("super(") {
                Some(ConstructorDelegation::Super)
            } else {
                None
            }
        })
    });

    ParsedConstructor {
        parameters,
        visibility: visibility_of(node, source),
        delegates_to,
        annotations: annotations_of(node, source),
        location: location(node, file_path),
    }
}

fn literal_shape(node: Node, source: &str) -> LiteralShape {
    match node.kind() {
        "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal" | "binary_integer_literal" => {
            LiteralShape::Integer
        }
        "decimal_floating_point_literal" => LiteralShape::Float,
        "string_literal" => LiteralShape::String,
        "true" | "false" => LiteralShape::Boolean,
        "null_literal" => LiteralShape::Null,
        "object_creation_expression" => node
            .child_by_field_name("type")
            .map(|t| LiteralShape::Constructor(text_trimmed(t, source).to_string()))
            .unwrap_or(LiteralShape::Opaque),
        "cast_expression" => node
            .child_by_field_name("type")
            .map(|t| LiteralShape::Cast(text_trimmed(t, source).to_string()))
            .unwrap_or(LiteralShape::Opaque),
        _ => LiteralShape::Opaque,
    }
}

fn call_name_and_receiver(node: Node, source: &str) -> (String, Option<String>) {
    let name = node
        .child_by_field_name("name")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();
    let receiver = node
        .child_by_field_name("object")
        .map(|r| text_trimmed(r, source).to_string());
    (name, receiver)
}

fn extract_calls(node: Node, source: &str, file_path: &Path) -> Vec<ParsedCall> {
    let mut calls = Vec::new();
    walk_for_calls(node, source, file_path, &mut calls);
    calls
}

fn walk_for_calls(node: Node, source: &str, file_path: &Path, out: &mut Vec<ParsedCall>) {
    match node.kind() {
        "method_invocation" => {
            let (name, receiver) = call_name_and_receiver(node, source);
            let argument_types: Option<Vec<String>> = node.child_by_field_name("arguments").map(|args| {
                named_children(args)
                    .into_iter()
                    .map(|arg| infer_literal_type(&literal_shape(arg, source), Language::Java))
                    .collect()
            });
            let argument_count = argument_types.as_ref().map(|a| a.len());
            out.push(ParsedCall {
                name,
                receiver,
                receiver_type: None,
                argument_types,
                argument_count,
                is_safe_call: Some(false),
                is_constructor_call: Some(false),
                location: location(node, file_path),
            });
        }
        "object_creation_expression" => {
            let name = node
                .child_by_field_name("type")
                .map(|t| text_trimmed(t, source).to_string())
                .unwrap_or_default();
            let argument_types: Option<Vec<String>> = node.child_by_field_name("arguments").map(|args| {
                named_children(args)
                    .into_iter()
                    .map(|arg| infer_literal_type(&literal_shape(arg, source), Language::Java))
                    .collect()
            });
            let argument_count = argument_types.as_ref().map(|a| a.len());
            out.push(ParsedCall {
                name,
                receiver: None,
                receiver_type: None,
                argument_types,
                argument_count,
                is_safe_call: Some(false),
                is_constructor_call: Some(true),
                location: location(node, file_path),
            });
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "method_declaration" {
            walk_for_calls(child, source, file_path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParsedFile {
        JavaParser::new().parse(source, Path::new("App.java")).unwrap()
    }

    #[test]
    fn extracts_package_and_imports() {
        let file = parse("package com.example.app;\nimport com.example.lib.Thing;\nimport com.example.util.*;\n");
        assert_eq!(file.package_name.as_deref(), Some("com.example.app"));
        assert_eq!(file.imports.len(), 2);
        assert!(file.imports[1].is_wildcard);
    }

    #[test]
    fn expands_multi_declarator_fields() {
        let file = parse("class Point {\n    int x, y;\n}\n");
        assert_eq!(file.classes[0].properties.len(), 2);
        assert_eq!(file.classes[0].properties[0].name, "x");
        assert_eq!(file.classes[0].properties[1].name, "y");
    }

    #[test]
    fn void_return_normalizes_to_none() {
        let file = parse("class Service {\n    void run() {}\n}\n");
        assert_eq!(file.classes[0].functions[0].return_type, None);
    }

    #[test]
    fn appends_post_identifier_array_dimensions_to_the_type() {
        let file = parse("class Grid {\n    int matrix[][];\n}\n");
        assert_eq!(file.classes[0].properties[0].r#type.as_deref(), Some("int[][]"));
    }

    #[test]
    fn detects_this_constructor_delegation() {
        let file = parse(
            "class Box {\n    Box() { this(0); }\n    Box(int x) {}\n}\n",
        );
        let ctors = file.classes[0].secondary_constructors.as_ref().unwrap();
        assert_eq!(ctors[0].delegates_to, Some(ConstructorDelegation::This));
    }
}
