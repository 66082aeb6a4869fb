//! Kotlin extraction (spec.md §4.3, Kotlin column).
//!
//! Walks the tree-sitter-kotlin-ng concrete syntax tree directly — matching
//! by `node.kind()` and pulling fields with `child_by_field_name`, the same
//! shape the pack's other tree-sitter extractors use — rather than a
//! tree-sitter `Query`, since Kotlin's declaration shapes nest deeply enough
//! that a recursive walk reads more plainly than a flat pattern set.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::adapter::{
    children_of_kind, first_child_of_kind, has_modifier, initializer_after_eq, location,
    named_children, text, text_trimmed,
};
use super::literals::{infer_literal_type, LiteralShape};
use super::registry::LanguageParser;
use crate::error::ParseError;
use crate::model::{
    ClassKind, ConstructorDelegation, Language, ParsedAnnotation, ParsedCall, ParsedClass,
    ParsedConstructor, ParsedDestructuringDeclaration, ParsedFile, ParsedFunction, ParsedImport,
    ParsedParameter, ParsedProperty, ParsedTypeAlias, Visibility,
};

pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for KotlinParser {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["kt", "kts"]
    }

    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .map_err(|e| ParseError {
                path: file_path.to_path_buf(),
                language: Language::Kotlin,
                reason: format!("grammar load failed: {e}"),
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| ParseError {
            path: file_path.to_path_buf(),
            language: Language::Kotlin,
            reason: "tree-sitter returned no tree".to_string(),
        })?;

        let root = tree.root_node();
        let mut file = ParsedFile::empty(file_path.to_path_buf(), Language::Kotlin);

        for child in named_children(root) {
            match child.kind() {
                "package_header" => file.package_name = package_name(child, source),
                "import_header" => file.imports.push(parse_import(child, source)),
                "class_declaration" | "object_declaration" => {
                    file.classes.push(parse_class(child, source, file_path))
                }
                "function_declaration" => file
                    .top_level_functions
                    .push(parse_function(child, source, file_path)),
                "property_declaration" => {
                    if let Some(destructuring) = parse_destructuring(child, source, file_path) {
                        file.destructuring_declarations.push(destructuring);
                    } else {
                        file.top_level_properties
                            .push(parse_property(child, source, file_path));
                    }
                }
                "type_alias" => file.type_aliases.push(parse_type_alias(child, source, file_path)),
                _ => {}
            }
        }

        Ok(file)
    }
}

fn package_name(node: Node, source: &str) -> Option<String> {
    first_child_of_kind(node, "identifier").map(|n| text_trimmed(n, source).to_string())
}

fn parse_import(node: Node, source: &str) -> ParsedImport {
    let raw = first_child_of_kind(node, "identifier")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_else(|| text_trimmed(node, source).replace("import", "").trim().to_string());

    let is_wildcard = text(node, source).trim_end().ends_with(".*");
    let alias = first_child_of_kind(node, "import_alias")
        .and_then(|a| first_child_of_kind(a, "type_identifier").or_else(|| first_child_of_kind(a, "identifier")))
        .map(|n| text_trimmed(n, source).to_string());

    let (path, name) = if is_wildcard {
        (raw.trim_end_matches(".*").to_string(), None)
    } else if let Some((prefix, last)) = raw.rsplit_once('.') {
        (prefix.to_string(), Some(last.to_string()))
    } else {
        (raw.clone(), Some(raw))
    };

    ParsedImport {
        path,
        name,
        alias,
        is_wildcard,
        is_type_only: false,
        is_dynamic: false,
        is_template_literal: false,
    }
}

fn visibility_of(node: Node, source: &str) -> Visibility {
    if has_modifier(node, source, "private") {
        Visibility::Private
    } else if has_modifier(node, source, "protected") {
        Visibility::Protected
    } else if has_modifier(node, source, "internal") {
        Visibility::Internal
    } else {
        Visibility::Public
    }
}

fn annotations_of(node: Node, source: &str) -> Vec<ParsedAnnotation> {
    let Some(modifiers) = node
        .child_by_field_name("modifiers")
        .or_else(|| first_child_of_kind(node, "modifiers"))
    else {
        return Vec::new();
    };
    children_of_kind(modifiers, "annotation")
        .into_iter()
        .filter_map(|a| {
            first_child_of_kind(a, "user_type")
                .or_else(|| first_child_of_kind(a, "constructor_invocation"))
                .map(|u| ParsedAnnotation::bare(text_trimmed(u, source)))
        })
        .collect()
}

fn type_text(node: Node, source: &str) -> Option<String> {
    node.child_by_field_name("type")
        .map(|t| text_trimmed(t, source).to_string())
}

fn parse_class(node: Node, source: &str, file_path: &Path) -> ParsedClass {
    let name = node
        .child_by_field_name("name")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    let kind = if node.kind() == "object_declaration" {
        ClassKind::Object
    } else if has_modifier(node, source, "interface") || first_child_of_kind(node, "interface").is_some() {
        ClassKind::Interface
    } else if children_of_kind(node, "enum_class_body").len() > 0 || has_modifier(node, source, "enum") {
        ClassKind::Enum
    } else if has_modifier(node, source, "annotation") {
        ClassKind::Annotation
    } else {
        ClassKind::Class
    };

    let mut class = ParsedClass::new(name, kind, visibility_of(node, source), location(node, file_path));
    class.is_abstract = has_modifier(node, source, "abstract");
    class.is_data = has_modifier(node, source, "data");
    class.is_sealed = has_modifier(node, source, "sealed");
    class.annotations = annotations_of(node, source);

    if let Some(delegation_specifiers) = first_child_of_kind(node, "delegation_specifiers") {
        let mut supers: Vec<String> = named_children(delegation_specifiers)
            .into_iter()
            .map(|n| text_trimmed(n, source).to_string())
            .collect();
        if !supers.is_empty() {
            class.super_class = Some(supers.remove(0));
            class.interfaces = supers;
        }
    }

    if let Some(primary_ctor) = first_child_of_kind(node, "primary_constructor") {
        let mut ctor_params = Vec::new();
        for param in children_of_kind(primary_ctor, "class_parameter") {
            let param_name = param
                .child_by_field_name("name")
                .map(|n| text_trimmed(n, source).to_string())
                .unwrap_or_default();
            let param_type = type_text(param, source);
            let is_val = first_child_of_kind(param, "val").is_some();
            let is_var = first_child_of_kind(param, "var").is_some();
            if is_val || is_var {
                class.properties.push(ParsedProperty {
                    name: param_name.clone(),
                    r#type: param_type.clone(),
                    visibility: visibility_of(param, source),
                    is_val: !is_var,
                    initializer: param
                        .child_by_field_name("default_value")
                        .map(|d| text_trimmed(d, source).to_string()),
                    annotations: annotations_of(param, source),
                    location: location(param, file_path),
                });
            }
            ctor_params.push(ParsedParameter {
                name: param_name,
                r#type: param_type,
                function_type: None,
                default_value: param
                    .child_by_field_name("default_value")
                    .map(|d| text_trimmed(d, source).to_string()),
                annotations: Vec::new(),
                is_crossinline: None,
                is_noinline: None,
            });
        }
        class.secondary_constructors = Some(vec![ParsedConstructor {
            parameters: ctor_params,
            visibility: visibility_of(primary_ctor, source),
            delegates_to: None,
            annotations: Vec::new(),
            location: location(primary_ctor, file_path),
        }]);
    }

    if let Some(body) = first_child_of_kind(node, "class_body").or_else(|| first_child_of_kind(node, "enum_class_body")) {
        for member in named_children(body) {
            match member.kind() {
                "function_declaration" => class.functions.push(parse_function(member, source, file_path)),
                "property_declaration" => {
                    if let Some(destructuring) = parse_destructuring(member, source, file_path) {
                        // `ParsedClass` has no destructuring-declaration slot of its own
                        // (spec.md §3's schema only carries one at file scope) so a rare
                        // member-scope `val (a, b) = pair` is flattened into per-component
                        // properties instead of being dropped on the floor.
                        for (index, name) in destructuring.component_names.iter().enumerate() {
                            class.properties.push(ParsedProperty {
                                name: name.clone(),
                                r#type: destructuring
                                    .component_types
                                    .as_ref()
                                    .and_then(|types| types.get(index).cloned().flatten()),
                                visibility: destructuring.visibility,
                                is_val: destructuring.is_val,
                                initializer: destructuring.initializer.clone(),
                                annotations: Vec::new(),
                                location: destructuring.location.clone(),
                            });
                        }
                    } else {
                        class.properties.push(parse_property(member, source, file_path));
                    }
                }
                "class_declaration" | "object_declaration" => {
                    class.nested_classes.push(parse_class(member, source, file_path))
                }
                "companion_object" => {
                    let mut companion = ParsedClass::new(
                        member
                            .child_by_field_name("name")
                            .map(|n| text_trimmed(n, source).to_string())
                            .unwrap_or_else(|| "Companion".to_string()),
                        ClassKind::Object,
                        Visibility::Public,
                        location(member, file_path),
                    );
                    if let Some(companion_body) = first_child_of_kind(member, "class_body") {
                        for inner in named_children(companion_body) {
                            match inner.kind() {
                                "function_declaration" => {
                                    companion.functions.push(parse_function(inner, source, file_path))
                                }
                                "property_declaration" => {
                                    companion.properties.push(parse_property(inner, source, file_path))
                                }
                                _ => {}
                            }
                        }
                    }
                    class.companion_object = Some(Box::new(companion));
                }
                "secondary_constructor" => {
                    let ctor = parse_secondary_constructor(member, source, file_path);
                    class.secondary_constructors.get_or_insert_with(Vec::new).push(ctor);
                }
                _ => {}
            }
        }
    }

    class
}

fn parse_secondary_constructor(node: Node, source: &str, file_path: &Path) -> ParsedConstructor {
    let parameters = first_child_of_kind(node, "function_value_parameters")
        .map(|params| {
            children_of_kind(params, "parameter")
                .into_iter()
                .map(|p| parse_parameter(p, source))
                .collect()
        })
        .unwrap_or_default();

    let delegates_to = first_child_of_kind(node, "constructor_delegation_call").map(|d| {
        if text_trimmed(d, source).starts_with("this") {
            ConstructorDelegation::This
        } else {
            ConstructorDelegation::Super
        }
    });

    ParsedConstructor {
        parameters,
        visibility: visibility_of(node, source),
        delegates_to,
        annotations: annotations_of(node, source),
        location: location(node, file_path),
    }
}

fn parse_parameter(node: Node, source: &str) -> ParsedParameter {
    ParsedParameter {
        name: node
            .child_by_field_name("name")
            .map(|n| text_trimmed(n, source).to_string())
            .unwrap_or_default(),
        r#type: type_text(node, source),
        function_type: None,
        default_value: node
            .child_by_field_name("default_value")
            .map(|d| text_trimmed(d, source).to_string()),
        annotations: annotations_of(node, source),
        is_crossinline: Some(has_modifier(node, source, "crossinline")),
        is_noinline: Some(has_modifier(node, source, "noinline")),
    }
}

fn parse_function(node: Node, source: &str, file_path: &Path) -> ParsedFunction {
    let name = node
        .child_by_field_name("name")
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    let mut func = ParsedFunction::new(name, visibility_of(node, source), location(node, file_path));
    func.is_abstract = has_modifier(node, source, "abstract") || first_child_of_kind(node, "function_body").is_none();
    func.is_suspend = has_modifier(node, source, "suspend");
    func.is_inline = Some(has_modifier(node, source, "inline"));
    func.is_infix = Some(has_modifier(node, source, "infix"));
    func.is_operator = Some(has_modifier(node, source, "operator"));
    func.annotations = annotations_of(node, source);
    func.return_type = type_text(node, source);

    if let Some(receiver) = node.child_by_field_name("receiver") {
        func.is_extension = true;
        func.receiver_type = Some(text_trimmed(receiver, source).to_string());
    }

    if let Some(params) = first_child_of_kind(node, "function_value_parameters") {
        func.parameters = children_of_kind(params, "parameter")
            .into_iter()
            .map(|p| parse_parameter(p, source))
            .collect();
    }

    if let Some(body) = first_child_of_kind(node, "function_body") {
        func.calls = extract_calls(body, source, file_path);
    }

    func
}

fn parse_property(node: Node, source: &str, file_path: &Path) -> ParsedProperty {
    let name = first_child_of_kind(node, "variable_declaration")
        .and_then(|v| v.child_by_field_name("name"))
        .map(|n| text_trimmed(n, source).to_string())
        .unwrap_or_default();

    ParsedProperty {
        name,
        r#type: first_child_of_kind(node, "variable_declaration").and_then(|v| type_text(v, source)),
        visibility: visibility_of(node, source),
        is_val: first_child_of_kind(node, "val").is_some(),
        initializer: initializer_after_eq(node).map(|v| text_trimmed(v, source).to_string()),
        annotations: annotations_of(node, source),
        location: location(node, file_path),
    }
}

/// `val (a, b) = pair` — a property declaration whose binder is a
/// `multi_variable_declaration` rather than a single name. The initializer
/// is recovered by walking siblings after the `=` token rather than through
/// `childForFieldName("initializer")` (spec.md §4.3's Kotlin
/// destructuring-initializer note: that field name returns nothing against
/// the tree-sitter-kotlin-ng grammar).
fn parse_destructuring(node: Node, source: &str, file_path: &Path) -> Option<ParsedDestructuringDeclaration> {
    let multi = first_child_of_kind(node, "multi_variable_declaration")?;
    let components = children_of_kind(multi, "variable_declaration");
    let component_names = components
        .iter()
        .map(|c| {
            c.child_by_field_name("name")
                .map(|n| text_trimmed(n, source).to_string())
                .unwrap_or_default()
        })
        .collect();
    let component_types = Some(components.iter().map(|c| type_text(*c, source)).collect());

    Some(ParsedDestructuringDeclaration {
        component_names,
        component_types,
        initializer: initializer_after_eq(node).map(|v| text_trimmed(v, source).to_string()),
        visibility: visibility_of(node, source),
        is_val: first_child_of_kind(node, "val").is_some(),
        location: location(node, file_path),
    })
}

fn parse_type_alias(node: Node, source: &str, file_path: &Path) -> ParsedTypeAlias {
    ParsedTypeAlias {
        name: node
            .child_by_field_name("name")
            .map(|n| text_trimmed(n, source).to_string())
            .unwrap_or_default(),
        aliased_type: node
            .child_by_field_name("type")
            .map(|t| text_trimmed(t, source).to_string())
            .unwrap_or_default(),
        visibility: visibility_of(node, source),
        type_parameters: None,
        mapped_type: None,
        conditional_type: None,
        location: location(node, file_path),
    }
}

fn call_expression_name(node: Node, source: &str) -> (String, Option<String>) {
    let Some(callee) = node.child_by_field_name("function") else {
        return (text_trimmed(node, source).to_string(), None);
    };
    match callee.kind() {
        "navigation_expression" => {
            let receiver = callee
                .child_by_field_name("receiver")
                .or_else(|| callee.child(0))
                .map(|r| text_trimmed(r, source).to_string());
            let name = callee
                .child_by_field_name("suffix")
                .or_else(|| callee.child(callee.child_count().saturating_sub(1)))
                .map(|n| text_trimmed(n, source).to_string())
                .unwrap_or_default();
            (name, receiver)
        }
        _ => (text_trimmed(callee, source).to_string(), None),
    }
}

fn literal_shape(node: Node, source: &str) -> LiteralShape {
    match node.kind() {
        "integer_literal" | "hex_literal" | "bin_literal" => LiteralShape::Integer,
        "real_literal" => LiteralShape::Float,
        "line_string_literal" | "multi_line_string_literal" => LiteralShape::TemplateString,
        "boolean_literal" => LiteralShape::Boolean,
        "null_literal" => LiteralShape::Null,
        "call_expression" if text_trimmed(node, source).starts_with(char::is_uppercase) => {
            LiteralShape::Constructor(call_expression_name(node, source).0)
        }
        _ => LiteralShape::Opaque,
    }
}

fn extract_calls(node: Node, source: &str, file_path: &Path) -> Vec<ParsedCall> {
    let mut calls = Vec::new();
    walk_for_calls(node, source, file_path, &mut calls);
    calls
}

fn walk_for_calls(node: Node, source: &str, file_path: &Path, out: &mut Vec<ParsedCall>) {
    if node.kind() == "call_expression" {
        let (name, receiver) = call_expression_name(node, source);
        let is_constructor_call = name.chars().next().is_some_and(char::is_uppercase);
        let argument_types: Option<Vec<String>> = first_child_of_kind(node, "value_arguments").map(|args| {
            named_children(args)
                .into_iter()
                .map(|arg| infer_literal_type(&literal_shape(arg, source), Language::Kotlin))
                .collect()
        });
        let argument_count = argument_types.as_ref().map(|a| a.len());

        out.push(ParsedCall {
            name,
            receiver,
            receiver_type: None,
            argument_types,
            argument_count,
            is_safe_call: Some(text_trimmed(node, source).contains("?.")),
            is_constructor_call: Some(is_constructor_call),
            location: location(node, file_path),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "function_declaration" {
            walk_for_calls(child, source, file_path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParsedFile {
        KotlinParser::new().parse(source, Path::new("Repo.kt")).unwrap()
    }

    #[test]
    fn extracts_package_and_imports() {
        let file = parse("package com.example.app\nimport com.example.lib.Thing\nimport com.example.util.*\n");
        assert_eq!(file.package_name.as_deref(), Some("com.example.app"));
        assert_eq!(file.imports.len(), 2);
        assert!(file.imports[1].is_wildcard);
    }

    #[test]
    fn lifts_primary_constructor_properties() {
        let file = parse("class User(val id: Int, var name: String)\n");
        let class = &file.classes[0];
        assert_eq!(class.properties.len(), 2);
        assert!(class.properties[0].is_val);
        assert!(!class.properties[1].is_val);
    }

    #[test]
    fn marks_data_and_sealed_classes() {
        let file = parse("data class Point(val x: Int, val y: Int)\nsealed class Shape\n");
        assert!(file.classes[0].is_data);
        assert!(file.classes[1].is_sealed);
    }

    #[test]
    fn extracts_calls_with_receiver() {
        let file = parse("fun run() {\n    repo.save(user)\n}\n");
        let calls = &file.top_level_functions[0].calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "save");
        assert_eq!(calls[0].receiver.as_deref(), Some("repo"));
    }

    #[test]
    fn destructuring_declaration_recovers_initializer_positionally() {
        let file = parse("val (a, b) = pair\n");
        let destructuring = &file.destructuring_declarations[0];
        assert_eq!(destructuring.component_names, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(destructuring.initializer.as_deref(), Some("pair"));
    }
}
