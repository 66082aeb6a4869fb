//! Small tree-sitter helper facade shared by [`super::kotlin`] and
//! [`super::java`], grounded on the direct node-walking style the pack's
//! tree-sitter-based extractors use (`node.kind()`, `child_by_field_name`,
//! `content[byte_range]`, `start_position().row`).

use std::path::Path;

use tree_sitter::Node;

use crate::model::SourceLocation;

/// The node's source text, as written — not normalized or trimmed.
pub fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

pub fn text_trimmed<'a>(node: Node, source: &'a str) -> &'a str {
    text(node, source).trim()
}

/// Convert a tree-sitter range (0-based rows, 0-based columns) into a
/// [`SourceLocation`] (1-based start line, matching the rest of the model).
pub fn location(node: Node, file_path: &Path) -> SourceLocation {
    let start = node.start_position();
    let end = node.end_position();
    SourceLocation::new(
        file_path.to_path_buf(),
        start.row as u32 + 1,
        start.column as u32,
        end.row as u32 + 1,
        end.column as u32,
    )
}

/// First direct child whose `kind()` matches.
pub fn first_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

/// All direct children whose `kind()` matches, in source order.
pub fn children_of_kind<'a>(node: Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect()
}

/// All direct children, skipping anonymous/punctuation nodes.
pub fn named_children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// The first direct child appearing after a bare `=` token among `node`'s
/// children. `tree-sitter-kotlin-ng`'s `property_declaration` does not
/// expose its initializer through `childForFieldName("initializer")` (an
/// explicit test comment in the grammar's own suite notes this returns
/// nothing), so initializers are recovered positionally instead.
pub fn initializer_after_eq<'a>(node: Node<'a>) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let mut seen_eq = false;
    for child in node.children(&mut cursor) {
        if seen_eq {
            return Some(child);
        }
        if child.kind() == "=" {
            seen_eq = true;
        }
    }
    None
}

/// Whether any direct child under `modifiers_field` (by field name, falling
/// back to a bare `modifiers` child) has source text equal to `keyword`.
pub fn has_modifier(node: Node, source: &str, keyword: &str) -> bool {
    let modifiers = node
        .child_by_field_name("modifiers")
        .or_else(|| first_child_of_kind(node, "modifiers"));
    let Some(modifiers) = modifiers else {
        return false;
    };
    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .any(|m| text(m, source).trim() == keyword || descendants_text_contains(m, source, keyword))
}

fn descendants_text_contains(node: Node, source: &str, keyword: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| text(c, source).trim() == keyword)
}
