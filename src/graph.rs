//! The graph writer contract (spec.md §4.9, §6). The core's responsibility
//! ends here: it produces node/edge records in the fixed vocabulary;
//! serializing them into an actual graph database is explicitly out of
//! scope (§1), so this module adds no database driver dependency.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{ClassKind, ParsedClass, ParsedFile, ResolvedFile, SourceLocation, Visibility};

/// Node labels (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeLabel {
    Package,
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
    Function,
    Property,
    TypeAlias,
}

impl From<ClassKind> for NodeLabel {
    fn from(kind: ClassKind) -> Self {
        match kind {
            ClassKind::Class => NodeLabel::Class,
            ClassKind::Interface => NodeLabel::Interface,
            ClassKind::Object => NodeLabel::Object,
            ClassKind::Enum => NodeLabel::Enum,
            ClassKind::Annotation => NodeLabel::Annotation,
        }
    }
}

/// Node identity is the FQN. Required properties per spec.md §6:
/// `name, fqn, filePath, startLine, startColumn, endLine, endColumn,
/// visibility`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub label: NodeLabel,
    pub name: String,
    pub fqn: String,
    pub file_path: PathBuf,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub visibility: Visibility,
}

/// Relationship vocabulary, fixed per spec.md §4.9:
/// `{CONTAINS, DECLARES, EXTENDS, IMPLEMENTS, CALLS, USES, RETURNS}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdgeType {
    Contains,
    Declares,
    Extends,
    Implements,
    Calls,
    Uses,
    Returns,
}

/// Edges reference FQNs; an edge to an unresolved/external target is
/// emitted with `is_external=true` rather than elided, so unresolved-call
/// volume stays visible downstream (spec.md §4.9: "an edge to an
/// unresolved target may be elided or emitted with an external flag").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub edge_type: EdgeType,
    pub from_fqn: String,
    pub to_fqn: String,
    pub is_external: bool,
    /// Call edges additionally carry the source location of the call site
    /// (spec.md §6).
    pub call_site: Option<SourceLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphBatch {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphBatch {
    fn merge(&mut self, other: GraphBatch) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }
}

/// Translate every parsed and resolved file into one [`GraphBatch`]
/// (spec.md §4.9's "Concrete emission shape").
pub fn emit(parsed: &[ParsedFile], resolved: &[ResolvedFile]) -> GraphBatch {
    let mut batch = GraphBatch::default();

    for file in parsed {
        batch.merge(emit_file(file));
    }
    for file in resolved {
        for call in &file.calls {
            let to_fqn = match &call.target {
                crate::model::ResolutionOutcome::Resolved(fqn) => fqn.clone(),
                crate::model::ResolutionOutcome::Unresolved => call.call.name.clone(),
            };
            batch.edges.push(GraphEdge {
                edge_type: EdgeType::Calls,
                from_fqn: call.from_fqn.clone(),
                to_fqn,
                is_external: !call.target.is_resolved(),
                call_site: Some(call.call.location.clone()),
            });
        }
    }

    batch
}

fn emit_file(file: &ParsedFile) -> GraphBatch {
    let mut batch = GraphBatch::default();
    let package = file.package_or_file_proxy();

    let package_node_fqn = package.clone();
    batch.nodes.push(GraphNode {
        label: NodeLabel::Package,
        name: package.clone(),
        fqn: package_node_fqn.clone(),
        file_path: file.file_path.clone(),
        start_line: 1,
        start_column: 0,
        end_line: 1,
        end_column: 0,
        visibility: Visibility::Public,
    });

    for class in &file.classes {
        let class_fqn = crate::model::make_fqn(&package, &class.name);
        emit_class(class, &class_fqn, &mut batch);
        batch.edges.push(contains(&package_node_fqn, &class_fqn));
    }
    for func in &file.top_level_functions {
        let fqn = crate::model::make_fqn(&package, &func.name);
        batch.nodes.push(GraphNode {
            label: NodeLabel::Function,
            name: func.name.clone(),
            fqn: fqn.clone(),
            file_path: func.location.file_path.clone(),
            start_line: func.location.start_line,
            start_column: func.location.start_column,
            end_line: func.location.end_line,
            end_column: func.location.end_column,
            visibility: func.visibility,
        });
        batch.edges.push(contains(&package_node_fqn, &fqn));
        if let Some(return_type) = &func.return_type {
            batch.edges.push(uses_or_returns(EdgeType::Returns, &fqn, return_type));
        }
        for param in &func.parameters {
            if let Some(ty) = &param.r#type {
                batch.edges.push(uses_or_returns(EdgeType::Uses, &fqn, ty));
            }
        }
    }
    for prop in &file.top_level_properties {
        let fqn = crate::model::make_fqn(&package, &prop.name);
        batch.nodes.push(GraphNode {
            label: NodeLabel::Property,
            name: prop.name.clone(),
            fqn: fqn.clone(),
            file_path: prop.location.file_path.clone(),
            start_line: prop.location.start_line,
            start_column: prop.location.start_column,
            end_line: prop.location.end_line,
            end_column: prop.location.end_column,
            visibility: prop.visibility,
        });
        batch.edges.push(contains(&package_node_fqn, &fqn));
        if let Some(ty) = &prop.r#type {
            batch.edges.push(uses_or_returns(EdgeType::Uses, &fqn, ty));
        }
    }
    for alias in &file.type_aliases {
        let fqn = crate::model::make_fqn(&package, &alias.name);
        batch.nodes.push(GraphNode {
            label: NodeLabel::TypeAlias,
            name: alias.name.clone(),
            fqn: fqn.clone(),
            file_path: alias.location.file_path.clone(),
            start_line: alias.location.start_line,
            start_column: alias.location.start_column,
            end_line: alias.location.end_line,
            end_column: alias.location.end_column,
            visibility: alias.visibility,
        });
        batch.edges.push(contains(&package_node_fqn, &fqn));
    }

    batch
}

fn emit_class(class: &ParsedClass, class_fqn: &str, batch: &mut GraphBatch) {
    batch.nodes.push(GraphNode {
        label: class.kind.into(),
        name: class.name.clone(),
        fqn: class_fqn.to_string(),
        file_path: class.location.file_path.clone(),
        start_line: class.location.start_line,
        start_column: class.location.start_column,
        end_line: class.location.end_line,
        end_column: class.location.end_column,
        visibility: class.visibility,
    });

    if let Some(super_class) = &class.super_class {
        batch.edges.push(extends_or_implements(EdgeType::Extends, class_fqn, super_class));
    }
    for interface in &class.interfaces {
        let edge_type = if class.kind == ClassKind::Interface { EdgeType::Extends } else { EdgeType::Implements };
        batch.edges.push(extends_or_implements(edge_type, class_fqn, interface));
    }

    for func in &class.functions {
        let fqn = crate::model::nested_fqn(class_fqn, &func.name);
        batch.nodes.push(GraphNode {
            label: NodeLabel::Function,
            name: func.name.clone(),
            fqn: fqn.clone(),
            file_path: func.location.file_path.clone(),
            start_line: func.location.start_line,
            start_column: func.location.start_column,
            end_line: func.location.end_line,
            end_column: func.location.end_column,
            visibility: func.visibility,
        });
        batch.edges.push(declares(class_fqn, &fqn));
        if let Some(return_type) = &func.return_type {
            batch.edges.push(uses_or_returns(EdgeType::Returns, &fqn, return_type));
        }
        for param in &func.parameters {
            if let Some(ty) = &param.r#type {
                batch.edges.push(uses_or_returns(EdgeType::Uses, &fqn, ty));
            }
        }
    }
    for prop in &class.properties {
        let fqn = crate::model::nested_fqn(class_fqn, &prop.name);
        batch.nodes.push(GraphNode {
            label: NodeLabel::Property,
            name: prop.name.clone(),
            fqn: fqn.clone(),
            file_path: prop.location.file_path.clone(),
            start_line: prop.location.start_line,
            start_column: prop.location.start_column,
            end_line: prop.location.end_line,
            end_column: prop.location.end_column,
            visibility: prop.visibility,
        });
        batch.edges.push(declares(class_fqn, &fqn));
        if let Some(ty) = &prop.r#type {
            batch.edges.push(uses_or_returns(EdgeType::Uses, &fqn, ty));
        }
    }
    for nested in &class.nested_classes {
        let nested_fqn = crate::model::nested_fqn(class_fqn, &nested.name);
        emit_class(nested, &nested_fqn, batch);
        batch.edges.push(declares(class_fqn, &nested_fqn));
    }
    if let Some(companion) = &class.companion_object {
        let companion_fqn = crate::model::nested_fqn(class_fqn, &companion.name);
        emit_class(companion, &companion_fqn, batch);
        batch.edges.push(declares(class_fqn, &companion_fqn));
    }
}

fn contains(from_fqn: &str, to_fqn: &str) -> GraphEdge {
    GraphEdge { edge_type: EdgeType::Contains, from_fqn: from_fqn.to_string(), to_fqn: to_fqn.to_string(), is_external: false, call_site: None }
}

fn declares(from_fqn: &str, to_fqn: &str) -> GraphEdge {
    GraphEdge { edge_type: EdgeType::Declares, from_fqn: from_fqn.to_string(), to_fqn: to_fqn.to_string(), is_external: false, call_site: None }
}

fn extends_or_implements(edge_type: EdgeType, from_fqn: &str, to_name: &str) -> GraphEdge {
    GraphEdge { edge_type, from_fqn: from_fqn.to_string(), to_fqn: to_name.to_string(), is_external: true, call_site: None }
}

fn uses_or_returns(edge_type: EdgeType, from_fqn: &str, type_name: &str) -> GraphEdge {
    GraphEdge { edge_type, from_fqn: from_fqn.to_string(), to_fqn: type_name.to_string(), is_external: true, call_site: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Language, ResolutionOutcome, ResolvedCall, Visibility};

    fn loc(path: &str) -> SourceLocation {
        SourceLocation::new(PathBuf::from(path), 1, 0, 1, 0)
    }

    #[test]
    fn emits_package_class_and_contains_edge() {
        let mut file = ParsedFile::empty(PathBuf::from("pkg/Widget.kt"), Language::Kotlin);
        file.package_name = Some("pkg".to_string());
        file.classes.push(ParsedClass::new("Widget", ClassKind::Class, Visibility::Public, loc("pkg/Widget.kt")));

        let batch = emit(&[file], &[]);
        assert!(batch.nodes.iter().any(|n| n.label == NodeLabel::Package && n.fqn == "pkg"));
        assert!(batch.nodes.iter().any(|n| n.label == NodeLabel::Class && n.fqn == "pkg.Widget"));
        assert!(batch
            .edges
            .iter()
            .any(|e| e.edge_type == EdgeType::Contains && e.from_fqn == "pkg" && e.to_fqn == "pkg.Widget"));
    }

    #[test]
    fn unresolved_call_edge_is_flagged_external() {
        let mut resolved_file = ResolvedFile::new(PathBuf::from("pkg/App.java"));
        resolved_file.calls.push(ResolvedCall {
            from_fqn: "pkg.App.run".to_string(),
            call: crate::model::ParsedCall {
                name: "origin".to_string(),
                receiver: Some("Point".to_string()),
                receiver_type: None,
                argument_types: None,
                argument_count: Some(0),
                is_safe_call: Some(false),
                is_constructor_call: Some(false),
                location: loc("pkg/App.java"),
            },
            target: ResolutionOutcome::Unresolved,
            is_construction: false,
        });

        let batch = emit(&[], &[resolved_file]);
        let edge = batch.edges.iter().find(|e| e.edge_type == EdgeType::Calls).unwrap();
        assert!(edge.is_external);
    }

    #[test]
    fn interface_extending_interface_emits_extends_not_implements() {
        let mut file = ParsedFile::empty(PathBuf::from("pkg/Base.kt"), Language::Kotlin);
        file.package_name = Some("pkg".to_string());
        let mut iface = ParsedClass::new("Sub", ClassKind::Interface, Visibility::Public, loc("pkg/Base.kt"));
        iface.interfaces.push("Base".to_string());
        file.classes.push(iface);

        let batch = emit(&[file], &[]);
        assert!(batch.edges.iter().any(|e| e.edge_type == EdgeType::Extends && e.to_fqn == "Base"));
        assert!(!batch.edges.iter().any(|e| e.edge_type == EdgeType::Implements));
    }
}
