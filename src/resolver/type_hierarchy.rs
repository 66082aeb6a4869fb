//! Materializes `SymbolTable::type_hierarchy` from every class's raw
//! `superClass`/`interfaces` text, then walks it to answer "is B an
//! ancestor of A" and "what does A inherit" (spec.md §4.7). Every walk is
//! hop-limited: a hierarchy built from raw source text can contain cycles
//! the extractor never validated.

use std::collections::{HashMap, HashSet};

use crate::model::{make_fqn, nested_fqn, ParsedClass, ParsedFile, SymbolTable};

const MAX_HIERARCHY_DEPTH: usize = 64;

/// For each class (recursively through nested classes and companion
/// objects), resolve its `superClass` and each of its `interfaces` to an
/// FQN using, in order: (a) exact-FQN match, (b) same-package match, (c)
/// unique simple-name match in `byName`. Unresolved text is stored
/// verbatim — still reachable for traversal, but it won't resolve
/// further. Superclass is appended first, then interfaces in declaration
/// order (spec.md §4.7).
pub fn build_type_hierarchy(files: &[ParsedFile], table: &mut SymbolTable) {
    let mut hierarchy = HashMap::new();
    for file in files {
        let package = file.package_or_file_proxy();
        for class in &file.classes {
            walk_class(class, &package, &make_fqn(&package, &class.name), table, &mut hierarchy);
        }
    }
    table.type_hierarchy = hierarchy;
}

fn walk_class(
    class: &ParsedClass,
    package: &str,
    fqn: &str,
    table: &SymbolTable,
    hierarchy: &mut HashMap<String, Vec<String>>,
) {
    let mut parents = Vec::new();
    if let Some(super_class) = &class.super_class {
        parents.push(resolve_parent(super_class, package, table));
    }
    for interface in &class.interfaces {
        parents.push(resolve_parent(interface, package, table));
    }
    hierarchy.insert(fqn.to_string(), parents);

    for nested in &class.nested_classes {
        walk_class(nested, package, &nested_fqn(fqn, &nested.name), table, hierarchy);
    }
    if let Some(companion) = &class.companion_object {
        walk_class(companion, package, &nested_fqn(fqn, &companion.name), table, hierarchy);
    }
}

fn resolve_parent(raw: &str, package: &str, table: &SymbolTable) -> String {
    let raw = raw.trim();

    if is_class_like(table.get(raw)) {
        return raw.to_string();
    }

    let same_package = make_fqn(package, raw);
    if is_class_like(table.get(&same_package)) {
        return same_package;
    }

    let candidates: Vec<&str> = table
        .by_simple_name(raw)
        .into_iter()
        .filter(|sym| is_class_like(Some(sym)))
        .map(|sym| sym.fqn.as_str())
        .collect();
    if candidates.len() == 1 {
        return candidates[0].to_string();
    }

    raw.to_string()
}

fn is_class_like(symbol: Option<&crate::model::Symbol>) -> bool {
    matches!(symbol.map(|s| &s.payload), Some(crate::model::SymbolPayload::Class(_)))
}

/// Breadth-first walk of `fqn`'s ancestors, superclass-first per level,
/// stopping at [`MAX_HIERARCHY_DEPTH`] or once every reachable node has
/// been visited (whichever comes first).
pub fn ancestors_of(table: &SymbolTable, fqn: &str) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut frontier = vec![fqn.to_string()];
    visited.insert(fqn.to_string());

    for _ in 0..MAX_HIERARCHY_DEPTH {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for current in &frontier {
            for parent in table.parents_of(current) {
                if visited.insert(parent.clone()) {
                    order.push(parent.clone());
                    next.push(parent.clone());
                }
            }
        }
        frontier = next;
    }

    order
}

/// `true` if `candidate_ancestor_fqn` appears anywhere in `fqn`'s ancestor
/// chain (including via multiple interfaces).
pub fn is_subtype_of(table: &SymbolTable, fqn: &str, candidate_ancestor_fqn: &str) -> bool {
    if fqn == candidate_ancestor_fqn {
        return true;
    }
    ancestors_of(table, fqn).iter().any(|a| a == candidate_ancestor_fqn)
}

/// Walk `fqn`'s ancestors in declaration order (nearest first) looking for
/// a method named `method_name`; used by the inherited-method resolution
/// step (spec.md §4.8 step 6).
pub fn find_inherited_method<'a>(
    table: &'a SymbolTable,
    fqn: &str,
    method_name: &str,
) -> Option<&'a crate::model::Symbol> {
    for ancestor_fqn in ancestors_of(table, fqn) {
        let candidate = format!("{ancestor_fqn}.{method_name}");
        if let Some(symbol) = table.get(&candidate) {
            if symbol.as_function().is_some() {
                return Some(symbol);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_hierarchy(edges: &[(&str, &[&str])]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (fqn, parents) in edges {
            table
                .type_hierarchy
                .insert(fqn.to_string(), parents.iter().map(|p| p.to_string()).collect());
        }
        table
    }

    #[test]
    fn walks_multi_level_hierarchy() {
        let table = table_with_hierarchy(&[("C", &["B"]), ("B", &["A"]), ("A", &[])]);
        let ancestors = ancestors_of(&table, "C");
        assert_eq!(ancestors, vec!["B".to_string(), "A".to_string()]);
        assert!(is_subtype_of(&table, "C", "A"));
    }

    #[test]
    fn cyclic_hierarchy_does_not_hang() {
        let table = table_with_hierarchy(&[("A", &["B"]), ("B", &["A"])]);
        let ancestors = ancestors_of(&table, "A");
        assert_eq!(ancestors, vec!["B".to_string()]);
    }

    /// Scenario A: `UserRepo : Repo` in the same package resolves to
    /// `pkg.Repo` via the same-package rule, not left as raw text.
    #[test]
    fn builds_hierarchy_from_parsed_classes_in_same_package() {
        use crate::model::{ClassKind, Language, ParsedFunction, SourceLocation, Visibility};
        use std::path::PathBuf;

        let loc = |p: &str| SourceLocation::new(PathBuf::from(p), 1, 0, 1, 0);

        let mut repo_file = ParsedFile::empty(PathBuf::from("pkg/Repo.kt"), Language::Kotlin);
        repo_file.package_name = Some("pkg".to_string());
        let mut repo_iface = ParsedClass::new("Repo", ClassKind::Interface, Visibility::Public, loc("pkg/Repo.kt"));
        repo_iface.functions.push(ParsedFunction::new("save", Visibility::Public, loc("pkg/Repo.kt")));
        repo_file.classes.push(repo_iface);

        let mut impl_file = ParsedFile::empty(PathBuf::from("pkg/UserRepo.kt"), Language::Kotlin);
        impl_file.package_name = Some("pkg".to_string());
        let mut user_repo = ParsedClass::new("UserRepo", ClassKind::Class, Visibility::Public, loc("pkg/UserRepo.kt"));
        user_repo.interfaces.push("Repo".to_string());
        impl_file.classes.push(user_repo);

        let files = vec![repo_file, impl_file];
        let mut table = crate::resolver::symbol_table_builder::build_symbol_table(&files);
        build_type_hierarchy(&files, &mut table);

        assert_eq!(table.parents_of("pkg.UserRepo"), &["pkg.Repo".to_string()]);
    }
}
