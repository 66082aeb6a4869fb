//! TypeScript/JavaScript path resolution and the cross-file export index
//! (spec.md §4.5). Kotlin/Java are package-qualified, not file-path
//! qualified, so this module is exercised only for TypeScript/JavaScript.
//!
//! Path resolution reuses the teacher's extension-probing shape
//! (`analyzer/resolvers.rs::resolve_js_relative`), generalized to the fixed
//! spec order: exact match, then each of the known extensions, then
//! `/index.*`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::model::{make_fqn, Language, ParsedFile, SymbolKind};

const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// One exported name's provenance. Re-exports carry `fqn=""` until the
/// chain is walked to a non-re-export entry (spec.md §4.5 step 1).
#[derive(Debug, Clone)]
pub struct ExportEntry {
    pub exported_name: String,
    pub original_name: Option<String>,
    pub fqn: String,
    pub kind: SymbolKind,
    pub is_default: bool,
    pub is_reexport: bool,
    pub source_file_path: Option<PathBuf>,
}

/// `resolveModulePath(importPath, fromFile, knownFiles)` (spec.md §4.5
/// step 2). Bare-package imports (not starting with `.` or `/`) are left
/// unresolved; ambiguity is broken by `RESOLVE_EXTENSIONS`' fixed order.
pub fn resolve_module_path(import_path: &str, from_file: &Path, known_files: &HashSet<PathBuf>) -> Option<PathBuf> {
    if !(import_path.starts_with('.') || import_path.starts_with('/')) {
        return None;
    }

    let base = if import_path.starts_with('/') {
        PathBuf::from(import_path.trim_start_matches('/'))
    } else {
        from_file.parent()?.join(import_path)
    };
    let normalized = normalize(&base);

    if known_files.contains(&normalized) {
        return Some(normalized);
    }
    for ext in RESOLVE_EXTENSIONS {
        let candidate = normalize(&normalized.with_extension(ext));
        if known_files.contains(&candidate) {
            return Some(candidate);
        }
    }
    for ext in RESOLVE_EXTENSIONS {
        let candidate = normalize(&normalized.join(format!("index.{ext}")));
        if known_files.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        use std::path::Component;
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Build the per-file export index (spec.md §4.5 step 1). Classes
/// (including nested, prefixed under the outer FQN), top-level functions,
/// top-level properties, and type aliases each produce one entry.
pub fn build_export_index(files: &[ParsedFile]) -> HashMap<PathBuf, Vec<ExportEntry>> {
    let mut index = HashMap::new();
    for file in files {
        if !matches!(file.language, Language::TypeScript | Language::JavaScript) {
            continue;
        }
        let package = file.package_or_file_proxy();
        let mut entries = Vec::new();

        for class in &file.classes {
            push_class_entries(class, &package, &mut entries);
        }
        for func in &file.top_level_functions {
            entries.push(ExportEntry {
                exported_name: func.name.clone(),
                original_name: Some(func.name.clone()),
                fqn: make_fqn(&package, &func.name),
                kind: SymbolKind::Function,
                is_default: false,
                is_reexport: false,
                source_file_path: None,
            });
        }
        for prop in &file.top_level_properties {
            entries.push(ExportEntry {
                exported_name: prop.name.clone(),
                original_name: Some(prop.name.clone()),
                fqn: make_fqn(&package, &prop.name),
                kind: SymbolKind::Property,
                is_default: false,
                is_reexport: false,
                source_file_path: None,
            });
        }
        for alias in &file.type_aliases {
            entries.push(ExportEntry {
                exported_name: alias.name.clone(),
                original_name: Some(alias.name.clone()),
                fqn: make_fqn(&package, &alias.name),
                kind: SymbolKind::TypeAlias,
                is_default: false,
                is_reexport: false,
                source_file_path: None,
            });
        }

        let known_files: HashSet<PathBuf> = files.iter().map(|f| f.file_path.clone()).collect();
        for reexport in &file.reexports {
            let source_file_path = resolve_module_path(&reexport.source_path, &file.file_path, &known_files);
            let exported_name = reexport
                .exported_name
                .clone()
                .or_else(|| reexport.original_name.clone())
                .unwrap_or_else(|| "*".to_string());
            entries.push(ExportEntry {
                exported_name,
                original_name: reexport.original_name.clone(),
                fqn: String::new(),
                kind: SymbolKind::Class,
                is_default: false,
                is_reexport: true,
                source_file_path,
            });
        }

        index.insert(file.file_path.clone(), entries);
    }
    index
}

fn push_class_entries(class: &crate::model::ParsedClass, package: &str, out: &mut Vec<ExportEntry>) {
    let fqn = make_fqn(package, &class.name);
    out.push(ExportEntry {
        exported_name: class.name.clone(),
        original_name: Some(class.name.clone()),
        fqn: fqn.clone(),
        kind: SymbolKind::Class,
        is_default: false,
        is_reexport: false,
        source_file_path: None,
    });
    for nested in &class.nested_classes {
        push_nested_class_entries(nested, &fqn, out);
    }
}

fn push_nested_class_entries(class: &crate::model::ParsedClass, enclosing_fqn: &str, out: &mut Vec<ExportEntry>) {
    let fqn = crate::model::nested_fqn(enclosing_fqn, &class.name);
    out.push(ExportEntry {
        exported_name: class.name.clone(),
        original_name: Some(class.name.clone()),
        fqn: fqn.clone(),
        kind: SymbolKind::Class,
        is_default: false,
        is_reexport: false,
        source_file_path: None,
    });
    for nested in &class.nested_classes {
        push_nested_class_entries(nested, &fqn, out);
    }
}

/// Follow a re-export chain to the original, non-re-export entry.
/// Guards against cycles with a hop limit — malformed input (a re-export
/// cycle) should not hang resolution.
fn follow_reexport<'a>(
    entry: &'a ExportEntry,
    index: &'a HashMap<PathBuf, Vec<ExportEntry>>,
    max_hops: usize,
) -> Option<&'a ExportEntry> {
    if !entry.is_reexport {
        return Some(entry);
    }
    if max_hops == 0 {
        return None;
    }
    let source_path = entry.source_file_path.as_ref()?;
    let name = entry.original_name.as_deref().unwrap_or(&entry.exported_name);
    let next = index
        .get(source_path)?
        .iter()
        .find(|e| e.exported_name == name || e.is_default && name == "default")?;
    follow_reexport(next, index, max_hops - 1)
}

/// `resolveImportResolutionMap` (spec.md §4.5 step 3): local name visible in
/// `file` -> FQN of the originally declared symbol. The file's own local
/// declarations are included too, so intra-file references resolve without
/// consulting the symbol table.
pub fn build_import_map(
    file: &ParsedFile,
    files: &[ParsedFile],
    export_index: &HashMap<PathBuf, Vec<ExportEntry>>,
) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let package = file.package_or_file_proxy();

    for class in &file.classes {
        map.insert(class.name.clone(), make_fqn(&package, &class.name));
    }
    for func in &file.top_level_functions {
        map.insert(func.name.clone(), make_fqn(&package, &func.name));
    }
    for prop in &file.top_level_properties {
        map.insert(prop.name.clone(), make_fqn(&package, &prop.name));
    }
    for alias in &file.type_aliases {
        map.insert(alias.name.clone(), make_fqn(&package, &alias.name));
    }

    let known_files: HashSet<PathBuf> = files.iter().map(|f| f.file_path.clone()).collect();
    for import in &file.imports {
        if import.is_wildcard || import.is_template_literal {
            continue;
        }
        let Some(resolved_path) = resolve_module_path(&import.path, &file.file_path, &known_files) else {
            continue;
        };
        let Some(entries) = export_index.get(&resolved_path) else {
            continue;
        };
        let wanted = import.name.as_deref().unwrap_or("default");
        let Some(entry) = entries.iter().find(|e| {
            e.exported_name == wanted || (wanted == "default" && e.is_default)
        }) else {
            continue;
        };
        let Some(resolved) = follow_reexport(entry, export_index, 16) else {
            continue;
        };
        let local_name = import.alias.clone().unwrap_or_else(|| wanted.to_string());
        map.insert(local_name, resolved.fqn.clone());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, ParsedClass, SourceLocation, Visibility};

    fn file(path: &str, language: Language) -> ParsedFile {
        ParsedFile::empty(PathBuf::from(path), language)
    }

    fn loc(path: &str) -> SourceLocation {
        SourceLocation::new(path, 1, 0, 1, 0)
    }

    #[test]
    fn resolves_relative_import_with_probed_extension() {
        let known: HashSet<PathBuf> = [PathBuf::from("src/models/User.ts")].into_iter().collect();
        let resolved =
            resolve_module_path("./User", Path::new("src/models/index.ts"), &known).unwrap();
        assert_eq!(resolved, PathBuf::from("src/models/User.ts"));
    }

    #[test]
    fn resolves_directory_import_via_index() {
        let known: HashSet<PathBuf> = [PathBuf::from("src/models/index.ts")].into_iter().collect();
        let resolved = resolve_module_path("./models", Path::new("src/app.ts"), &known).unwrap();
        assert_eq!(resolved, PathBuf::from("src/models/index.ts"));
    }

    #[test]
    fn bare_package_import_is_unresolved() {
        let known: HashSet<PathBuf> = HashSet::new();
        assert!(resolve_module_path("react", Path::new("src/app.ts"), &known).is_none());
    }

    /// Scenario C: `src/models/User.ts` exports `User`; `src/models/index.ts`
    /// re-exports it; `src/app.ts` imports `User` from `./models`.
    #[test]
    fn follows_reexport_chain_to_original_declaration() {
        let mut user_file = file("src/models/User.ts", Language::TypeScript);
        user_file
            .classes
            .push(ParsedClass::new("User", ClassKind::Class, Visibility::Public, loc("src/models/User.ts")));

        let mut index_file = file("src/models/index.ts", Language::TypeScript);
        index_file.reexports.push(crate::model::ParsedReexport {
            source_path: "./User".to_string(),
            original_name: Some("User".to_string()),
            exported_name: Some("User".to_string()),
            is_namespace_reexport: false,
            is_wildcard: false,
            is_type_only: false,
        });

        let mut app_file = file("src/app.ts", Language::TypeScript);
        app_file.imports.push(crate::model::ParsedImport::named("./models", "User"));

        let files = vec![user_file, index_file, app_file.clone()];
        let export_index = build_export_index(&files);

        let index_entries = &export_index[Path::new("src/models/index.ts")];
        assert!(index_entries[0].is_reexport);

        let import_map = build_import_map(&app_file, &files, &export_index);
        assert_eq!(import_map.get("User").unwrap(), "src/models/User.ts.User");
    }
}
