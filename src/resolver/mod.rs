//! The resolver: consumes every parsed file, builds a symbol table keyed
//! by FQN, and resolves every unqualified call and type reference (spec.md
//! §4.5–§4.8). This is the join point of the pipeline (§5) — it requires
//! the complete set of [`crate::model::ParsedFile`]s before it can start.

pub mod call_resolver;
pub mod module_resolver;
pub mod overload;
pub mod symbol_table_builder;
pub mod type_hierarchy;

use std::collections::HashMap;

use rayon::prelude::*;

use crate::model::{ParsedFile, ResolvedFile, SymbolTable};
use crate::stats::ResolutionStats;

pub use call_resolver::{resolve_call, ResolutionContext};
pub use module_resolver::{build_export_index, build_import_map, resolve_module_path, ExportEntry};
pub use symbol_table_builder::build_symbol_table;
pub use type_hierarchy::{ancestors_of, build_type_hierarchy, find_inherited_method, is_subtype_of};

/// Run the full resolution phase: build the export index and import maps
/// (TS/JS only), build the symbol table, materialize the type hierarchy,
/// then resolve every call site in every file. The per-file resolution
/// fan-out is parallel-safe because the symbol table, import maps, type
/// hierarchy, and stdlib providers are all read-only from this point
/// forward (§5).
pub fn resolve_all(files: &[ParsedFile]) -> (SymbolTable, Vec<ResolvedFile>, ResolutionStats) {
    let mut table = build_symbol_table(files);
    build_type_hierarchy(files, &mut table);

    let export_index = build_export_index(files);
    let empty_map: HashMap<String, String> = HashMap::new();

    let resolved: Vec<ResolvedFile> = files
        .par_iter()
        .map(|file| {
            let import_map = if export_index.contains_key(&file.file_path) {
                build_import_map(file, files, &export_index)
            } else {
                empty_map.clone()
            };
            call_resolver::resolve_file(file, &table, &import_map)
        })
        .collect();

    let stats = ResolutionStats::from_resolved_files(&resolved);
    (table, resolved, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, Language, ParsedClass, ParsedFunction, SourceLocation, Visibility};
    use std::path::PathBuf;

    fn loc(path: &str) -> SourceLocation {
        SourceLocation::new(PathBuf::from(path), 1, 0, 1, 0)
    }

    /// Resolver determinism (spec.md §8): a fixed set of files produces the
    /// same resolved calls regardless of iteration order.
    #[test]
    fn resolution_is_order_independent() {
        let mut repo_file = ParsedFile::empty(PathBuf::from("pkg/Repo.kt"), Language::Kotlin);
        repo_file.package_name = Some("pkg".to_string());
        let mut repo_iface = ParsedClass::new("Repo", ClassKind::Interface, Visibility::Public, loc("pkg/Repo.kt"));
        repo_iface.functions.push(ParsedFunction::new("save", Visibility::Public, loc("pkg/Repo.kt")));
        repo_file.classes.push(repo_iface);

        let mut svc_file = ParsedFile::empty(PathBuf::from("pkg/Svc.kt"), Language::Kotlin);
        svc_file.package_name = Some("pkg".to_string());
        let mut svc = ParsedClass::new("Svc", ClassKind::Class, Visibility::Public, loc("pkg/Svc.kt"));
        svc.properties.push(crate::model::ParsedProperty {
            name: "repo".to_string(),
            r#type: Some("Repo".to_string()),
            visibility: Visibility::Public,
            is_val: true,
            initializer: None,
            annotations: Vec::new(),
            location: loc("pkg/Svc.kt"),
        });
        let mut do_it = ParsedFunction::new("doIt", Visibility::Public, loc("pkg/Svc.kt"));
        do_it.calls.push(crate::model::ParsedCall {
            name: "save".to_string(),
            receiver: Some("repo".to_string()),
            receiver_type: None,
            argument_types: None,
            argument_count: Some(1),
            is_safe_call: Some(false),
            is_constructor_call: Some(false),
            location: loc("pkg/Svc.kt"),
        });
        svc.functions.push(do_it);
        svc_file.classes.push(svc);

        let forward = vec![repo_file.clone(), svc_file.clone()];
        let reversed = vec![svc_file, repo_file];

        let (_, resolved_forward, _) = resolve_all(&forward);
        let (_, resolved_reversed, _) = resolve_all(&reversed);

        let forward_targets: Vec<_> =
            resolved_forward.iter().flat_map(|f| f.calls.iter().map(|c| c.target.clone())).collect();
        let reversed_targets: Vec<_> =
            resolved_reversed.iter().flat_map(|f| f.calls.iter().map(|c| c.target.clone())).collect();

        assert_eq!(forward_targets, reversed_targets);
        assert!(forward_targets.iter().any(|t| t.fqn() == Some("pkg.Repo.save")));
    }
}
