//! The priority-ordered call resolver (spec.md §4.8) — the hardest single
//! piece of the core. For every call site in every file, walks a fixed
//! twelve-step chain and returns on the first step that produces a target;
//! a call nothing resolves is left as data in the unresolved list, never
//! an error (§7).

use std::collections::HashMap;

use crate::model::{
    make_fqn, nested_fqn, ClassKind, Language, ParsedCall, ParsedClass, ParsedFile, ParsedFunction,
    ResolutionOutcome, ResolvedCall, ResolvedFile, Symbol, SymbolPayload, SymbolTable,
};
use crate::resolver::overload::resolve_overload;
use crate::resolver::type_hierarchy::ancestors_of;
use crate::stdlib::provider_for;

const ENUM_SYNTHETIC_STATICS: &[&str] = &["valueOf", "values", "entries"];

/// Per-file resolution state threaded through every `resolve_call` (see
/// SPEC_FULL.md §4.8 "ResolutionContext shape"). `local_types` doubles as
/// the "running map of local-variable types" *and* the current class's own
/// properties — both answer the same question at the call site ("what type
/// does this bare name have"), so they share one map rather than two.
pub struct ResolutionContext<'a> {
    pub package: &'a str,
    pub imports: &'a HashMap<String, String>,
    pub wildcard_imports: &'a [String],
    pub current_class: Option<&'a str>,
    pub local_types: HashMap<String, String>,
    pub language: Language,
}

fn is_class_like(symbol: &Symbol) -> bool {
    matches!(symbol.payload, SymbolPayload::Class(_))
}

fn class_kind_of(table: &SymbolTable, fqn: &str) -> Option<ClassKind> {
    table.get(fqn).and_then(|s| s.as_class()).map(|c| c.kind)
}

/// Resolve a bare identifier to a class-like FQN using (in order) the
/// import map, same-package, then a unique simple-name match — the same
/// three-rung ladder the type hierarchy builder uses for superclass text.
fn resolve_class_name(name: &str, ctx: &ResolutionContext, table: &SymbolTable) -> Option<String> {
    if let Some(fqn) = ctx.imports.get(name) {
        if table.get(fqn).map(is_class_like).unwrap_or(true) {
            return Some(fqn.clone());
        }
    }
    let same_package = make_fqn(ctx.package, name);
    if table.get(&same_package).map(is_class_like).unwrap_or(false) {
        return Some(same_package);
    }
    let candidates: Vec<&str> =
        table.by_simple_name(name).into_iter().filter(|s| is_class_like(s)).map(|s| s.fqn.as_str()).collect();
    if candidates.len() == 1 {
        return Some(candidates[0].to_string());
    }
    None
}

/// Resolve a dotted receiver text (e.g. `pkg.Foo`, or a bare `Foo`) to a
/// class/object FQN, without descending into `this.`/local-variable
/// territory — that's step 4's job.
fn resolve_receiver_as_class(receiver: &str, ctx: &ResolutionContext, table: &SymbolTable) -> Option<String> {
    if table.get(receiver).map(is_class_like).unwrap_or(false) {
        return Some(receiver.to_string());
    }
    let first_segment = receiver.split('.').next().unwrap_or(receiver);
    resolve_class_name(first_segment, ctx, table)
}

fn gather_functions<'a>(table: &'a SymbolTable, name: &str) -> Vec<&'a Symbol> {
    table.functions_named(name)
}

fn resolve_on_type(type_fqn: &str, call: &ParsedCall, table: &SymbolTable) -> Option<String> {
    let candidate = format!("{type_fqn}.{}", call.name);
    if let Some(symbol) = table.get(&candidate) {
        if symbol.as_function().is_some() {
            return Some(symbol.fqn.clone());
        }
    }
    let same_name: Vec<&Symbol> = table
        .functions_named(&call.name)
        .into_iter()
        .filter(|s| s.as_function().and_then(|f| f.declaring_type_fqn.as_deref()) == Some(type_fqn))
        .collect();
    resolve_overload(&same_name, call.argument_count, call.argument_types.as_deref()).map(|s| s.fqn.clone())
}

fn resolve_inherited(type_fqn: &str, call: &ParsedCall, table: &SymbolTable) -> Option<String> {
    for ancestor in ancestors_of(table, type_fqn) {
        if let Some(resolved) = resolve_on_type(&ancestor, call, table) {
            return Some(resolved);
        }
    }
    None
}

/// Step 10: a receiver-qualified call whose receiver type matches an
/// extension function's declared `receiverType`, structurally or through
/// the type hierarchy.
fn resolve_extension(receiver_type: &str, call: &ParsedCall, table: &SymbolTable) -> Option<String> {
    let candidates: Vec<&Symbol> = table
        .functions_named(&call.name)
        .into_iter()
        .filter(|s| {
            s.as_function().map(|f| f.is_extension).unwrap_or(false)
                && s.as_function().and_then(|f| f.receiver_type.as_deref()).map(|rt| {
                    rt == receiver_type || ancestors_of(table, receiver_type).iter().any(|a| a == rt)
                }) == Some(true)
        })
        .collect();
    resolve_overload(&candidates, call.argument_count, call.argument_types.as_deref()).map(|s| s.fqn.clone())
}

/// `resolveCall(call) -> FQN | unresolved` (spec.md §4.8). Returns the
/// resolved FQN and whether this was a constructor call, or `None` for
/// unresolved.
pub fn resolve_call(call: &ParsedCall, ctx: &ResolutionContext, table: &SymbolTable) -> (Option<String>, bool) {
    // A bare `this.method()` receiver is textually "this", not a dotted
    // qualified receiver or a local-variable reference — steps 2/5/6/7-9
    // treat it the same as no receiver at all (spec.md §4.8 steps 5-6).
    let self_call = call.receiver.as_deref().is_none_or(|r| r == "this");

    // Step 1: qualified call through a dotted receiver that names a
    // known class/object/namespace.
    if let Some(receiver) = &call.receiver {
        if !receiver.starts_with("this") && receiver.contains('.') {
            if let Some(receiver_fqn) = resolve_receiver_as_class(receiver, ctx, table) {
                if let Some(resolved) = resolve_on_type(&receiver_fqn, call, table) {
                    return (Some(resolved), false);
                }
                if class_kind_of(table, &receiver_fqn) == Some(ClassKind::Enum)
                    && ENUM_SYNTHETIC_STATICS.contains(&call.name.as_str())
                {
                    return (Some(format!("{receiver_fqn}.{}", call.name)), false);
                }
            }
        }
    }

    // Step 2: constructor call.
    if self_call && call.is_constructor_call == Some(true) {
        if let Some(class_fqn) = resolve_class_name(&call.name, ctx, table) {
            return (Some(format!("{class_fqn}.<init>")), true);
        }
    }

    // Step 3: explicit receiver type already known from the parse.
    if let Some(receiver_type) = &call.receiver_type {
        if let Some(resolved) = resolve_on_type(receiver_type, call, table) {
            return (Some(resolved), false);
        }
    }

    // Step 4: receiver expression — local variable or current-class
    // property with a known type, or the receiver names a class/object.
    if let Some(receiver) = &call.receiver {
        let bare = receiver.strip_prefix("this.").unwrap_or(receiver);
        if let Some(var_type) = ctx.local_types.get(bare) {
            if let Some(resolved) = resolve_on_type(var_type, call, table) {
                return (Some(resolved), false);
            }
        }
        if !receiver.contains('.') {
            if let Some(receiver_fqn) = resolve_class_name(receiver, ctx, table) {
                if let Some(resolved) = resolve_on_type(&receiver_fqn, call, table) {
                    return (Some(resolved), false);
                }
            }
        }
    }

    // Step 5: current-class lookup (no receiver, or an explicit `this`).
    if self_call {
        if let Some(current_class) = ctx.current_class {
            if let Some(resolved) = resolve_on_type(current_class, call, table) {
                return (Some(resolved), false);
            }

            // Step 6: inherited methods.
            if let Some(resolved) = resolve_inherited(current_class, call, table) {
                return (Some(resolved), false);
            }
        }
    }

    // Step 7: explicit imports.
    if self_call {
        if let Some(fqn) = ctx.imports.get(&call.name) {
            if table.get(fqn).and_then(|s| s.as_function()).is_some() {
                return (Some(fqn.clone()), false);
            }
        }

        // Step 8: same package, top-level functions.
        let same_package_fqn = make_fqn(ctx.package, &call.name);
        let same_package: Vec<&Symbol> = table
            .functions_named(&call.name)
            .into_iter()
            .filter(|s| s.fqn == same_package_fqn || s.package_name == ctx.package)
            .collect();
        if let Some(resolved) = resolve_overload(&same_package, call.argument_count, call.argument_types.as_deref()) {
            return (Some(resolved.fqn.clone()), false);
        }

        // Step 9: wildcard imports.
        for wildcard in ctx.wildcard_imports {
            let candidates: Vec<&Symbol> = table
                .functions_named(&call.name)
                .into_iter()
                .filter(|s| &s.package_name == wildcard)
                .collect();
            if let Some(resolved) = resolve_overload(&candidates, call.argument_count, call.argument_types.as_deref())
            {
                return (Some(resolved.fqn.clone()), false);
            }
        }
    }

    // Step 10: extension functions.
    if let Some(receiver) = &call.receiver {
        let receiver_type = call
            .receiver_type
            .clone()
            .or_else(|| ctx.local_types.get(receiver.strip_prefix("this.").unwrap_or(receiver)).cloned());
        if let Some(receiver_type) = receiver_type {
            if let Some(resolved) = resolve_extension(&receiver_type, call, table) {
                return (Some(resolved), false);
            }
        }
    }

    // Step 11: top-level last resort.
    let all_named = gather_functions(table, &call.name);
    if !all_named.is_empty() {
        if all_named.len() == 1 {
            return (Some(all_named[0].fqn.clone()), false);
        }
        if let Some(resolved) = resolve_overload(&all_named, call.argument_count, call.argument_types.as_deref()) {
            return (Some(resolved.fqn.clone()), false);
        }
    }

    // Step 12: stdlib. For TypeScript/JavaScript the DOM provider is
    // consulted alongside the language provider, never in its place
    // (spec.md §4.4): `document.getElementById(...)` and bare `fetch(...)`
    // only exist in the DOM provider's tables.
    let mut providers = vec![provider_for(ctx.language)];
    if matches!(ctx.language, Language::TypeScript | Language::JavaScript) {
        providers.push(crate::stdlib::dom_provider());
    }
    for provider in providers {
        if let Some(receiver) = &call.receiver {
            let qualified = format!("{receiver}.{}", call.name);
            if let Some(symbol) = provider.lookup_static_method(&qualified) {
                return (Some(symbol.fqn.clone()), false);
            }
        } else if let Some(symbol) = provider.lookup_function(&call.name) {
            return (Some(symbol.fqn.clone()), false);
        }
    }

    (None, false)
}

/// Build the per-function resolution contexts for one file and accumulate
/// a [`ResolvedFile`]. `import_map` is the TS/JS import-resolution map from
/// [`crate::resolver::module_resolver::build_import_map`]; Kotlin/Java use
/// their own `file.imports` directly since they have no cross-file export
/// index (spec.md §4.5's heading scopes the module resolver to TS/JS).
pub fn resolve_file(file: &ParsedFile, table: &SymbolTable, import_map: &HashMap<String, String>) -> ResolvedFile {
    let package = file.package_or_file_proxy();
    let mut imports: HashMap<String, String> = import_map.clone();
    let mut wildcard_imports: Vec<String> = Vec::new();

    for import in &file.imports {
        if import.is_wildcard {
            wildcard_imports.push(import.path.clone());
            continue;
        }
        if import.is_template_literal || import.is_dynamic {
            continue;
        }
        let local_name = import.alias.clone().or_else(|| import.name.clone());
        if let Some(local_name) = local_name {
            let target_fqn = match file.language {
                Language::Kotlin | Language::Java => {
                    if let Some(simple) = import.name.clone() {
                        format!("{}.{}", import.path.rsplit_once('.').map(|(p, _)| p).unwrap_or(&import.path), simple)
                    } else {
                        import.path.clone()
                    }
                }
                Language::TypeScript | Language::JavaScript => continue,
            };
            imports.entry(local_name).or_insert(target_fqn);
        }
    }

    wildcard_imports.extend(provider_for(file.language).default_wildcard_imports.iter().cloned());

    let mut resolved = ResolvedFile::new(file.file_path.clone());

    for func in &file.top_level_functions {
        resolve_function(func, &package, None, &HashMap::new(), &imports, &wildcard_imports, file.language, table, &mut resolved);
    }
    for class in &file.classes {
        resolve_class(class, &package, &make_fqn(&package, &class.name), &imports, &wildcard_imports, file.language, table, &mut resolved);
    }

    resolved
}

fn resolve_class(
    class: &ParsedClass,
    package: &str,
    class_fqn: &str,
    imports: &HashMap<String, String>,
    wildcard_imports: &[String],
    language: Language,
    table: &SymbolTable,
    out: &mut ResolvedFile,
) {
    let property_types = class_property_types(class);
    for func in &class.functions {
        resolve_function(func, package, Some(class_fqn), &property_types, imports, wildcard_imports, language, table, out);
    }
    for nested in &class.nested_classes {
        resolve_class(nested, package, &nested_fqn(class_fqn, &nested.name), imports, wildcard_imports, language, table, out);
    }
    if let Some(companion) = &class.companion_object {
        resolve_class(companion, package, &nested_fqn(class_fqn, &companion.name), imports, wildcard_imports, language, table, out);
    }
}

fn resolve_function(
    func: &ParsedFunction,
    package: &str,
    current_class: Option<&str>,
    property_types: &HashMap<String, String>,
    imports: &HashMap<String, String>,
    wildcard_imports: &[String],
    language: Language,
    table: &SymbolTable,
    out: &mut ResolvedFile,
) {
    if func.calls.is_empty() {
        return;
    }

    let from_fqn = match current_class {
        Some(class_fqn) => nested_fqn(class_fqn, &func.name),
        None => make_fqn(package, &func.name),
    };

    let mut local_types: HashMap<String, String> = property_types.clone();
    for param in &func.parameters {
        if let Some(ty) = &param.r#type {
            local_types.insert(param.name.clone(), ty.clone());
        }
    }

    let ctx = ResolutionContext {
        package,
        imports,
        wildcard_imports,
        current_class,
        local_types,
        language,
    };

    for call in &func.calls {
        let (resolved, is_construction) = resolve_call(call, &ctx, table);
        let target = match resolved {
            Some(fqn) => ResolutionOutcome::Resolved(fqn),
            None => ResolutionOutcome::Unresolved,
        };
        out.calls.push(ResolvedCall {
            from_fqn: from_fqn.clone(),
            call: call.clone(),
            target,
            is_construction,
        });
    }
}

/// Seed `local_types` with a class's own declared properties so a bare
/// `repo.save(u)` inside a method can resolve `repo`'s type without a
/// separate "is this a property" branch (spec.md §4.8 step 4).
pub fn class_property_types(class: &ParsedClass) -> HashMap<String, String> {
    class
        .properties
        .iter()
        .filter_map(|p| p.r#type.clone().map(|t| (p.name.clone(), t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, FunctionSymbolData, SourceLocation, SymbolPayload, Visibility};
    use crate::resolver::symbol_table_builder::build_symbol_table;
    use crate::resolver::type_hierarchy::build_type_hierarchy;
    use std::path::PathBuf;

    fn loc(path: &str) -> SourceLocation {
        SourceLocation::new(PathBuf::from(path), 1, 0, 1, 0)
    }

    fn call(name: &str, receiver: Option<&str>, argument_count: Option<usize>) -> ParsedCall {
        ParsedCall {
            name: name.to_string(),
            receiver: receiver.map(|s| s.to_string()),
            receiver_type: None,
            argument_types: None,
            argument_count,
            is_safe_call: Some(false),
            is_constructor_call: Some(false),
            location: loc("pkg/Svc.kt"),
        }
    }

    /// Scenario A: `repo.save(u)` resolves to `pkg.Repo.save`, not
    /// `pkg.UserRepo.save`, because `repo`'s static type is `Repo`.
    #[test]
    fn resolves_interface_method_through_property_type_not_impl() {
        let mut repo_file = ParsedFile::empty(PathBuf::from("pkg/Repo.kt"), Language::Kotlin);
        repo_file.package_name = Some("pkg".to_string());
        let mut repo_iface = ParsedClass::new("Repo", ClassKind::Interface, Visibility::Public, loc("pkg/Repo.kt"));
        repo_iface.functions.push(ParsedFunction::new("save", Visibility::Public, loc("pkg/Repo.kt")));
        repo_file.classes.push(repo_iface);

        let mut impl_file = ParsedFile::empty(PathBuf::from("pkg/UserRepo.kt"), Language::Kotlin);
        impl_file.package_name = Some("pkg".to_string());
        let mut user_repo =
            ParsedClass::new("UserRepo", ClassKind::Class, Visibility::Public, loc("pkg/UserRepo.kt"));
        user_repo.interfaces.push("Repo".to_string());
        user_repo.functions.push(ParsedFunction::new("save", Visibility::Public, loc("pkg/UserRepo.kt")));
        impl_file.classes.push(user_repo);

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
        do_it.calls.push(call("save", Some("repo"), Some(1)));
        svc.functions.push(do_it);
        svc_file.classes.push(svc);

        let files = vec![repo_file, impl_file, svc_file];
        let mut table = build_symbol_table(&files);
        build_type_hierarchy(&files, &mut table);

        let no_imports = HashMap::new();
        let local_types = class_property_types(&files[2].classes[0]);
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &no_imports,
            wildcard_imports: &[],
            current_class: Some("pkg.Svc"),
            local_types,
            language: Language::Kotlin,
        };

        let (resolved, is_construction) = resolve_call(&call("save", Some("repo"), Some(1)), &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("pkg.Repo.save"));
        assert!(!is_construction);
    }

    /// Scenario B: `add(1, 2)` resolves to the two-arg overload by arity.
    #[test]
    fn resolves_overload_by_argument_count() {
        let mut table = SymbolTable::new();
        for (fqn, params) in [("pkg.Calc.add#1", vec!["int".to_string()]), ("pkg.Calc.add#2", vec!["int".to_string(), "int".to_string()])] {
            table.insert(Symbol {
                name: "add".to_string(),
                fqn: fqn.to_string(),
                file_path: PathBuf::from("pkg/Calc.java"),
                location: loc("pkg/Calc.java"),
                package_name: "pkg".to_string(),
                payload: SymbolPayload::Function(FunctionSymbolData {
                    declaring_type_fqn: Some("pkg.Calc".to_string()),
                    parameter_types: params,
                    return_type: Some("int".to_string()),
                    is_extension: false,
                    receiver_type: None,
                    is_suspend: Some(false),
                    is_inline: Some(false),
                    is_operator: Some(false),
                }),
            });
        }

        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: Some("pkg.Calc"),
            local_types: HashMap::new(),
            language: Language::Java,
        };

        let call = call("add", None, Some(2));
        let (resolved, _) = resolve_call(&call, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("pkg.Calc.add#2"));
    }

    /// Scenario F: `new Point(1,2)` is a constructor call;
    /// `Point.origin()` (no such method) is left unresolved.
    #[test]
    fn constructor_call_resolves_and_unknown_static_is_unresolved() {
        let mut file = ParsedFile::empty(PathBuf::from("pkg/App.java"), Language::Java);
        file.package_name = Some("pkg".to_string());
        let point = ParsedClass::new("Point", ClassKind::Class, Visibility::Public, loc("pkg/App.java"));
        file.classes.push(point);

        let table = build_symbol_table(&[file]);
        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: None,
            local_types: HashMap::new(),
            language: Language::Java,
        };

        let mut new_point = call("Point", None, Some(2));
        new_point.is_constructor_call = Some(true);
        let (resolved, is_construction) = resolve_call(&new_point, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("pkg.Point.<init>"));
        assert!(is_construction);

        let static_call = call("origin", Some("Point"), Some(0));
        let (resolved, _) = resolve_call(&static_call, &ctx, &table);
        assert!(resolved.is_none());
    }

    /// Scenario E: `"hi".shout()` resolves via the extension-function step
    /// using the string-literal receiver type.
    #[test]
    fn resolves_extension_function_via_receiver_type() {
        let mut file = ParsedFile::empty(PathBuf::from("pkg/Ext.kt"), Language::Kotlin);
        file.package_name = Some("pkg".to_string());
        let mut shout = ParsedFunction::new("shout", Visibility::Public, loc("pkg/Ext.kt"));
        shout.is_extension = true;
        shout.receiver_type = Some("String".to_string());
        file.top_level_functions.push(shout);

        let table = build_symbol_table(&[file]);
        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: None,
            local_types: HashMap::new(),
            language: Language::Kotlin,
        };

        let mut shout_call = call("shout", Some("\"hi\""), Some(0));
        shout_call.receiver_type = Some("String".to_string());
        let (resolved, _) = resolve_call(&shout_call, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("pkg.shout"));
    }

    #[test]
    fn stdlib_static_method_resolves_through_step_twelve() {
        let table = SymbolTable::new();
        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: None,
            local_types: HashMap::new(),
            language: Language::Java,
        };
        let uuid_call = call("randomUUID", Some("UUID"), Some(0));
        let (resolved, _) = resolve_call(&uuid_call, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("java.util.UUID.randomUUID"));
    }

    /// A bare `this.foo()` receiver is textually `"this"`, not a dotted
    /// qualified receiver — it must win through the current-class lookup
    /// (step 5) rather than falling through to the global simple-name
    /// last resort (step 11), which would be ambiguous here since a
    /// second, unrelated class also declares `foo`.
    #[test]
    fn this_qualified_call_resolves_through_current_class_not_global_lookup() {
        let mut owner_file = ParsedFile::empty(PathBuf::from("pkg/Owner.kt"), Language::Kotlin);
        owner_file.package_name = Some("pkg".to_string());
        let mut owner = ParsedClass::new("Owner", ClassKind::Class, Visibility::Public, loc("pkg/Owner.kt"));
        owner.functions.push(ParsedFunction::new("foo", Visibility::Public, loc("pkg/Owner.kt")));
        owner_file.classes.push(owner);

        let mut other_file = ParsedFile::empty(PathBuf::from("pkg/Other.kt"), Language::Kotlin);
        other_file.package_name = Some("pkg".to_string());
        let mut other = ParsedClass::new("Other", ClassKind::Class, Visibility::Public, loc("pkg/Other.kt"));
        other.functions.push(ParsedFunction::new("foo", Visibility::Public, loc("pkg/Other.kt")));
        other_file.classes.push(other);

        let files = vec![owner_file, other_file];
        let table = build_symbol_table(&files);

        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: Some("pkg.Owner"),
            local_types: HashMap::new(),
            language: Language::Kotlin,
        };

        let (resolved, is_construction) = resolve_call(&call("foo", Some("this"), Some(0)), &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("pkg.Owner.foo"));
        assert!(!is_construction);
    }

    /// Step 12 must also consult the DOM provider for TS/JS, not only the
    /// language's own stdlib provider.
    #[test]
    fn dom_provider_resolves_qualified_and_bare_calls() {
        let table = SymbolTable::new();
        let imports = HashMap::new();
        let ctx = ResolutionContext {
            package: "pkg",
            imports: &imports,
            wildcard_imports: &[],
            current_class: None,
            local_types: HashMap::new(),
            language: Language::TypeScript,
        };

        let get_by_id = call("getElementById", Some("document"), Some(1));
        let (resolved, _) = resolve_call(&get_by_id, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("<dom>.document.getElementById"));

        let fetch_call = call("fetch", None, Some(1));
        let (resolved, _) = resolve_call(&fetch_call, &ctx, &table);
        assert_eq!(resolved.as_deref(), Some("<dom>.fetch"));
    }
}
