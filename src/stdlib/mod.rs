//! Pre-baked symbol tables for each language's standard library (spec.md
//! §4.4). Declarative data, never code-generated: each provider is a
//! `Lazy<StdlibProvider>` populated from a plain list literal in its own
//! file, the way the registry (`parser/registry.rs`) caches its parsers —
//! built once, read-only afterward.

mod dom;
mod jvm;
mod web;

use std::collections::HashMap;

use crate::model::{FunctionSymbolData, Language, Symbol, SymbolPayload, ClassSymbolData, SourceLocation};

pub use dom::dom_provider;
pub use jvm::{java_provider, kotlin_provider};
pub use web::{javascript_provider, typescript_provider};

/// `{languages, defaultWildcardImports, lookupFunction, lookupClass,
/// lookupStaticMethod, isKnownSymbol, isBuiltinType, getAllSymbols}`
/// (spec.md §4.4). Synthetic symbols carry `filePath="<lang-stdlib>"` and a
/// zeroed [`SourceLocation`].
pub struct StdlibProvider {
    pub languages: Vec<Language>,
    pub default_wildcard_imports: Vec<String>,
    functions: HashMap<String, Symbol>,
    classes: HashMap<String, Symbol>,
    static_methods: HashMap<String, Symbol>,
    builtin_types: Vec<&'static str>,
}

impl StdlibProvider {
    pub fn lookup_function(&self, name: &str) -> Option<&Symbol> {
        self.functions.get(name)
    }

    pub fn lookup_class(&self, name: &str) -> Option<&Symbol> {
        self.classes.get(name)
    }

    /// Keyed `"Class.method"`, e.g. `UUID.randomUUID`.
    pub fn lookup_static_method(&self, qualified_name: &str) -> Option<&Symbol> {
        self.static_methods.get(qualified_name)
    }

    pub fn is_known_symbol(&self, name: &str) -> bool {
        self.functions.contains_key(name) || self.classes.contains_key(name)
    }

    pub fn is_builtin_type(&self, name: &str) -> bool {
        self.builtin_types.contains(&name)
    }

    pub fn get_all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.functions
            .values()
            .chain(self.classes.values())
            .chain(self.static_methods.values())
    }
}

/// Build a synthetic class symbol for a stdlib type with no declaring FQN.
pub(crate) fn synthetic_class(name: &str, fqn: &str) -> Symbol {
    Symbol {
        name: name.to_string(),
        fqn: fqn.to_string(),
        file_path: "<lang-stdlib>".into(),
        location: SourceLocation::synthetic(),
        package_name: fqn.rsplit_once('.').map(|(p, _)| p.to_string()).unwrap_or_default(),
        payload: SymbolPayload::Class(ClassSymbolData {
            kind: crate::model::ClassKind::Class,
            super_class: None,
            interfaces: Vec::new(),
            is_abstract: Some(false),
        }),
    }
}

/// Build a synthetic static-method (or free function) symbol.
pub(crate) fn synthetic_function(
    name: &str,
    fqn: &str,
    declaring_type_fqn: Option<&str>,
    parameter_types: &[&str],
    return_type: Option<&str>,
) -> Symbol {
    Symbol {
        name: name.to_string(),
        fqn: fqn.to_string(),
        file_path: "<lang-stdlib>".into(),
        location: SourceLocation::synthetic(),
        package_name: fqn.rsplit_once('.').map(|(p, _)| p.to_string()).unwrap_or_default(),
        payload: SymbolPayload::Function(FunctionSymbolData {
            declaring_type_fqn: declaring_type_fqn.map(|s| s.to_string()),
            parameter_types: parameter_types.iter().map(|s| s.to_string()).collect(),
            return_type: return_type.map(|s| s.to_string()),
            is_extension: false,
            receiver_type: None,
            is_suspend: Some(false),
            is_inline: Some(false),
            is_operator: Some(false),
        }),
    }
}

/// Return the stdlib provider for a language, per spec.md §4.4: the Java
/// provider is also registered for Kotlin (`java.lang.*` implicit wildcard).
pub fn provider_for(language: Language) -> &'static StdlibProvider {
    match language {
        Language::Java => java_provider(),
        Language::Kotlin => kotlin_provider(),
        Language::TypeScript => typescript_provider(),
        Language::JavaScript => javascript_provider(),
    }
}
