//! The Java/Kotlin stdlib provider (spec.md §4.4). Declares `java.lang.*` as
//! an implicit wildcard import and is registered for both languages — "the
//! Java provider... is also registered for Kotlin".

use once_cell::sync::Lazy;

use super::{synthetic_class, synthetic_function, StdlibProvider};
use crate::model::Language;

/// `(class simple name, fully-qualified class name, [(method name, param
/// types, return type)])` — the declarative list this provider is built
/// from (spec.md §4.4 "Provider contents are declarative data").
const CLASSES: &[(&str, &str, &[(&str, &[&str], Option<&str>)])] = &[
    ("UUID", "java.util.UUID", &[
        ("randomUUID", &[], Some("UUID")),
        ("fromString", &["String"], Some("UUID")),
    ]),
    ("LocalDate", "java.time.LocalDate", &[
        ("now", &[], Some("LocalDate")),
        ("of", &["int", "int", "int"], Some("LocalDate")),
        ("parse", &["String"], Some("LocalDate")),
    ]),
    ("Optional", "java.util.Optional", &[
        ("empty", &[], Some("Optional")),
        ("of", &["Object"], Some("Optional")),
        ("ofNullable", &["Object"], Some("Optional")),
    ]),
    ("Collections", "java.util.Collections", &[
        ("emptyList", &[], Some("List")),
        ("emptyMap", &[], Some("Map")),
        ("emptySet", &[], Some("Set")),
        ("unmodifiableList", &["List"], Some("List")),
        ("singletonList", &["Object"], Some("List")),
        ("sort", &["List"], None),
    ]),
    ("CompletableFuture", "java.util.concurrent.CompletableFuture", &[
        ("completedFuture", &["Object"], Some("CompletableFuture")),
        ("supplyAsync", &["Supplier"], Some("CompletableFuture")),
        ("allOf", &["CompletableFuture..."], Some("CompletableFuture")),
    ]),
    ("BigDecimal", "java.math.BigDecimal", &[
        ("valueOf", &["double"], Some("BigDecimal")),
        ("ZERO", &[], Some("BigDecimal")),
    ]),
    ("Pattern", "java.util.regex.Pattern", &[
        ("compile", &["String"], Some("Pattern")),
        ("matches", &["String", "CharSequence"], Some("boolean")),
    ]),
    ("Files", "java.nio.file.Files", &[
        ("readAllBytes", &["Path"], Some("byte[]")),
        ("readAllLines", &["Path"], Some("List")),
        ("exists", &["Path"], Some("boolean")),
        ("write", &["Path", "byte[]"], Some("Path")),
    ]),
    ("Paths", "java.nio.file.Paths", &[
        ("get", &["String..."], Some("Path")),
    ]),
    ("String", "java.lang.String", &[
        ("valueOf", &["Object"], Some("String")),
        ("format", &["String", "Object..."], Some("String")),
        ("join", &["CharSequence", "CharSequence..."], Some("String")),
    ]),
    ("Object", "java.lang.Object", &[]),
    ("System", "java.lang.System", &[
        ("currentTimeMillis", &[], Some("long")),
        ("nanoTime", &[], Some("long")),
        ("exit", &["int"], None),
    ]),
    ("Math", "java.lang.Math", &[
        ("max", &["double", "double"], Some("double")),
        ("min", &["double", "double"], Some("double")),
        ("abs", &["double"], Some("double")),
        ("random", &[], Some("double")),
    ]),
    ("Arrays", "java.util.Arrays", &[
        ("asList", &["Object..."], Some("List")),
        ("sort", &["Object[]"], None),
    ]),
    ("List", "java.util.List", &[("of", &["Object..."], Some("List"))]),
    ("Map", "java.util.Map", &[("of", &["Object..."], Some("Map"))]),
    ("Set", "java.util.Set", &[("of", &["Object..."], Some("Set"))]),
];

fn build(languages: Vec<Language>, default_wildcard_imports: Vec<String>) -> StdlibProvider {
    let mut provider = StdlibProvider {
        languages,
        default_wildcard_imports,
        functions: Default::default(),
        classes: Default::default(),
        static_methods: Default::default(),
        builtin_types: vec![
            "String", "int", "long", "double", "float", "boolean", "char", "byte", "short",
            "Int", "Long", "Double", "Float", "Boolean", "Char", "Byte", "Short", "Any", "Unit",
            "Object", "void",
        ],
    };

    for (simple_name, fqn, methods) in CLASSES {
        provider.classes.insert(simple_name.to_string(), synthetic_class(simple_name, fqn));
        for (method, params, ret) in methods.iter() {
            let key = format!("{simple_name}.{method}");
            let method_fqn = format!("{fqn}.{method}");
            provider
                .static_methods
                .insert(key, synthetic_function(method, &method_fqn, Some(fqn), params, *ret));
        }
    }

    provider
}

static JAVA: Lazy<StdlibProvider> =
    Lazy::new(|| build(vec![Language::Java], vec!["java.lang".to_string()]));

static KOTLIN: Lazy<StdlibProvider> = Lazy::new(|| {
    build(
        vec![Language::Kotlin],
        vec!["kotlin".to_string(), "kotlin.collections".to_string(), "java.lang".to_string()],
    )
});

pub fn java_provider() -> &'static StdlibProvider {
    &JAVA
}

pub fn kotlin_provider() -> &'static StdlibProvider {
    &KOTLIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_uuid_static_method() {
        let provider = java_provider();
        let symbol = provider.lookup_static_method("UUID.randomUUID").unwrap();
        assert_eq!(symbol.fqn, "java.util.UUID.randomUUID");
    }

    #[test]
    fn kotlin_provider_shares_java_lang() {
        assert!(kotlin_provider().default_wildcard_imports.contains(&"java.lang".to_string()));
    }

    #[test]
    fn builtin_types_recognized() {
        assert!(java_provider().is_builtin_type("String"));
        assert!(kotlin_provider().is_builtin_type("Int"));
    }
}
