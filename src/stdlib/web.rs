//! The TypeScript/JavaScript stdlib provider (spec.md §4.4): `Array`,
//! `Object`, `Promise`, `Map`, `Set`, `JSON`, `Math`, `console`.

use once_cell::sync::Lazy;

use super::{synthetic_class, synthetic_function, StdlibProvider};
use crate::model::Language;

const CLASSES: &[(&str, &[(&str, &[&str], Option<&str>)])] = &[
    ("Array", &[
        ("isArray", &["unknown"], Some("boolean")),
        ("from", &["unknown"], Some("Array")),
        ("of", &["unknown..."], Some("Array")),
    ]),
    ("Object", &[
        ("keys", &["object"], Some("Array")),
        ("values", &["object"], Some("Array")),
        ("entries", &["object"], Some("Array")),
        ("assign", &["object", "object..."], Some("object")),
        ("freeze", &["object"], Some("object")),
    ]),
    ("Promise", &[
        ("resolve", &["unknown"], Some("Promise")),
        ("reject", &["unknown"], Some("Promise")),
        ("all", &["Array"], Some("Promise")),
        ("race", &["Array"], Some("Promise")),
    ]),
    ("Map", &[]),
    ("Set", &[]),
    ("JSON", &[
        ("stringify", &["unknown"], Some("string")),
        ("parse", &["string"], Some("unknown")),
    ]),
    ("Math", &[
        ("max", &["number..."], Some("number")),
        ("min", &["number..."], Some("number")),
        ("random", &[], Some("number")),
        ("floor", &["number"], Some("number")),
        ("round", &["number"], Some("number")),
    ]),
    ("console", &[
        ("log", &["unknown..."], None),
        ("error", &["unknown..."], None),
        ("warn", &["unknown..."], None),
    ]),
    ("Number", &[
        ("isInteger", &["unknown"], Some("boolean")),
        ("parseFloat", &["string"], Some("number")),
    ]),
    ("String", &[("fromCharCode", &["number..."], Some("string"))]),
];

fn build(language: Language) -> StdlibProvider {
    let mut provider = StdlibProvider {
        languages: vec![language],
        default_wildcard_imports: Vec::new(),
        functions: Default::default(),
        classes: Default::default(),
        static_methods: Default::default(),
        builtin_types: vec![
            "string", "number", "boolean", "bigint", "undefined", "null", "unknown", "any",
            "void", "object", "symbol", "never",
        ],
    };

    for (name, methods) in CLASSES {
        let fqn = format!("<{name}>");
        provider.classes.insert(name.to_string(), synthetic_class(name, &fqn));
        for (method, params, ret) in methods.iter() {
            let key = format!("{name}.{method}");
            let method_fqn = format!("{fqn}.{method}");
            provider
                .static_methods
                .insert(key, synthetic_function(method, &method_fqn, Some(&fqn), params, *ret));
        }
    }

    provider
}

static TYPESCRIPT: Lazy<StdlibProvider> = Lazy::new(|| build(Language::TypeScript));
static JAVASCRIPT: Lazy<StdlibProvider> = Lazy::new(|| build(Language::JavaScript));

pub fn typescript_provider() -> &'static StdlibProvider {
    &TYPESCRIPT
}

pub fn javascript_provider() -> &'static StdlibProvider {
    &JAVASCRIPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_json_stringify() {
        let symbol = typescript_provider().lookup_static_method("JSON.stringify").unwrap();
        assert_eq!(symbol.name, "stringify");
    }
}
