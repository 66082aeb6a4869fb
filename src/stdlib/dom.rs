//! A DOM provider adding browser globals to TypeScript/JavaScript (spec.md
//! §4.4). Consulted alongside the language's own stdlib provider, never in
//! place of it — `window`, `document`, `localStorage`, `fetch`.

use once_cell::sync::Lazy;

use super::{synthetic_class, synthetic_function, StdlibProvider};
use crate::model::Language;

const CLASSES: &[(&str, &[(&str, &[&str], Option<&str>)])] = &[
    ("document", &[
        ("getElementById", &["string"], Some("Element")),
        ("querySelector", &["string"], Some("Element")),
        ("querySelectorAll", &["string"], Some("NodeList")),
        ("createElement", &["string"], Some("Element")),
    ]),
    ("window", &[
        ("setTimeout", &["Function", "number"], Some("number")),
        ("clearTimeout", &["number"], None),
        ("addEventListener", &["string", "Function"], None),
    ]),
    ("localStorage", &[
        ("getItem", &["string"], Some("string")),
        ("setItem", &["string", "string"], None),
        ("removeItem", &["string"], None),
    ]),
    ("sessionStorage", &[
        ("getItem", &["string"], Some("string")),
        ("setItem", &["string", "string"], None),
    ]),
];

fn build() -> StdlibProvider {
    let mut provider = StdlibProvider {
        languages: vec![Language::TypeScript, Language::JavaScript],
        default_wildcard_imports: Vec::new(),
        functions: Default::default(),
        classes: Default::default(),
        static_methods: Default::default(),
        builtin_types: Vec::new(),
    };

    provider.functions.insert(
        "fetch".to_string(),
        synthetic_function("fetch", "<dom>.fetch", None, &["string"], Some("Promise")),
    );

    for (name, methods) in CLASSES {
        let fqn = format!("<dom>.{name}");
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

static DOM: Lazy<StdlibProvider> = Lazy::new(build);

pub fn dom_provider() -> &'static StdlibProvider {
    &DOM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_global_fetch() {
        assert!(dom_provider().lookup_function("fetch").is_some());
    }

    #[test]
    fn resolves_local_storage_method() {
        assert!(dom_provider().lookup_static_method("localStorage.getItem").is_some());
    }
}
