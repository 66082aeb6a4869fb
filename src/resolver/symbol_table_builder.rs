//! Builds the process-wide [`SymbolTable`] from every parsed file (spec.md
//! §4.6). Runs once, after extraction, before any call is resolved —
//! the table is read-only for the rest of the pipeline.

use crate::model::{
    make_fqn, nested_fqn, ClassSymbolData, FunctionSymbolData, ParsedClass, ParsedFile,
    PropertySymbolData, Symbol, SymbolPayload, SymbolTable, TypeAliasSymbolData,
};

/// Insert every class (recursively through nested classes and companion
/// objects), top-level function, top-level property, and type alias from
/// every file into one [`SymbolTable`].
pub fn build_symbol_table(files: &[ParsedFile]) -> SymbolTable {
    let mut table = SymbolTable::new();

    for file in files {
        let package = file.package_or_file_proxy();

        for class in &file.classes {
            insert_class(&mut table, class, &package, &make_fqn(&package, &class.name));
        }
        for func in &file.top_level_functions {
            let fqn = make_fqn(&package, &func.name);
            table.insert(Symbol {
                name: func.name.clone(),
                fqn,
                file_path: file.file_path.clone(),
                location: func.location.clone(),
                package_name: package.clone(),
                payload: SymbolPayload::Function(FunctionSymbolData {
                    declaring_type_fqn: None,
                    parameter_types: func.parameters.iter().map(|p| p.r#type.clone().unwrap_or_default()).collect(),
                    return_type: func.return_type.clone(),
                    is_extension: func.is_extension,
                    receiver_type: func.receiver_type.clone(),
                    is_suspend: Some(func.is_suspend),
                    is_inline: func.is_inline,
                    is_operator: func.is_operator,
                }),
            });
        }
        for prop in &file.top_level_properties {
            let fqn = make_fqn(&package, &prop.name);
            table.insert(Symbol {
                name: prop.name.clone(),
                fqn,
                file_path: file.file_path.clone(),
                location: prop.location.clone(),
                package_name: package.clone(),
                payload: SymbolPayload::Property(PropertySymbolData {
                    declaring_type_fqn: None,
                    r#type: prop.r#type.clone(),
                }),
            });
        }
        for alias in &file.type_aliases {
            let fqn = make_fqn(&package, &alias.name);
            table.insert(Symbol {
                name: alias.name.clone(),
                fqn,
                file_path: file.file_path.clone(),
                location: alias.location.clone(),
                package_name: package.clone(),
                payload: SymbolPayload::TypeAlias(TypeAliasSymbolData {
                    aliased_type: alias.aliased_type.clone(),
                }),
            });
        }
    }

    table
}

fn insert_class(table: &mut SymbolTable, class: &ParsedClass, package: &str, fqn: &str) {
    table.insert(Symbol {
        name: class.name.clone(),
        fqn: fqn.to_string(),
        file_path: class.location.file_path.clone(),
        location: class.location.clone(),
        package_name: package.to_string(),
        payload: SymbolPayload::Class(ClassSymbolData {
            kind: class.kind,
            super_class: class.super_class.clone(),
            interfaces: class.interfaces.clone(),
            is_abstract: Some(class.is_abstract),
        }),
    });

    for prop in &class.properties {
        let prop_fqn = nested_fqn(fqn, &prop.name);
        table.insert(Symbol {
            name: prop.name.clone(),
            fqn: prop_fqn,
            file_path: class.location.file_path.clone(),
            location: prop.location.clone(),
            package_name: package.to_string(),
            payload: SymbolPayload::Property(PropertySymbolData {
                declaring_type_fqn: Some(fqn.to_string()),
                r#type: prop.r#type.clone(),
            }),
        });
    }

    for func in &class.functions {
        let func_fqn = nested_fqn(fqn, &func.name);
        table.insert(Symbol {
            name: func.name.clone(),
            fqn: func_fqn,
            file_path: class.location.file_path.clone(),
            location: func.location.clone(),
            package_name: package.to_string(),
            payload: SymbolPayload::Function(FunctionSymbolData {
                declaring_type_fqn: Some(fqn.to_string()),
                parameter_types: func.parameters.iter().map(|p| p.r#type.clone().unwrap_or_default()).collect(),
                return_type: func.return_type.clone(),
                is_extension: func.is_extension,
                receiver_type: func.receiver_type.clone(),
                is_suspend: Some(func.is_suspend),
                is_inline: func.is_inline,
                is_operator: func.is_operator,
            }),
        });
    }

    for nested in &class.nested_classes {
        insert_class(table, nested, package, &nested_fqn(fqn, &nested.name));
    }
    if let Some(companion) = &class.companion_object {
        insert_class(table, companion, package, &nested_fqn(fqn, &companion.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, Language, SourceLocation, Visibility};
    use std::path::PathBuf;

    fn loc() -> SourceLocation {
        SourceLocation::new("a.kt", 1, 0, 1, 0)
    }

    #[test]
    fn indexes_class_and_its_methods_under_fqn() {
        let mut file = ParsedFile::empty(PathBuf::from("a.kt"), Language::Kotlin);
        file.package_name = Some("com.example".to_string());
        let mut class = ParsedClass::new("Widget", ClassKind::Class, Visibility::Public, loc());
        class.functions.push(crate::model::ParsedFunction::new("render", Visibility::Public, loc()));
        file.classes.push(class);

        let table = build_symbol_table(&[file]);
        assert!(table.get("com.example.Widget").is_some());
        assert!(table.get("com.example.Widget.render").is_some());
        assert_eq!(table.functions_named("render").len(), 1);
    }

    #[test]
    fn indexes_nested_class_under_enclosing_fqn() {
        let mut file = ParsedFile::empty(PathBuf::from("a.kt"), Language::Kotlin);
        file.package_name = Some("com.example".to_string());
        let mut outer = ParsedClass::new("Outer", ClassKind::Class, Visibility::Public, loc());
        outer
            .nested_classes
            .push(ParsedClass::new("Inner", ClassKind::Class, Visibility::Public, loc()));
        file.classes.push(outer);

        let table = build_symbol_table(&[file]);
        assert!(table.get("com.example.Outer.Inner").is_some());
    }
}
