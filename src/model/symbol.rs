use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::class::ClassKind;
use super::location::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Function,
    Property,
    TypeAlias,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSymbolData {
    pub kind: ClassKind,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub is_abstract: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSymbolData {
    pub declaring_type_fqn: Option<String>,
    pub parameter_types: Vec<String>,
    pub return_type: Option<String>,
    pub is_extension: bool,
    pub receiver_type: Option<String>,
    pub is_suspend: Option<bool>,
    pub is_inline: Option<bool>,
    pub is_operator: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySymbolData {
    pub declaring_type_fqn: Option<String>,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasSymbolData {
    pub aliased_type: String,
}

/// The payload that distinguishes one [`Symbol`] variant from another,
/// beyond the shared fields every symbol carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPayload {
    Class(ClassSymbolData),
    Function(FunctionSymbolData),
    Property(PropertySymbolData),
    TypeAlias(TypeAliasSymbolData),
}

impl SymbolPayload {
    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolPayload::Class(_) => SymbolKind::Class,
            SymbolPayload::Function(_) => SymbolKind::Function,
            SymbolPayload::Property(_) => SymbolKind::Property,
            SymbolPayload::TypeAlias(_) => SymbolKind::TypeAlias,
        }
    }
}

/// A tagged record in the symbol table, sharing common fields across all
/// variants: class, function, property, or type-alias declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub fqn: String,
    pub file_path: PathBuf,
    pub location: SourceLocation,
    pub package_name: String,
    pub payload: SymbolPayload,
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        self.payload.kind()
    }

    pub fn as_function(&self) -> Option<&FunctionSymbolData> {
        match &self.payload {
            SymbolPayload::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassSymbolData> {
        match &self.payload {
            SymbolPayload::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_type_alias(&self) -> Option<&TypeAliasSymbolData> {
        match &self.payload {
            SymbolPayload::TypeAlias(t) => Some(t),
            _ => None,
        }
    }
}

/// Five indexes sharing one set of [`Symbol`] values. Built once after all
/// files are parsed and read-only for the duration of resolution (§3
/// "Lifecycles").
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SymbolTable {
    pub by_fqn: HashMap<String, Symbol>,
    pub by_name: HashMap<String, Vec<String>>,
    pub functions_by_name: HashMap<String, Vec<String>>,
    pub by_package: HashMap<String, Vec<String>>,
    /// FQN -> direct parent FQNs (or raw, unresolved text), superclass
    /// first then interfaces in declaration order.
    pub type_hierarchy: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, indexing it under `byFqn`, `byName`, `byPackage`,
    /// and — for functions — `functionsByName`. Callers are responsible
    /// for FQN uniqueness; a duplicate insert overwrites `byFqn` but still
    /// appends to the name/package index lists (last-writer-wins on the
    /// canonical record, matching the teacher's append-only index style).
    pub fn insert(&mut self, symbol: Symbol) {
        let fqn = symbol.fqn.clone();
        let name = symbol.name.clone();
        let package = symbol.package_name.clone();
        let is_function = matches!(symbol.payload, SymbolPayload::Function(_));

        self.by_name.entry(name).or_default().push(fqn.clone());
        self.by_package.entry(package).or_default().push(fqn.clone());
        if is_function {
            self.functions_by_name
                .entry(symbol.name.clone())
                .or_default()
                .push(fqn.clone());
        }
        self.by_fqn.insert(fqn, symbol);
    }

    pub fn get(&self, fqn: &str) -> Option<&Symbol> {
        self.by_fqn.get(fqn)
    }

    pub fn by_simple_name(&self, name: &str) -> Vec<&Symbol> {
        self.by_name
            .get(name)
            .map(|fqns| fqns.iter().filter_map(|f| self.by_fqn.get(f)).collect())
            .unwrap_or_default()
    }

    pub fn functions_named(&self, name: &str) -> Vec<&Symbol> {
        self.functions_by_name
            .get(name)
            .map(|fqns| fqns.iter().filter_map(|f| self.by_fqn.get(f)).collect())
            .unwrap_or_default()
    }

    /// Direct parents of `fqn`, superclass first then interfaces, in
    /// declaration order. Raw unresolved text is still returned for
    /// discoverability (§3 invariant), even though it won't resolve
    /// further in `byFqn`.
    pub fn parents_of(&self, fqn: &str) -> &[String] {
        self.type_hierarchy
            .get(fqn)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// `packageName ? packageName + "." + name : name`; nested members append
/// `"." + innerName` to the enclosing FQN (§3 "FQN construction").
pub fn make_fqn(package_name: &str, name: &str) -> String {
    if package_name.is_empty() {
        name.to_string()
    } else {
        format!("{package_name}.{name}")
    }
}

pub fn nested_fqn(enclosing_fqn: &str, inner_name: &str) -> String {
    format!("{enclosing_fqn}.{inner_name}")
}
