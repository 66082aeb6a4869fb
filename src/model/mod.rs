//! The normalized, language-agnostic schema every extractor emits into and
//! every resolver stage reads from (spec.md §3).

mod class;
mod common;
mod file;
mod imports;
mod location;
mod members;
mod resolved;
mod symbol;

pub use class::{
    ClassKind, ParsedClass, ParsedConditionalType, ParsedDestructuringDeclaration,
    ParsedMappedType, ParsedObjectExpression, ParsedTypeAlias,
};
pub use common::{
    ConstructorDelegation, Language, ParsedAnnotation, ParsedConstructor, ParsedFunctionType,
    ParsedParameter, ParsedTypeGuard, ParsedTypeParameter, Variance, Visibility,
};
pub use file::ParsedFile;
pub use imports::{ParsedImport, ParsedReexport};
pub use members::{ParsedCall, ParsedFunction, ParsedOverloadSignature, ParsedProperty};
pub use resolved::{ResolutionOutcome, ResolvedCall, ResolvedFile};
pub use symbol::{
    ClassSymbolData, FunctionSymbolData, PropertySymbolData, Symbol, SymbolKind, SymbolPayload,
    SymbolTable, TypeAliasSymbolData, make_fqn, nested_fqn,
};
pub use location::SourceLocation;
