//! Overload resolution shared by the current-class, inherited, wildcard,
//! extension, and top-level-last-resort steps of the call resolver
//! (spec.md §4.8 "Overload resolution").
//!
//! Grounded on the reference corpus's `MemberScope::resolve_expression_type`
//! style of per-position type comparison, generalized into an explicit
//! scoring table rather than a cascade of `if`s, since here the scoring
//! needs to survive a tie check.

use crate::model::Symbol;

/// Primitive/boxed widening chains per language, narrowest first. A call
/// argument typed anywhere in a chain is widening-compatible with any
/// later entry in the same chain.
const WIDENING_CHAINS: &[&[&str]] = &[
    &["byte", "short", "int", "long", "float", "double"],
    &["Byte", "Short", "Int", "Long", "Float", "Double"],
    &["char", "int", "long", "float", "double"],
];

fn widening_rank(chain: &[&str], type_name: &str) -> Option<usize> {
    chain.iter().position(|t| *t == type_name)
}

fn is_any_compatible(type_name: &str) -> bool {
    matches!(type_name, "Any" | "Object" | "unknown" | "any" | "")
}

/// Per-position compatibility score: 0 eliminates the candidate; higher is
/// better. `4` exact, `3` subtype (left to the caller's hierarchy check,
/// since this module has no [`crate::model::SymbolTable`] access), `2`
/// widening, `1` `Any`/`unknown`-compatible, `0` incompatible.
fn position_score(expected: &str, actual: &str) -> u32 {
    if expected == actual {
        return 4;
    }
    if is_any_compatible(expected) || is_any_compatible(actual) {
        return 1;
    }
    for chain in WIDENING_CHAINS {
        if let (Some(from), Some(to)) = (widening_rank(chain, actual), widening_rank(chain, expected)) {
            if from <= to {
                return 2;
            }
        }
    }
    0
}

/// Candidate function parameter types, already extracted from a
/// [`Symbol`]'s [`crate::model::FunctionSymbolData`].
struct Candidate<'a> {
    symbol: &'a Symbol,
    parameter_types: &'a [String],
}

fn accepts_arity(parameter_types: &[String], argument_count: usize) -> bool {
    if parameter_types.last().map(|p| p.ends_with("...")).unwrap_or(false) {
        argument_count + 1 >= parameter_types.len()
    } else {
        parameter_types.len() == argument_count
    }
}

/// Resolve a single best candidate out of a same-named overload set. `None`
/// both when nothing matches and when the call is genuinely ambiguous
/// (spec.md §4.8: "if several tie at the best score, resolution is
/// ambiguous and the call is left unresolved — do not guess").
pub fn resolve_overload<'a>(
    candidates: &[&'a Symbol],
    argument_count: Option<usize>,
    argument_types: Option<&[String]>,
) -> Option<&'a Symbol> {
    let mut pool: Vec<Candidate<'a>> = candidates
        .iter()
        .filter_map(|sym| sym.as_function().map(|f| Candidate { symbol: sym, parameter_types: &f.parameter_types }))
        .collect();

    if pool.is_empty() {
        return None;
    }

    if let Some(argc) = argument_count {
        pool.retain(|c| accepts_arity(c.parameter_types, argc));
    }

    if pool.is_empty() {
        return None;
    }
    if pool.len() == 1 {
        return Some(pool[0].symbol);
    }

    let Some(arg_types) = argument_types else {
        // Arity alone didn't narrow to one; without argument types there is
        // nothing left to disambiguate with.
        return None;
    };

    let mut scored: Vec<(u32, &'a Symbol)> = Vec::new();
    'candidate: for candidate in &pool {
        let mut total = 0u32;
        for (expected, actual) in candidate.parameter_types.iter().zip(arg_types.iter()) {
            let expected = expected.trim_end_matches("...");
            let score = position_score(expected, actual);
            if score == 0 {
                continue 'candidate;
            }
            total += score;
        }
        scored.push((total, candidate.symbol));
    }

    let best = scored.iter().map(|(s, _)| *s).max()?;
    let best_candidates: Vec<&Symbol> = scored.iter().filter(|(s, _)| *s == best).map(|(_, sym)| *sym).collect();
    if best_candidates.len() == 1 {
        Some(best_candidates[0])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionSymbolData, SourceLocation, SymbolPayload};
    use std::path::PathBuf;

    fn function_symbol(fqn: &str, parameter_types: &[&str]) -> Symbol {
        Symbol {
            name: fqn.rsplit('.').next().unwrap().to_string(),
            fqn: fqn.to_string(),
            file_path: PathBuf::from("pkg/Calc.java"),
            location: SourceLocation::new(PathBuf::from("pkg/Calc.java"), 1, 0, 1, 0),
            package_name: "pkg".to_string(),
            payload: SymbolPayload::Function(FunctionSymbolData {
                declaring_type_fqn: Some("pkg.Calc".to_string()),
                parameter_types: parameter_types.iter().map(|s| s.to_string()).collect(),
                return_type: Some("int".to_string()),
                is_extension: false,
                receiver_type: None,
                is_suspend: Some(false),
                is_inline: Some(false),
                is_operator: Some(false),
            }),
        }
    }

    /// Scenario B: `add(1, 2)` must pick the two-arg overload by arity alone.
    #[test]
    fn resolves_by_arity_when_types_unknown() {
        let one_arg = function_symbol("pkg.Calc.add#1", &["int"]);
        let two_arg = function_symbol("pkg.Calc.add#2", &["int", "int"]);
        let candidates = vec![&one_arg, &two_arg];

        let resolved = resolve_overload(&candidates, Some(2), None).unwrap();
        assert_eq!(resolved.fqn, "pkg.Calc.add#2");
    }

    #[test]
    fn ties_at_best_score_are_left_ambiguous() {
        let a = function_symbol("pkg.Calc.f#a", &["Object"]);
        let b = function_symbol("pkg.Calc.f#b", &["Object"]);
        let candidates = vec![&a, &b];
        let types = vec!["String".to_string()];

        assert!(resolve_overload(&candidates, Some(1), Some(&types)).is_none());
    }

    #[test]
    fn varargs_candidate_accepts_more_arguments_than_its_fixed_prefix() {
        let varargs = function_symbol("pkg.Calc.sum", &["int..."]);
        let candidates = vec![&varargs];
        assert!(resolve_overload(&candidates, Some(3), None).is_some());
    }

    #[test]
    fn exact_match_outranks_widening_match() {
        let widened = function_symbol("pkg.Calc.g#long", &["long"]);
        let exact = function_symbol("pkg.Calc.g#int", &["int"]);
        let candidates = vec![&widened, &exact];
        let types = vec!["int".to_string()];

        let resolved = resolve_overload(&candidates, Some(1), Some(&types)).unwrap();
        assert_eq!(resolved.fqn, "pkg.Calc.g#int");
    }
}
