use indexmap::IndexMap;

use super::CompileErrorType::UndefinedNonterminal;
use super::{Alternative, CompileError, CompileErrors, FileResult, Location};

// Alternatives of each nonterminal, each with the line it was defined on
pub type IntermediateRuleset = IndexMap<String, Vec<(Alternative, Location)>>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    // Keep only the nonterminals, then only the ones without a rule
    alternative.iter()
        .filter_map(|symbol| symbol.as_nonterminal())
        .filter(|symbol| !rules.contains_key(*symbol))
        .map(|symbol_text| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(symbol_text.to_owned())
        })
        .collect()
}

fn get_undefined_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    // Flatten the undefined nonterminals of every alternative of every rule
    rules.values()
        .flatten()
        .flat_map(|(alternative, location)| get_alternative_undefined_symbols(alternative, location, rules))
        .collect()
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let mut errors = get_undefined_symbols(rules);

    // Report in file order
    errors.sort_by_key(|error| error.location.line);

    if !errors.is_empty() {
        Err(errors)
    } else {
        Ok(())
    }
}
