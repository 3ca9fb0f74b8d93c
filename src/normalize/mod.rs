/*
    This module converts grammars into Chomsky normal form
*/

mod binarize;
pub mod names;
mod start;
mod terminals;
mod unit;
mod useless;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grammar::{CnfGrammar, Grammar};
use names::NameAllocator;

/// Seed used by [`normalize`] for the fallback start symbol choice.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Converts `grammar` into an equivalent grammar in Chomsky normal form.
///
/// Runs [`normalize_with_rng`] with a fixed seed, so the result is the same
/// on every call.
pub fn normalize(grammar: &Grammar) -> CnfGrammar {
    normalize_with_rng(grammar, &mut StdRng::seed_from_u64(DEFAULT_SEED))
}

/// Converts `grammar` into Chomsky normal form in five steps:
///
/// 1. a fresh start symbol `[STARTn] -> S`,
/// 2. unit production elimination,
/// 3. useless symbol elimination,
/// 4. binarization of long productions,
/// 5. terminal isolation inside pairs.
///
/// `rng` is only consulted when the start symbol derives no terminal string
/// and a generating nonterminal has to stand in for it.
pub fn normalize_with_rng<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R) -> CnfGrammar {
    let mut names = NameAllocator::for_grammar(grammar);

    let grammar = start::isolate_start(grammar, &mut names);
    debug!("start isolated as `{}`", grammar.start_symbol());

    let grammar = unit::eliminate_unit_productions(&grammar);
    debug!("unit productions removed, {} productions", grammar.production_count());

    let grammar = useless::eliminate_useless_symbols(&grammar, rng);
    debug!(
        "useless symbols removed, {} nonterminals, {} productions",
        grammar.rules().len(),
        grammar.production_count()
    );

    let grammar = binarize::binarize(&grammar, &mut names);
    debug!("binarized, {} nonterminals", grammar.rules.len());

    let grammar = terminals::isolate_terminals(grammar, &mut names);
    debug!(
        "terminals isolated, {} nonterminals, {} productions",
        grammar.rules().len(),
        grammar.production_count()
    );

    grammar
}
