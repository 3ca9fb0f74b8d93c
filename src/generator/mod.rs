/*
    This module generates candidate words for a grammar in Chomsky normal form
*/

pub mod bfs;
pub mod bigram;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grammar::CnfGrammar;

pub use bfs::BfsOptions;
pub use bigram::{BigramModel, BigramOptions};

/// How candidate words are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    // Breadth-first leftmost derivations, words are in the language unless
    // negative candidates are asked for
    Exhaustive(BfsOptions),
    // Walks over terminal pairs that can be adjacent, words may fall outside
    // the language
    Bigram(BigramOptions),
}

pub fn generate<R: Rng + ?Sized>(grammar: &CnfGrammar, strategy: &Strategy, rng: &mut R) -> Vec<String> {
    match strategy {
        Strategy::Exhaustive(options) => bfs::generate_words(grammar, options, rng),
        Strategy::Bigram(options) => BigramModel::new(grammar).sample(options, rng),
    }
}

// Any terminal of the grammar's alphabet, `None` when it has none
fn random_terminal<R: Rng + ?Sized>(grammar: &CnfGrammar, rng: &mut R) -> Option<char> {
    grammar.terminals().iter().copied().choose(rng)
}
