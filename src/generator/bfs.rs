use std::collections::VecDeque;

use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;
use rand::Rng;

use super::random_terminal;
use crate::grammar::{CnfGrammar, CnfProduction, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsOptions {
    /// Number of distinct words to collect
    pub count: usize,
    /// Only keep words of exactly this length
    pub word_length: Option<usize>,
    /// Skip the random negative candidates emitted when a derivation
    /// outgrows `word_length`
    pub always_positive: bool,
    /// Maximum number of sentential forms to take off the queue
    pub step_limit: usize,
}

impl Default for BfsOptions {
    fn default() -> Self {
        BfsOptions {
            count: 10,
            word_length: None,
            always_positive: false,
            step_limit: 100_000,
        }
    }
}

// A sentential form of a leftmost derivation: terminals up to
// `first_nonterminal`, only nonterminals after it
struct Form {
    symbols: Vec<Symbol>,
    first_nonterminal: usize,
}

impl Form {
    fn is_word(&self) -> bool {
        self.first_nonterminal == self.symbols.len()
    }

    fn expand(&self, production: &CnfProduction) -> Form {
        let mut symbols = self.symbols.clone();
        let at = self.first_nonterminal;
        match production {
            CnfProduction::Terminal(c) => {
                symbols[at] = Symbol::Terminal(*c);
                Form {
                    symbols,
                    first_nonterminal: at + 1,
                }
            }
            CnfProduction::Pair(left, right) => {
                symbols.splice(at..=at, [Symbol::nonterminal(left.as_str()), Symbol::nonterminal(right.as_str())]);
                Form {
                    symbols,
                    first_nonterminal: at,
                }
            }
        }
    }
}

// Fills every nonterminal with a random terminal, the result is only a guess
fn negative_candidate<R: Rng + ?Sized>(form: &Form, grammar: &CnfGrammar, rng: &mut R) -> Option<String> {
    form.symbols
        .iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(c) => Some(*c),
            Symbol::Nonterminal(_) => random_terminal(grammar, rng),
        })
        .collect()
}

/// Collects words by expanding the leftmost nonterminal breadth first, so
/// shorter derivations come out first.
pub fn generate_words<R: Rng + ?Sized>(grammar: &CnfGrammar, options: &BfsOptions, rng: &mut R) -> Vec<String> {
    let mut words = IndexSet::new();
    let mut queue = VecDeque::from([Form {
        symbols: vec![Symbol::nonterminal(grammar.start_symbol())],
        first_nonterminal: 0,
    }]);
    let mut steps = 0;

    while words.len() < options.count && steps < options.step_limit {
        let Some(form) = queue.pop_front() else {
            break;
        };
        steps += 1;

        if form.is_word() {
            if options.word_length.map_or(true, |length| form.symbols.len() == length) {
                words.insert(form.symbols.iter().join(""));
            }
            continue;
        }

        let Some(nonterminal) = form.symbols[form.first_nonterminal].as_nonterminal() else {
            continue;
        };

        for production in grammar.productions(nonterminal) {
            let next = form.expand(production);

            let too_long = options.word_length.is_some_and(|length| next.symbols.len() > length);
            if !too_long {
                queue.push_back(next);
            } else if !options.always_positive && words.len() < options.count {
                if let Some(candidate) = negative_candidate(&next, grammar, rng) {
                    words.insert(candidate);
                }
            }
        }
    }

    debug!("breadth-first generation took {} steps for {} words", steps, words.len());
    words.into_iter().collect()
}
