use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexSet;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grammar::{CnfGrammar, CnfProduction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigramOptions {
    /// Number of distinct words to collect
    pub count: usize,
    /// Words are cut off at this many terminals
    pub max_length: usize,
    /// Chance, in percent, of stepping to any terminal instead of a successor
    pub noise_percent: u32,
    /// Maximum number of words to start
    pub attempt_limit: usize,
}

impl Default for BigramOptions {
    fn default() -> Self {
        BigramOptions {
            count: 10,
            max_length: 20,
            noise_percent: 3,
            attempt_limit: 1000,
        }
    }
}

/// What can stand next to a nonterminal in a sentential form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Neighbour {
    Begin,
    Terminal(char),
    End,
}

type Sets<'g, T> = HashMap<&'g str, BTreeSet<T>>;

fn set_of<T: Ord + Clone>(sets: &Sets<'_, T>, name: &str) -> BTreeSet<T> {
    sets.get(name).cloned().unwrap_or_default()
}

// Pushes sets along productions until nothing grows. `flows` says which
// nonterminal receives what for one production.
fn fixed_point<'g, T, F>(grammar: &'g CnfGrammar, mut sets: Sets<'g, T>, flows: F) -> Sets<'g, T>
where
    T: Ord + Clone,
    F: Fn(&'g str, &'g CnfProduction, &Sets<'g, T>) -> Vec<(&'g str, BTreeSet<T>)>,
{
    loop {
        let mut changed = false;
        for (lhs, productions) in grammar.rules() {
            for production in productions {
                for (target, additions) in flows(lhs.as_str(), production, &sets) {
                    let set = sets.entry(target).or_default();
                    let before = set.len();
                    set.extend(additions);
                    changed |= set.len() > before;
                }
            }
        }
        if !changed {
            return sets;
        }
    }
}

fn neighbours(terminals: BTreeSet<char>) -> BTreeSet<Neighbour> {
    terminals.into_iter().map(Neighbour::Terminal).collect()
}

/// Terminal adjacency of a grammar in Chomsky normal form.
///
/// Two terminals are a bigram when some sentential form can put them side by
/// side. Walking bigrams yields words that look like the language without
/// necessarily belonging to it.
#[derive(Debug, Clone)]
pub struct BigramModel {
    alphabet: Vec<char>,
    initial: Vec<char>,
    finals: BTreeSet<char>,
    successors: BTreeMap<char, Vec<char>>,
}

impl BigramModel {
    pub fn new(grammar: &CnfGrammar) -> Self {
        let start = grammar.start_symbol();

        let first = fixed_point(grammar, Sets::new(), |lhs, production, first| match production {
            CnfProduction::Terminal(c) => vec![(lhs, BTreeSet::from([*c]))],
            CnfProduction::Pair(left, _) => vec![(lhs, set_of(first, left))],
        });

        let last = fixed_point(grammar, Sets::new(), |lhs, production, last| match production {
            CnfProduction::Terminal(c) => vec![(lhs, BTreeSet::from([*c]))],
            CnfProduction::Pair(_, right) => vec![(lhs, set_of(last, right))],
        });

        let follow = fixed_point(
            grammar,
            Sets::from([(start, BTreeSet::from([Neighbour::End]))]),
            |lhs, production, follow| match production {
                CnfProduction::Terminal(_) => vec![],
                CnfProduction::Pair(left, right) => vec![
                    (left.as_str(), neighbours(set_of(&first, right))),
                    (right.as_str(), set_of(follow, lhs)),
                ],
            },
        );

        let precede = fixed_point(
            grammar,
            Sets::from([(start, BTreeSet::from([Neighbour::Begin]))]),
            |lhs, production, precede| match production {
                CnfProduction::Terminal(_) => vec![],
                CnfProduction::Pair(left, right) => vec![
                    (left.as_str(), set_of(precede, lhs)),
                    (right.as_str(), neighbours(set_of(&last, left))),
                ],
            },
        );

        let mut pairs: BTreeMap<char, BTreeSet<char>> = BTreeMap::new();
        for name in grammar.nonterminals() {
            // x ends A and y can follow A
            for x in set_of(&last, name) {
                for y in set_of(&follow, name) {
                    if let Neighbour::Terminal(y) = y {
                        pairs.entry(x).or_default().insert(y);
                    }
                }
            }
            // x can precede A and y begins A
            for x in set_of(&precede, name) {
                if let Neighbour::Terminal(x) = x {
                    pairs.entry(x).or_default().extend(set_of(&first, name));
                }
            }
        }

        let model = BigramModel {
            alphabet: grammar.terminals().iter().copied().collect(),
            initial: set_of(&first, start).into_iter().collect(),
            finals: set_of(&last, start),
            successors: pairs
                .into_iter()
                .map(|(x, ys)| (x, ys.into_iter().collect()))
                .collect(),
        };
        debug!(
            "bigram model has {} bigrams over {} terminals",
            model.successors.values().map(Vec::len).sum::<usize>(),
            model.alphabet.len()
        );
        model
    }

    /// Terminals that can begin a word.
    pub fn initial(&self) -> &[char] {
        &self.initial
    }

    /// Terminals that can end a word.
    pub fn finals(&self) -> &BTreeSet<char> {
        &self.finals
    }

    /// Terminals that can directly follow `terminal`, in alphabet order.
    pub fn successors(&self, terminal: char) -> &[char] {
        self.successors.get(&terminal).map(Vec::as_slice).unwrap_or(&[])
    }

    fn step<R: Rng + ?Sized>(&self, current: char, options: &BigramOptions, rng: &mut R) -> Option<char> {
        if rng.gen_range(0..100) < options.noise_percent {
            self.alphabet.choose(rng).copied()
        } else {
            self.successors(current).choose(rng).copied()
        }
    }

    /// Random walks over the bigrams, returning distinct words in the order
    /// they were found.
    pub fn sample<R: Rng + ?Sized>(&self, options: &BigramOptions, rng: &mut R) -> Vec<String> {
        let mut words = IndexSet::new();
        let mut attempts = 0;

        while words.len() < options.count && attempts < options.attempt_limit {
            attempts += 1;

            let Some(mut current) = self.initial.choose(rng).copied() else {
                break;
            };
            let mut word = String::from(current);
            let mut length = 1;

            while length < options.max_length {
                let Some(next) = self.step(current, options, rng) else {
                    break;
                };
                current = next;
                word.push(next);
                length += 1;

                if self.finals.contains(&current) {
                    if !rng.gen_bool(0.5) {
                        break;
                    }
                    if words.len() < options.count {
                        words.insert(word.clone());
                    }
                }
            }

            if words.len() < options.count {
                words.insert(word);
            }
        }

        debug!("bigram sampling took {} attempts for {} words", attempts, words.len());
        words.into_iter().collect()
    }
}
