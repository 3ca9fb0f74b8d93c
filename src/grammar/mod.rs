/*
    This module is for storing and validating grammars
*/

pub mod cnf;

use std::collections::BTreeSet;
use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

pub use cnf::{CnfGrammar, CnfProduction, CnfRules};

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(String),
}

impl Symbol {
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::Nonterminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(name) => Some(name),
            Symbol::Terminal(_) => None,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

// Rewrite rules keyed by their left-hand side, in definition order
pub type Rules = IndexMap<String, Rewrite>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    Empty,
    #[error("start symbol `{0}` has no rule")]
    MissingStart(String),
    #[error("`{lhs}` refers to undefined nonterminal `{name}`")]
    UndefinedNonterminal { lhs: String, name: String },
    #[error("`{0}` has an empty alternative, empty productions are not supported")]
    EmptyAlternative(String),
    #[error("`{lhs} -> {production}` is not in Chomsky normal form")]
    NotCnf { lhs: String, production: String },
}

/// A context-free grammar without empty productions.
///
/// Values are only built through [`Grammar::new`], which rejects dangling
/// nonterminal references and empty alternatives, so every transformation
/// can assume a well-formed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start_symbol: String,
    rules: Rules,
    terminals: BTreeSet<char>,
}

impl Grammar {
    pub fn new(start_symbol: impl Into<String>, rules: Rules) -> Result<Self, GrammarError> {
        let start_symbol = start_symbol.into();

        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }
        if !rules.contains_key(&start_symbol) {
            return Err(GrammarError::MissingStart(start_symbol));
        }

        for (lhs, rewrite) in &rules {
            for alternative in rewrite {
                if alternative.is_empty() {
                    return Err(GrammarError::EmptyAlternative(lhs.clone()));
                }

                let undefined = alternative
                    .iter()
                    .filter_map(Symbol::as_nonterminal)
                    .find(|name| !rules.contains_key(*name));
                if let Some(name) = undefined {
                    return Err(GrammarError::UndefinedNonterminal {
                        lhs: lhs.clone(),
                        name: name.to_string(),
                    });
                }
            }
        }

        Ok(Self::from_parts(start_symbol, rules))
    }

    // Callers inside the crate guarantee the invariants checked by `new`
    pub(crate) fn from_parts(start_symbol: String, rules: Rules) -> Self {
        let terminals = rules
            .values()
            .flatten()
            .flatten()
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(c) => Some(*c),
                Symbol::Nonterminal(_) => None,
            })
            .collect();

        Grammar {
            start_symbol,
            rules,
            terminals,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    pub fn alternatives(&self, nonterminal: &str) -> &[Alternative] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, rewrite) in &self.rules {
            for alternative in rewrite {
                writeln!(f, "{} -> {}", lhs, alternative.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    pub(crate) fn s_terminal(c: char) -> Symbol {
        Symbol::Terminal(c)
    }

    pub(crate) fn rules(entries: Vec<(&str, Rewrite)>) -> Rules {
        entries
            .into_iter()
            .map(|(lhs, rewrite)| (lhs.to_string(), rewrite))
            .collect()
    }

    #[test]
    fn new_collects_terminals() {
        let grammar = Grammar::new(
            "S",
            rules(vec![
                ("S", vec![vec![s_terminal('a'), s_nonterminal("A")]]),
                ("A", vec![vec![s_terminal('b')], vec![s_terminal('a')]]),
            ]),
        )
        .unwrap();

        assert_eq!(grammar.terminals().iter().collect::<String>(), "ab");
        assert_eq!(grammar.production_count(), 3);
        assert_eq!(grammar.nonterminals().collect_vec(), vec!["S", "A"]);
    }

    #[test]
    fn new_rejects_malformed_grammars() {
        assert_eq!(Grammar::new("S", Rules::new()), Err(GrammarError::Empty));

        assert_eq!(
            Grammar::new("T", rules(vec![("S", vec![vec![s_terminal('a')]])])),
            Err(GrammarError::MissingStart("T".to_string()))
        );

        assert_eq!(
            Grammar::new("S", rules(vec![("S", vec![vec![s_nonterminal("X")]])])),
            Err(GrammarError::UndefinedNonterminal {
                lhs: "S".to_string(),
                name: "X".to_string()
            })
        );

        assert_eq!(
            Grammar::new("S", rules(vec![("S", vec![vec![]])])),
            Err(GrammarError::EmptyAlternative("S".to_string()))
        );
    }

    #[test]
    fn display_prints_one_line_per_alternative() {
        let grammar = Grammar::new(
            "S",
            rules(vec![
                ("S", vec![vec![s_nonterminal("[item]"), s_terminal('+')], vec![s_terminal('x')]]),
                ("[item]", vec![vec![s_terminal('y')]]),
            ]),
        )
        .unwrap();

        assert_eq!(grammar.to_string(), "S -> [item] +\nS -> x\n[item] -> y\n");
    }
}
