/*
    Grammars whose productions are restricted to the two Chomsky normal form shapes
*/

use std::collections::BTreeSet;
use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

use super::{Grammar, GrammarError, Rules, Symbol};

/// A production in Chomsky normal form: `A -> a` or `A -> B C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CnfProduction {
    Terminal(char),
    Pair(String, String),
}

impl Display for CnfProduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfProduction::Terminal(c) => write!(f, "{}", c),
            CnfProduction::Pair(left, right) => write!(f, "{} {}", left, right),
        }
    }
}

pub type CnfRules = IndexMap<String, Vec<CnfProduction>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnfGrammar {
    start_symbol: String,
    rules: CnfRules,
    terminals: BTreeSet<char>,
}

impl CnfGrammar {
    /// Validates that the start symbol and every pair operand are defined.
    pub fn new(start_symbol: impl Into<String>, rules: CnfRules) -> Result<Self, GrammarError> {
        let start_symbol = start_symbol.into();

        if !rules.contains_key(&start_symbol) {
            return Err(GrammarError::MissingStart(start_symbol));
        }

        for (lhs, productions) in &rules {
            for production in productions {
                if let CnfProduction::Pair(left, right) = production {
                    if let Some(name) = [left, right].into_iter().find(|n| !rules.contains_key(*n)) {
                        return Err(GrammarError::UndefinedNonterminal {
                            lhs: lhs.clone(),
                            name: name.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self::from_parts(start_symbol, rules))
    }

    pub(crate) fn from_parts(start_symbol: String, rules: CnfRules) -> Self {
        let terminals = rules
            .values()
            .flatten()
            .filter_map(|production| match production {
                CnfProduction::Terminal(c) => Some(*c),
                CnfProduction::Pair(..) => None,
            })
            .collect();

        CnfGrammar {
            start_symbol,
            rules,
            terminals,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn rules(&self) -> &CnfRules {
        &self.rules
    }

    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    pub fn productions(&self, nonterminal: &str) -> &[CnfProduction] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// True when the start symbol has nothing to derive.
    pub fn is_empty_language(&self) -> bool {
        self.productions(&self.start_symbol).is_empty()
    }
}

impl TryFrom<&Grammar> for CnfGrammar {
    type Error = GrammarError;

    /// Reinterprets a grammar that is already in Chomsky normal form.
    fn try_from(grammar: &Grammar) -> Result<Self, Self::Error> {
        let mut rules = CnfRules::with_capacity(grammar.rules().len());

        for (lhs, rewrite) in grammar.rules() {
            let productions = rewrite
                .iter()
                .map(|alternative| match alternative.as_slice() {
                    [Symbol::Terminal(c)] => Ok(CnfProduction::Terminal(*c)),
                    [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] => {
                        Ok(CnfProduction::Pair(left.clone(), right.clone()))
                    }
                    _ => Err(GrammarError::NotCnf {
                        lhs: lhs.clone(),
                        production: alternative.iter().join(" "),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rules.insert(lhs.clone(), productions);
        }

        Ok(Self::from_parts(grammar.start_symbol().to_string(), rules))
    }
}

impl From<&CnfGrammar> for Grammar {
    fn from(grammar: &CnfGrammar) -> Self {
        let rules: Rules = grammar
            .rules
            .iter()
            .map(|(lhs, productions)| {
                let rewrite = productions
                    .iter()
                    .map(|production| match production {
                        CnfProduction::Terminal(c) => vec![Symbol::Terminal(*c)],
                        CnfProduction::Pair(left, right) => {
                            vec![Symbol::nonterminal(left.as_str()), Symbol::nonterminal(right.as_str())]
                        }
                    })
                    .collect();
                (lhs.clone(), rewrite)
            })
            .collect();

        Grammar::from_parts(grammar.start_symbol.clone(), rules)
    }
}

impl Display for CnfGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, productions) in &self.rules {
            for production in productions {
                writeln!(f, "{} -> {}", lhs, production)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::{rules, s_nonterminal, s_terminal};
    use pretty_assertions::assert_eq;

    fn pair(left: &str, right: &str) -> CnfProduction {
        CnfProduction::Pair(left.to_string(), right.to_string())
    }

    #[test]
    fn new_rejects_undefined_operands() {
        let mut cnf_rules = CnfRules::new();
        cnf_rules.insert("S".to_string(), vec![pair("A", "B")]);
        cnf_rules.insert("A".to_string(), vec![CnfProduction::Terminal('a')]);

        assert_eq!(
            CnfGrammar::new("S", cnf_rules),
            Err(GrammarError::UndefinedNonterminal {
                lhs: "S".to_string(),
                name: "B".to_string()
            })
        );
    }

    #[test]
    fn converts_grammar_already_in_normal_form() {
        let grammar = Grammar::new(
            "S",
            rules(vec![
                ("S", vec![vec![s_nonterminal("A"), s_nonterminal("B")]]),
                ("A", vec![vec![s_terminal('a')]]),
                ("B", vec![vec![s_terminal('b')]]),
            ]),
        )
        .unwrap();

        let cnf = CnfGrammar::try_from(&grammar).unwrap();
        assert_eq!(cnf.productions("S"), &[pair("A", "B")]);
        assert_eq!(cnf.terminals().iter().collect::<String>(), "ab");
        assert_eq!(Grammar::from(&cnf), grammar);
        assert_eq!(cnf.to_string(), grammar.to_string());
    }

    #[test]
    fn conversion_names_offending_production() {
        let grammar = Grammar::new(
            "S",
            rules(vec![
                ("S", vec![vec![s_terminal('a'), s_nonterminal("S")], vec![s_terminal('a')]]),
            ]),
        )
        .unwrap();

        assert_eq!(
            CnfGrammar::try_from(&grammar),
            Err(GrammarError::NotCnf {
                lhs: "S".to_string(),
                production: "a S".to_string()
            })
        );
    }
}
