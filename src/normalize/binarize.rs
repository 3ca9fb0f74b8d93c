use indexmap::IndexMap;

use crate::grammar::{Grammar, Symbol};

use super::names::{NameAllocator, Origin};

/// A production of at most two symbols. Pairs may still contain terminals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Binary {
    Terminal(char),
    Pair(Symbol, Symbol),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BinaryGrammar {
    pub start_symbol: String,
    pub rules: IndexMap<String, Vec<Binary>>,
}

/// Splits every production longer than two symbols into a right-branching
/// chain of fresh `[BINn]` nonterminals, appended after the existing rules.
///
/// The input must be free of unit productions.
pub(crate) fn binarize(grammar: &Grammar, names: &mut NameAllocator) -> BinaryGrammar {
    let mut rules: IndexMap<String, Vec<Binary>> = grammar
        .nonterminals()
        .map(|nonterminal| (nonterminal.to_string(), Vec::new()))
        .collect();

    for (lhs, rewrite) in grammar.rules() {
        for alternative in rewrite {
            match alternative.as_slice() {
                [] | [Symbol::Nonterminal(_)] => {
                    unreachable!("`{}` has an empty or unit production left", lhs)
                }
                [Symbol::Terminal(c)] => {
                    rules.entry(lhs.clone()).or_default().push(Binary::Terminal(*c));
                }
                symbols => {
                    let mut head = lhs.clone();
                    let mut rest = symbols;
                    while let [first, tail @ ..] = rest {
                        if tail.len() == 1 {
                            let pair = Binary::Pair(first.clone(), tail[0].clone());
                            rules.entry(head).or_default().push(pair);
                            break;
                        }
                        let link = names.fresh(Origin::Binarization);
                        let pair = Binary::Pair(first.clone(), Symbol::nonterminal(link.as_str()));
                        rules.entry(head).or_default().push(pair);
                        head = link;
                        rest = tail;
                    }
                }
            }
        }
    }

    BinaryGrammar {
        start_symbol: grammar.start_symbol().to_string(),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    #[test]
    fn builds_right_branching_chain() {
        let grammar = parse_str("S -> A b C d\nS -> A b\nA -> a\nC -> c").unwrap();
        let mut names = NameAllocator::for_grammar(&grammar);

        let result = binarize(&grammar, &mut names);

        let expected: IndexMap<String, Vec<Binary>> = [
            (
                "S",
                vec![
                    Binary::Pair(s_nonterminal("A"), s_nonterminal("[BIN1]")),
                    Binary::Pair(s_nonterminal("A"), Symbol::Terminal('b')),
                ],
            ),
            ("A", vec![Binary::Terminal('a')]),
            ("C", vec![Binary::Terminal('c')]),
            ("[BIN1]", vec![Binary::Pair(Symbol::Terminal('b'), s_nonterminal("[BIN2]"))]),
            ("[BIN2]", vec![Binary::Pair(s_nonterminal("C"), Symbol::Terminal('d'))]),
        ]
        .into_iter()
        .map(|(lhs, productions)| (lhs.to_string(), productions))
        .collect();

        assert_eq!(result.rules, expected);
        assert_eq!(result.start_symbol, "S");
    }
}
