/*
    This module decides membership for grammars in Chomsky normal form
*/

use std::collections::{HashMap, HashSet};

use itertools::iproduct;

use crate::grammar::{CnfGrammar, CnfProduction};

// Nonterminals, by their index in the grammar, that derive one substring
type Cell = HashSet<usize>;

/// CYK recognizer for one grammar.
///
/// Productions are indexed once up front: `A -> a` by terminal and
/// `A -> B C` by the pair `(B, C)`, so the table recurrence never scans the
/// rule list. Recognition holds no mutable state and can run from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct Recognizer {
    start: usize,
    unary: HashMap<char, Vec<usize>>,
    binary: HashMap<(usize, usize), Vec<usize>>,
}

impl Recognizer {
    pub fn new(grammar: &CnfGrammar) -> Self {
        let index_of = |name: &str| grammar.rules().get_index_of(name);

        let mut unary: HashMap<char, Vec<usize>> = HashMap::new();
        let mut binary: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (lhs, productions) in grammar.rules().values().enumerate() {
            for production in productions {
                match production {
                    CnfProduction::Terminal(c) => unary.entry(*c).or_default().push(lhs),
                    CnfProduction::Pair(left, right) => {
                        // Operands are always defined, CnfGrammar checks it
                        let operands = (index_of(left.as_str()), index_of(right.as_str()));
                        if let (Some(left), Some(right)) = operands {
                            binary.entry((left, right)).or_default().push(lhs);
                        }
                    }
                }
            }
        }

        Recognizer {
            start: index_of(grammar.start_symbol()).unwrap_or(usize::MAX),
            unary,
            binary,
        }
    }

    /// True if the grammar derives `word`, read as one terminal per `char`.
    /// The empty word is never accepted.
    pub fn recognise(&self, word: &str) -> bool {
        let tokens: Vec<char> = word.chars().collect();
        let n = tokens.len();
        if n == 0 {
            return false;
        }

        // table[l - 1][i] holds the nonterminals deriving tokens[i..i + l]
        let mut table: Vec<Vec<Cell>> = Vec::with_capacity(n);

        let base: Vec<Cell> = tokens
            .iter()
            .map(|c| self.unary.get(c).into_iter().flatten().copied().collect())
            .collect();
        if base.iter().any(Cell::is_empty) {
            return false;
        }
        table.push(base);

        for length in 2..=n {
            let row: Vec<Cell> = (0..=n - length)
                .map(|i| {
                    let mut cell = Cell::new();
                    for split in 1..length {
                        let left = &table[split - 1][i];
                        let right = &table[length - split - 1][i + split];
                        for (b, c) in iproduct!(left, right) {
                            if let Some(heads) = self.binary.get(&(*b, *c)) {
                                cell.extend(heads);
                            }
                        }
                    }
                    cell
                })
                .collect();
            table.push(row);
        }

        table[n - 1][0].contains(&self.start)
    }
}

/// Builds a [`Recognizer`] for `grammar` and checks `word` once.
pub fn parse(grammar: &CnfGrammar, word: &str) -> bool {
    Recognizer::new(grammar).recognise(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::CnfRules;
    use crate::normalize::normalize;
    use crate::parser::parse_str;

    fn normalized(text: &str) -> CnfGrammar {
        normalize(&parse_str(text).unwrap())
    }

    // a^n b^n, n >= 1
    fn balanced() -> CnfGrammar {
        let pair = |l: &str, r: &str| CnfProduction::Pair(l.to_string(), r.to_string());
        let mut rules = CnfRules::new();
        rules.insert("S".to_string(), vec![pair("A", "B"), pair("A", "T")]);
        rules.insert("T".to_string(), vec![pair("S", "B")]);
        rules.insert("A".to_string(), vec![CnfProduction::Terminal('a')]);
        rules.insert("B".to_string(), vec![CnfProduction::Terminal('b')]);
        CnfGrammar::new("S", rules).unwrap()
    }

    #[test]
    fn hand_written_grammar() {
        let recognizer = Recognizer::new(&balanced());

        for word in ["ab", "aabb", "aaabbb"] {
            assert!(recognizer.recognise(word), "{}", word);
        }
        for word in ["", "a", "ba", "abab", "aab", "abb", "aabbb"] {
            assert!(!recognizer.recognise(word), "{}", word);
        }
    }

    #[test]
    fn left_recursion() {
        let cnf = normalized("S -> a\nS -> S a");

        assert!(parse(&cnf, "a"));
        assert!(parse(&cnf, "aa"));
        assert!(parse(&cnf, "aaaaaaa"));
        assert!(!parse(&cnf, "b"));
        assert!(!parse(&cnf, ""));
    }

    #[test]
    fn near_normal_form() {
        let cnf = normalized("S -> A B\nA -> a\nB -> b");

        assert!(parse(&cnf, "ab"));
        assert!(!parse(&cnf, "ba"));
    }

    #[test]
    fn unit_chain() {
        let cnf = normalized("S -> A\nA -> B\nB -> c");

        assert!(parse(&cnf, "c"));
        assert!(!parse(&cnf, "cc"));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let cnf = normalized("S -> a S\nS -> a");

        assert!(!parse(&cnf, "aaz"));
        assert!(!parse(&cnf, "é"));
    }

    #[test]
    fn empty_language_accepts_nothing() {
        let cnf = normalized("S -> S a\nS -> a S");

        assert!(!parse(&cnf, "a"));
        assert!(!parse(&cnf, "aa"));
    }

    #[test]
    fn empty_word_is_never_accepted() {
        for text in ["S -> a", "S -> A A\nA -> a", "S -> S S\nS -> e"] {
            assert!(!parse(&normalized(text), ""));
        }
    }

    #[test]
    fn recognition_is_deterministic() {
        let cnf = normalized("S -> ( S )\nS -> S S\nS -> ( )");
        let recognizer = Recognizer::new(&cnf);

        for word in ["(())()", "(()", "()()()", ")("] {
            assert_eq!(recognizer.recognise(word), recognizer.recognise(word));
            assert_eq!(recognizer.recognise(word), parse(&cnf, word));
        }
        assert!(recognizer.recognise("(())()"));
        assert!(!recognizer.recognise("(()"));
    }
}
