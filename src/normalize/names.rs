use std::collections::HashSet;
use std::fmt::Display;

use crate::grammar::Grammar;

/// Why a nonterminal was introduced, shown in its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Start,
    Binarization,
    TerminalHelper,
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Start => write!(f, "START"),
            Origin::Binarization => write!(f, "BIN"),
            Origin::TerminalHelper => write!(f, "TERM"),
        }
    }
}

/// Hands out nonterminal names that are unused within one normalization run.
///
/// Every name handed out is remembered, so later stages can never be given a
/// name an earlier stage already introduced. Names look like `[BIN3]`, which
/// is also valid bracketed-nonterminal syntax for the grammar parser.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    counter: usize,
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn for_grammar(grammar: &Grammar) -> Self {
        NameAllocator {
            counter: 1,
            used: grammar.nonterminals().map(str::to_string).collect(),
        }
    }

    pub fn fresh(&mut self, origin: Origin) -> String {
        loop {
            let name = format!("[{}{}]", origin, self.counter);
            self.counter += 1;
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::{rules, s_nonterminal, s_terminal};

    #[test]
    fn fresh_names_skip_existing_ones() {
        let grammar = Grammar::new(
            "S",
            rules(vec![
                ("S", vec![vec![s_nonterminal("[BIN2]"), s_terminal('a')]]),
                ("[BIN2]", vec![vec![s_terminal('b')]]),
            ]),
        )
        .unwrap();
        let mut names = NameAllocator::for_grammar(&grammar);

        assert_eq!(names.fresh(Origin::Start), "[START1]");
        assert_eq!(names.fresh(Origin::Binarization), "[BIN3]");
        assert_eq!(names.fresh(Origin::TerminalHelper), "[TERM4]");
        assert!(names.is_used("[BIN2]"));
        assert!(names.is_used("[TERM4]"));
    }
}
