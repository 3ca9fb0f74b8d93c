use crate::grammar::{Grammar, Rules, Symbol};

use super::names::{NameAllocator, Origin};

/// Adds `[STARTn] -> S` in front of the rules so the start symbol never
/// occurs on a right-hand side.
pub(crate) fn isolate_start(grammar: &Grammar, names: &mut NameAllocator) -> Grammar {
    let start = names.fresh(Origin::Start);

    let mut rules = Rules::with_capacity(grammar.rules().len() + 1);
    rules.insert(
        start.clone(),
        vec![vec![Symbol::nonterminal(grammar.start_symbol())]],
    );
    rules.extend(grammar.rules().iter().map(|(lhs, rewrite)| (lhs.clone(), rewrite.clone())));

    Grammar::from_parts(start, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_recursive_start() {
        let grammar = parse_str("S -> a\nS -> S a").unwrap();
        let mut names = NameAllocator::for_grammar(&grammar);

        let wrapped = isolate_start(&grammar, &mut names);

        assert_eq!(wrapped.start_symbol(), "[START1]");
        assert_eq!(wrapped.to_string(), "[START1] -> S\nS -> a\nS -> S a\n");
    }
}
