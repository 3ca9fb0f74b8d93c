use std::collections::VecDeque;

use indexmap::IndexSet;
use log::{debug, warn};
use rand::Rng;

use crate::grammar::{Grammar, Rules, Symbol};

fn all_within(alternative: &[Symbol], allowed: &IndexSet<&str>) -> bool {
    alternative
        .iter()
        .all(|symbol| symbol.as_nonterminal().map_or(true, |name| allowed.contains(name)))
}

/// Nonterminals that derive at least one terminal string, in grammar order.
pub(crate) fn generating_nonterminals(grammar: &Grammar) -> IndexSet<&str> {
    let mut generating = IndexSet::new();

    loop {
        let mut changed = false;
        for (lhs, rewrite) in grammar.rules() {
            if generating.contains(lhs.as_str()) {
                continue;
            }
            if rewrite.iter().any(|alternative| all_within(alternative, &generating)) {
                generating.insert(lhs.as_str());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Discovery order depends on the scan, report in rule order instead
    grammar
        .nonterminals()
        .filter(|nonterminal| generating.contains(nonterminal))
        .collect()
}

/// Nonterminals reachable from `start` through right-hand sides.
pub(crate) fn reachable_nonterminals<'g>(grammar: &'g Grammar, start: &'g str) -> IndexSet<&'g str> {
    let mut reachable = IndexSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let referenced = grammar
            .alternatives(current)
            .iter()
            .flatten()
            .filter_map(Symbol::as_nonterminal);
        for name in referenced {
            if reachable.insert(name) {
                queue.push_back(name);
            }
        }
    }

    reachable
}

// Keeps the nonterminals in `keep` and the alternatives that only use them
fn restrict(grammar: &Grammar, keep: &IndexSet<&str>, start: &str) -> Grammar {
    let rules: Rules = grammar
        .rules()
        .iter()
        .filter(|(lhs, _)| keep.contains(lhs.as_str()))
        .map(|(lhs, rewrite)| {
            let rewrite = rewrite
                .iter()
                .filter(|alternative| all_within(alternative, keep))
                .cloned()
                .collect();
            (lhs.clone(), rewrite)
        })
        .collect();

    Grammar::from_parts(start.to_string(), rules)
}

/// Removes nonterminals that are not both generating and reachable.
///
/// When the start symbol generates nothing, a generating nonterminal picked
/// with `rng` takes its place. This changes the recognised language, and is
/// logged as a warning. If no nonterminal generates anything the result is
/// the start symbol without productions.
pub(crate) fn eliminate_useless_symbols<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R) -> Grammar {
    let generating = generating_nonterminals(grammar);

    let start = if generating.contains(grammar.start_symbol()) {
        grammar.start_symbol()
    } else if generating.is_empty() {
        warn!("no nonterminal derives a terminal string, the language is empty");
        let mut rules = Rules::new();
        rules.insert(grammar.start_symbol().to_string(), Vec::new());
        return Grammar::from_parts(grammar.start_symbol().to_string(), rules);
    } else {
        let substitute = generating[rng.gen_range(0..generating.len())];
        warn!(
            "start symbol `{}` derives no terminal string, substituting `{}`",
            grammar.start_symbol(),
            substitute
        );
        substitute
    };

    let generative = restrict(grammar, &generating, start);
    let reachable = reachable_nonterminals(&generative, start);
    debug!(
        "{} generating and {} reachable of {} nonterminals",
        generating.len(),
        reachable.len(),
        grammar.rules().len()
    );

    let useful: IndexSet<&str> = generating
        .iter()
        .copied()
        .filter(|nonterminal| reachable.contains(nonterminal))
        .collect();

    restrict(&generative, &useful, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generating_needs_a_terminal_derivation() {
        let grammar = parse_str("S -> A B\nS -> a\nA -> A a\nB -> b").unwrap();

        assert_eq!(generating_nonterminals(&grammar).into_iter().collect_vec(), vec!["S", "B"]);
    }

    #[test]
    fn reachable_from_start() {
        let grammar = parse_str("S -> a A\nA -> b\nX -> S").unwrap();

        assert_eq!(reachable_nonterminals(&grammar, "S").into_iter().collect_vec(), vec!["S", "A"]);
    }

    #[test]
    fn removes_unreachable_and_nongenerating() {
        let grammar = parse_str("S -> a\nS -> A b\nA -> A a\nX -> b").unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let result = eliminate_useless_symbols(&grammar, &mut rng);

        assert_eq!(result.start_symbol(), "S");
        assert_eq!(result.to_string(), "S -> a\n");
    }

    #[test]
    fn substitutes_generating_start() {
        let grammar = parse_str("S -> S a\nX -> b\nX -> Y\nY -> c").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let result = eliminate_useless_symbols(&grammar, &mut rng);

        // Only X and Y generate, whichever is picked keeps just its own subtree
        match result.start_symbol() {
            "X" => assert_eq!(result.to_string(), "X -> b\nX -> Y\nY -> c\n"),
            "Y" => assert_eq!(result.to_string(), "Y -> c\n"),
            other => panic!("unexpected start symbol {}", other),
        }
    }

    #[test]
    fn empty_language_keeps_bare_start() {
        let grammar = parse_str("S -> S a").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = eliminate_useless_symbols(&grammar, &mut rng);

        assert_eq!(result.start_symbol(), "S");
        assert_eq!(result.alternatives("S"), &[] as &[Vec<Symbol>]);
        assert_eq!(result.production_count(), 0);
    }
}
