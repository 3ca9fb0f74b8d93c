use std::collections::VecDeque;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Rules, Symbol};

// The target of a unit production `A -> B`
fn unit_target(alternative: &Alternative) -> Option<&str> {
    match alternative.as_slice() {
        [Symbol::Nonterminal(name)] => Some(name),
        _ => None,
    }
}

/// Every nonterminal reachable from `nonterminal` through zero or more unit
/// productions, in breadth-first discovery order (`nonterminal` first).
pub(crate) fn unit_closure<'g>(grammar: &'g Grammar, nonterminal: &'g str) -> IndexSet<&'g str> {
    let mut closure = IndexSet::from([nonterminal]);
    let mut queue = VecDeque::from([nonterminal]);

    while let Some(current) = queue.pop_front() {
        for target in grammar.alternatives(current).iter().filter_map(unit_target) {
            if closure.insert(target) {
                queue.push_back(target);
            }
        }
    }

    closure
}

/// Replaces unit productions by the non-unit productions they lead to.
pub(crate) fn eliminate_unit_productions(grammar: &Grammar) -> Grammar {
    let rules: Rules = grammar
        .nonterminals()
        .map(|nonterminal| {
            let rewrite = unit_closure(grammar, nonterminal)
                .into_iter()
                .flat_map(|member| grammar.alternatives(member))
                .filter(|alternative| unit_target(alternative).is_none())
                .unique()
                .cloned()
                .collect();
            (nonterminal.to_string(), rewrite)
        })
        .collect();

    Grammar::from_parts(grammar.start_symbol().to_string(), rules)
}
