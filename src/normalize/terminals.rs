use std::collections::HashMap;

use crate::grammar::{CnfGrammar, CnfProduction, CnfRules, Symbol};

use super::binarize::{Binary, BinaryGrammar};
use super::names::{NameAllocator, Origin};

// Maps each terminal to the one nonterminal standing in for it inside pairs
struct TerminalHelpers<'a> {
    helpers: HashMap<char, String>,
    created: CnfRules,
    names: &'a mut NameAllocator,
}

impl<'a> TerminalHelpers<'a> {
    // A nonterminal whose whole production set is `[t]` already derives
    // exactly `t` and can be reused. The start symbol is left out so it stays
    // off right-hand sides.
    fn new(grammar: &BinaryGrammar, names: &'a mut NameAllocator) -> Self {
        let mut helpers = HashMap::new();
        for (lhs, productions) in &grammar.rules {
            if let [Binary::Terminal(c)] = productions.as_slice() {
                if *lhs != grammar.start_symbol {
                    helpers.entry(*c).or_insert_with(|| lhs.clone());
                }
            }
        }

        TerminalHelpers {
            helpers,
            created: CnfRules::new(),
            names,
        }
    }

    fn nonterminal_for(&mut self, symbol: &Symbol) -> String {
        match symbol {
            Symbol::Nonterminal(name) => name.clone(),
            Symbol::Terminal(c) => {
                if let Some(helper) = self.helpers.get(c) {
                    return helper.clone();
                }
                let helper = self.names.fresh(Origin::TerminalHelper);
                self.created.insert(helper.clone(), vec![CnfProduction::Terminal(*c)]);
                self.helpers.insert(*c, helper.clone());
                helper
            }
        }
    }
}

/// Replaces terminals inside pairs by helper nonterminals, producing the
/// final Chomsky normal form. New helpers are appended after existing rules.
pub(crate) fn isolate_terminals(grammar: BinaryGrammar, names: &mut NameAllocator) -> CnfGrammar {
    let mut helpers = TerminalHelpers::new(&grammar, names);
    let mut rules = CnfRules::with_capacity(grammar.rules.len());

    for (lhs, productions) in &grammar.rules {
        let converted = productions
            .iter()
            .map(|production| match production {
                Binary::Terminal(c) => CnfProduction::Terminal(*c),
                Binary::Pair(left, right) => {
                    CnfProduction::Pair(helpers.nonterminal_for(left), helpers.nonterminal_for(right))
                }
            })
            .collect();
        rules.insert(lhs.clone(), converted);
    }

    rules.extend(helpers.created);
    CnfGrammar::from_parts(grammar.start_symbol, rules)
}
