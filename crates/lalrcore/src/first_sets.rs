//! Calculation of first set function.

use crate::{
    grammar::{Grammar, NonterminalID, SymbolID},
    lookahead::LookaheadSet,
    types::{Map, Set},
};

#[derive(Debug)]
pub struct FirstSets {
    nulls: Set<NonterminalID>,
    map: Map<SymbolID, LookaheadSet>,
}

impl FirstSets {
    pub fn new(grammar: &Grammar) -> Self {
        let nulls = nulls_set(grammar);

        // First(t) = {t} for terminals, First(N) = {} to start with.
        let mut map: Map<SymbolID, LookaheadSet> = Map::default();
        for &t in grammar.terminals.keys() {
            map.insert(SymbolID::T(t), LookaheadSet::singleton(t));
        }
        for &n in grammar.nonterminals.keys() {
            map.insert(SymbolID::N(n), LookaheadSet::new());
        }

        // For a production X -> Y1 Y2 ... Yn, let Yk be the first symbol which
        // is not nullable. Then First(X) must include First(Yi) for i = 1..=k.
        struct Constraint {
            sup: SymbolID,
            sub: SymbolID,
        }
        let mut constraints = vec![];
        for production in grammar.productions.values() {
            let sup = SymbolID::N(production.left);
            for &symbol in &production.right {
                if symbol != sup {
                    constraints.push(Constraint { sup, sub: symbol });
                }
                if !matches!(symbol, SymbolID::N(n) if nulls.contains(&n)) {
                    break;
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for Constraint { sup, sub } in &constraints {
                let subset = map[sub].clone();
                changed |= map[sup].union_with(&subset);
            }
        }

        Self { nulls, map }
    }

    pub fn is_nullable(&self, n: NonterminalID) -> bool {
        self.nulls.contains(&n)
    }

    pub fn nullables(&self) -> impl Iterator<Item = NonterminalID> + '_ {
        self.nulls.iter().copied()
    }

    /// `First(symbol)`
    pub fn of(&self, symbol: SymbolID) -> &LookaheadSet {
        &self.map[&symbol]
    }

    /// `First(sequence)`, along with whether the whole sequence derives the empty string.
    pub fn first(&self, sequence: &[SymbolID]) -> (LookaheadSet, bool) {
        let mut res = LookaheadSet::new();
        for &symbol in sequence {
            res.union_with(&self.map[&symbol]);
            if !matches!(symbol, SymbolID::N(n) if self.nulls.contains(&n)) {
                return (res, false);
            }
        }
        (res, true)
    }
}

/// Calculate the set of nullable symbols in this grammar.
fn nulls_set(grammar: &Grammar) -> Set<NonterminalID> {
    let mut nulls: Set<NonterminalID> = grammar
        .productions
        .values()
        .filter_map(|p| p.right.is_empty().then_some(p.left))
        .collect();

    // Repeat until no more nullable symbols are found.
    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions.values() {
            if nulls.contains(&production.left) {
                continue;
            }
            let is_rhs_nullable = production
                .right
                .iter()
                .all(|symbol| matches!(symbol, SymbolID::N(n) if nulls.contains(n)));
            if is_rhs_nullable {
                changed = true;
                nulls.insert(production.left);
            }
        }
    }

    nulls
}
