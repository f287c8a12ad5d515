//! Per-state transition edges.

use crate::{automaton::StateID, grammar::SymbolID};
use std::slice;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Goto {
    pub symbol: SymbolID,
    pub target: StateID,
}

/// Goto/shift edges of a state, sorted by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GotoTable {
    edges: Vec<Goto>,
}

impl GotoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an edge, returning `false` if the same edge already exists.
    ///
    /// # Panics
    /// Panics if `symbol` already leads to a different state.
    pub fn insert(&mut self, symbol: SymbolID, target: StateID) -> bool {
        match self.edges.binary_search_by_key(&symbol, |edge| edge.symbol) {
            Ok(i) => {
                let existing = self.edges[i].target;
                assert_eq!(
                    existing, target,
                    "conflicting goto targets on {:?}: {:?} and {:?}",
                    symbol, existing, target
                );
                false
            }
            Err(i) => {
                self.edges.insert(i, Goto { symbol, target });
                true
            }
        }
    }

    pub fn contains(&self, symbol: SymbolID) -> bool {
        self.target(symbol).is_some()
    }

    pub fn target(&self, symbol: SymbolID) -> Option<StateID> {
        self.edges
            .binary_search_by_key(&symbol, |edge| edge.symbol)
            .ok()
            .map(|i| self.edges[i].target)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Goto> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a GotoTable {
    type Item = &'a Goto;
    type IntoIter = slice::Iter<'a, Goto>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
