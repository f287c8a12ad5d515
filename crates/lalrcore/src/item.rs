//! LR(1) items.

use crate::{
    grammar::{Grammar, ProductionID, SymbolID},
    lookahead::LookaheadSet,
    util::{display_fn, write_symbols},
};
use std::fmt;

/// The LR(0) part of an item, a.k.a. its core.
///
/// Shapes are ordered by production first, then by dot position. This
/// ordering is the sort key of `ItemList`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemShape {
    pub production: ProductionID,
    pub dot: u16,
}

/// LR(1) item: a production with a marker position and its lookahead symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub production: ProductionID,
    /// In `0..=right.len()`; `right.len()` is the reduce position.
    pub dot: u16,
    pub lookaheads: LookaheadSet,
}

impl Item {
    pub fn new(production: ProductionID, dot: u16, lookaheads: LookaheadSet) -> Self {
        Self {
            production,
            dot,
            lookaheads,
        }
    }

    #[inline]
    pub fn shape(&self) -> ItemShape {
        ItemShape {
            production: self.production,
            dot: self.dot,
        }
    }

    /// Whether this item belongs to the kernel of its state.
    pub fn is_kernel(&self) -> bool {
        self.dot > 0 || self.production == ProductionID::ACCEPT
    }

    /// The symbol immediately right of the dot, if any.
    pub fn next_symbol(&self, g: &Grammar) -> Option<SymbolID> {
        g.production(self.production)
            .right
            .get(usize::from(self.dot))
            .copied()
    }

    pub fn is_reduce(&self, g: &Grammar) -> bool {
        usize::from(self.dot) == g.production(self.production).right.len()
    }

    /// The item obtained by moving the dot over one symbol, keeping the lookaheads.
    pub fn advance(&self) -> Self {
        Self {
            dot: self.dot + 1,
            ..self.clone()
        }
    }

    /// Union `value` into the lookaheads as is.
    ///
    /// Only lookahead propagation uses this directly; items resident in a
    /// state go through `merge_resolved_lookaheads`.
    pub fn merge_lookaheads(&mut self, value: &LookaheadSet) -> bool {
        self.lookaheads.union_with(value)
    }

    /// Union `value` into the lookaheads, dropping the propagate marker.
    pub fn merge_resolved_lookaheads(&mut self, value: &LookaheadSet) -> bool {
        self.lookaheads.merge_resolved(value)
    }

    // `"(S := a . S b)  [$eoi b]"`
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            let production = g.production(self.production);
            write!(f, "({} := ", g.nonterminals[&production.left])?;
            write_symbols(f, g, &production.right, Some(usize::from(self.dot)))?;
            write!(f, ")  {}", self.lookaheads.display(g))
        })
    }
}
