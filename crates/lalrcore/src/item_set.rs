//! Item sets, i.e. the states of the automaton.

use crate::{
    goto::GotoTable,
    grammar::{Grammar, SymbolID},
    item::Item,
    item_list::ItemList,
    key::StateKey,
    util::display_fn,
};
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: ItemList,
    gotos: GotoTable,
    // Symbols right of some item's dot, sorted and distinct.
    successors: Vec<SymbolID>,
    key: Option<StateKey>,
}

impl ItemSet {
    pub fn new(items: ItemList) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_gotos(items: ItemList, gotos: GotoTable) -> Self {
        Self {
            items,
            gotos,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn gotos(&self) -> &GotoTable {
        &self.gotos
    }

    pub(crate) fn gotos_mut(&mut self) -> &mut GotoTable {
        &mut self.gotos
    }

    /// The symbols on which this state has a transition, in symbol order.
    ///
    /// Empty until `update_successors` runs; the automaton does it on `add`.
    pub fn successors(&self) -> &[SymbolID] {
        &self.successors
    }

    /// The dedup key cached when this set was committed to an automaton.
    pub fn key(&self) -> Option<&StateKey> {
        self.key.as_ref()
    }

    pub(crate) fn set_key(&mut self, key: StateKey) {
        self.key = Some(key);
    }

    pub fn update_successors(&mut self, g: &Grammar) {
        let mut successors: Vec<SymbolID> =
            self.items.iter().filter_map(|item| item.next_symbol(g)).collect();
        successors.sort_unstable();
        successors.dedup();
        self.successors = successors;
    }

    /// Replace the items, dropping every cache derived from the previous ones.
    pub(crate) fn replace_items(&mut self, items: ItemList) {
        self.items = items;
        self.successors.clear();
        self.key = None;
    }

    /// The unclosed kernel of the state reached from this one on `symbol`.
    pub fn goto_kernel(&self, g: &Grammar, symbol: SymbolID) -> ItemList {
        self.items
            .iter()
            .filter(|item| item.next_symbol(g) == Some(symbol))
            .map(Item::advance)
            .collect()
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            writeln!(f, "## items")?;
            write!(f, "{}", self.items.display(g))?;
            if !self.gotos.is_empty() {
                writeln!(f, "## gotos")?;
                for edge in &self.gotos {
                    writeln!(f, "- {} => goto({})", g.symbol_name(edge.symbol), edge.target)?;
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        automaton::StateID,
        grammar::{ProductionID, SymbolID::*, TerminalID},
        lookahead::LookaheadSet,
    };

    #[test]
    fn successors_and_goto_kernels() {
        let g = Grammar::define(|g| {
            let a = g.terminal("a")?;
            let b = g.terminal("b")?;
            let s = g.nonterminal("S")?;
            g.rule(s, [T(a), N(s), T(b)])?;
            g.rule(s, [])?;
            Ok(())
        })
        .unwrap();
        let a = g.terminal_by_name("a").unwrap();
        let s = g.nonterminal_by_name("S").unwrap();
        let eoi = LookaheadSet::singleton(TerminalID::EOI);

        let items: ItemList = [
            Item::new(ProductionID::ACCEPT, 0, eoi.clone()),
            Item::new(ProductionID::from_raw(1), 0, eoi.clone()),
            Item::new(ProductionID::from_raw(2), 0, eoi.clone()),
        ]
        .into_iter()
        .collect();
        let mut set = ItemSet::new(items);
        assert!(set.successors().is_empty());

        set.update_successors(&g);
        assert_eq!(set.successors(), &[T(a), N(s)]);

        let kernel = set.goto_kernel(&g, T(a));
        assert_eq!(kernel.len(), 1);
        assert_eq!(kernel[0].shape(), Item::new(ProductionID::from_raw(1), 1, eoi.clone()).shape());
        assert_eq!(kernel[0].lookaheads, eoi);
        assert!(set.goto_kernel(&g, T(TerminalID::EOI)).is_empty());

        set.gotos_mut().insert(T(a), StateID::from_raw(1));
        let rendered = set.display(&g).to_string();
        assert!(rendered.contains("- (S := . a S b)  [$eoi]"), "{}", rendered);
        assert!(rendered.contains("- a => goto(1)"), "{}", rendered);

        set.replace_items(ItemList::new());
        assert!(set.successors().is_empty());
        assert!(set.key().is_none());
    }
}
