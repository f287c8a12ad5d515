//! The store of automaton states.

use crate::{
    builder::Mode,
    grammar::{Grammar, SymbolID},
    item_list::ItemList,
    item_set::ItemSet,
    key::{KeyIndex, StateKey},
    util::display_fn,
};
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StateID(u32);

impl StateID {
    pub const START: Self = Self(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("too many states"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S#{:03}", self.0)
    }
}

impl fmt::Display for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The states of an automaton, numbered in discovery order.
///
/// States live in a dense vector whose index is the state number; a separate
/// hash index answers whether a state with a given key already exists.
#[derive(Debug)]
pub struct Automaton {
    states: Vec<ItemSet>,
    index: KeyIndex,
    mode: Mode,
}

impl Automaton {
    pub fn new(mode: Mode) -> Self {
        Self {
            states: Vec::new(),
            index: KeyIndex::default(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The id the next added state must be registered with.
    pub fn next_id(&self) -> StateID {
        StateID::from_index(self.states.len())
    }

    pub fn states(&self) -> impl Iterator<Item = (StateID, &ItemSet)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateID::from_index(i), state))
    }

    pub fn state(&self, id: StateID) -> &ItemSet {
        &self.states[id.index()]
    }

    /// Compute the dedup key of `candidate` under the mode of this automaton.
    pub fn key_for(&self, candidate: &ItemSet) -> StateKey {
        StateKey::build(candidate.items(), self.mode.includes_lookaheads())
    }

    /// Look up the state whose key equals `key`.
    pub fn probe(&self, key: &StateKey) -> Option<StateID> {
        self.index.get(key, &self.states)
    }

    /// Commit a new state.
    ///
    /// `key` must be the result of `key_for(&candidate)` and the caller must
    /// have confirmed through `probe` that no state holds it yet.
    ///
    /// # Panics
    /// Panics if `id` is not the next free state number.
    pub fn add(&mut self, mut candidate: ItemSet, key: StateKey, id: StateID, g: &Grammar) -> StateID {
        assert_eq!(
            id,
            self.next_id(),
            "state {:?} added out of sequence",
            id
        );
        debug_assert!(self.probe(&key).is_none(), "state {:?} is a duplicate", id);

        candidate.update_successors(g);
        candidate.set_key(key);
        self.states.push(candidate);
        self.index.insert(id, &self.states);

        tracing::debug!("add state {:?} ({} items)", id, self.states[id.index()].items().len());
        id
    }

    /// The target of the edge labelled `symbol` leaving `from`.
    pub fn goto(&self, from: StateID, symbol: SymbolID) -> Option<StateID> {
        self.states[from.index()].gotos().target(symbol)
    }

    pub fn add_goto(&mut self, from: StateID, symbol: SymbolID, to: StateID) -> bool {
        assert!(to.index() < self.states.len(), "goto to unknown state {:?}", to);
        self.states[from.index()].gotos_mut().insert(symbol, to)
    }

    /// Install the final lookaheads of an LALR state.
    ///
    /// # Panics
    /// Panics if the automaton keys states by lookaheads or if the shapes of
    /// `items` differ from the current ones.
    pub(crate) fn refill_lookaheads(&mut self, id: StateID, items: ItemList, g: &Grammar) {
        assert!(
            !self.mode.includes_lookaheads(),
            "lookaheads of a keyed state cannot change"
        );
        let state = &mut self.states[id.index()];
        assert!(
            state.items().same_shapes(&items),
            "lookahead fill-in changed the items of {:?}",
            id
        );
        let key = state.key().cloned();
        state.replace_items(items);
        state.update_successors(g);
        if let Some(key) = key {
            state.set_key(key);
        }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (i, (id, state)) in self.states().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "#### State {:02}", id)?;
                write!(f, "{}", state.display(g))?;
            }
            Ok(())
        })
    }
}
