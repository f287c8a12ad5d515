//! Lookahead sets over terminal symbols.

use crate::{
    grammar::{Grammar, TerminalID},
    util::display_fn,
};
use bit_set::BitSet;
use bit_vec::BitVec;
use std::fmt;

/// The number of terminal ids (reserved ones included) a lookahead set can hold.
pub const MAX_TERMINALS: usize = 256;

/// The number of `u32` blocks backing every lookahead set.
pub const LOOKAHEAD_BLOCKS: usize = MAX_TERMINALS / 32;

/// A fixed-width set of terminal symbols.
///
/// Every set is allocated at `MAX_TERMINALS` bits up front and never grows,
/// so all sets share the same block layout.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LookaheadSet {
    inner: BitSet,
}

impl Default for LookaheadSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LookaheadSet {
    pub fn new() -> Self {
        Self {
            inner: BitSet::from_bit_vec(BitVec::from_elem(MAX_TERMINALS, false)),
        }
    }

    pub fn singleton(token: TerminalID) -> Self {
        let mut set = Self::new();
        set.insert(token);
        set
    }

    #[inline]
    pub fn contains(&self, token: TerminalID) -> bool {
        self.inner.contains(token.into_raw().into())
    }

    /// Add a terminal, returning whether it was newly added.
    #[inline]
    pub fn insert(&mut self, token: TerminalID) -> bool {
        let raw = usize::from(token.into_raw());
        assert!(raw < MAX_TERMINALS, "terminal {:?} exceeds lookahead capacity", token);
        self.inner.insert(raw)
    }

    /// Same as `insert`, except that the propagate marker is ignored.
    #[inline]
    pub fn insert_resolved(&mut self, token: TerminalID) -> bool {
        token != TerminalID::PROPAGATE && self.insert(token)
    }

    /// Union `other` into this set, returning whether anything was added.
    pub fn union_with(&mut self, other: &Self) -> bool {
        if other.inner.is_subset(&self.inner) {
            return false;
        }
        self.inner.union_with(&other.inner);
        true
    }

    /// Same as `union_with`, except that the propagate marker in `other` is not carried over.
    pub fn merge_resolved(&mut self, other: &Self) -> bool {
        if other.contains(TerminalID::PROPAGATE) {
            let mut other = other.clone();
            other.strip_propagate();
            self.union_with(&other)
        } else {
            self.union_with(other)
        }
    }

    /// Remove the propagate marker, returning whether it was present.
    pub fn strip_propagate(&mut self) -> bool {
        self.inner
            .remove(TerminalID::PROPAGATE.into_raw().into())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TerminalID> + '_ {
        // The capacity assertion in `insert` keeps every raw value within `u16`.
        self.inner.iter().map(|raw| TerminalID::from_raw(raw as u16))
    }

    /// The raw storage, always `LOOKAHEAD_BLOCKS` words long.
    pub fn blocks(&self) -> &[u32] {
        self.inner.get_ref().storage()
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            f.write_str("[")?;
            for (i, token) in self.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(&g.terminals[&token])?;
            }
            f.write_str("]")
        })
    }
}

impl fmt::Debug for LookaheadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<TerminalID> for LookaheadSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = TerminalID>,
    {
        let mut set = Self::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}
