//! Utility types.

use std::{collections::VecDeque, hash::Hash};

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;

/// A FIFO worklist which never holds the same value twice.
///
/// A value popped from the list may be pushed again later, which is what
/// fixed-point iterations need when an already processed entry changes.
#[derive(Debug)]
pub struct Worklist<T> {
    queue: VecDeque<T>,
    pending: Set<T>,
}

impl<T> Default for Worklist<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: Set::default(),
        }
    }
}

impl<T> Worklist<T>
where
    T: Clone + Eq + Hash,
{
    /// Schedule a value, returning `false` if it is already pending.
    pub fn push(&mut self, value: T) -> bool {
        if !self.pending.insert(value.clone()) {
            return false;
        }
        self.queue.push_back(value);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.queue.pop_front()?;
        self.pending.swap_remove(&value);
        Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> FromIterator<T> for Worklist<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut worklist = Self::default();
        for value in iter {
            worklist.push(value);
        }
        worklist
    }
}
