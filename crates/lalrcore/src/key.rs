//! Dedup keys of item sets and the hash index built on top of them.

use crate::{automaton::StateID, item_list::ItemList, item_set::ItemSet, lookahead::LOOKAHEAD_BLOCKS};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// A compact encoding of the items of a state.
///
/// Each item contributes one word holding its production and dot, followed by
/// `LOOKAHEAD_BLOCKS` words of lookahead bits when lookaheads are included.
/// Since item lists are sorted by shape and every item occupies the same
/// number of words, two lists encode to the same key exactly when they hold
/// the same items (lookaheads compared only if included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    words: Box<[u32]>,
}

impl StateKey {
    pub fn build(items: &ItemList, include_lookaheads: bool) -> Self {
        let stride = if include_lookaheads { 1 + LOOKAHEAD_BLOCKS } else { 1 };
        let mut words = Vec::with_capacity(items.len() * stride);
        for item in items {
            words.push((u32::from(item.production.into_raw()) << 16) | u32::from(item.dot));
            if include_lookaheads {
                let blocks = item.lookaheads.blocks();
                debug_assert_eq!(blocks.len(), LOOKAHEAD_BLOCKS);
                words.extend_from_slice(blocks);
            }
        }
        Self {
            words: words.into_boxed_slice(),
        }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Map this key onto a bucket in `1..=bucket_count`.
    pub fn bucket(&self, bucket_count: usize) -> usize {
        assert!(bucket_count > 0, "bucket count must be positive");
        let mut hasher = FxHasher::default();
        self.words.hash(&mut hasher);
        (hasher.finish() % bucket_count as u64) as usize + 1
    }
}

/// Hash index from dedup keys to the states holding them.
///
/// Buckets only store state ids; the keys themselves are the ones cached in
/// the committed states, so lookups need the state vector at hand.
#[derive(Debug)]
pub(crate) struct KeyIndex {
    buckets: Vec<Vec<StateID>>,
    len: usize,
}

impl Default for KeyIndex {
    fn default() -> Self {
        Self {
            buckets: vec![Vec::new(); Self::INITIAL_BUCKETS],
            len: 0,
        }
    }
}

impl KeyIndex {
    const INITIAL_BUCKETS: usize = 64;

    fn slot(&self, key: &StateKey) -> usize {
        let count = self.buckets.len();
        let bucket = key.bucket(count);
        assert!(
            (1..=count).contains(&bucket),
            "hash bucket {} out of range 1..={}",
            bucket,
            count
        );
        bucket - 1
    }

    pub(crate) fn get(&self, key: &StateKey, states: &[ItemSet]) -> Option<StateID> {
        self.buckets[self.slot(key)]
            .iter()
            .copied()
            .find(|id| states[id.index()].key() == Some(key))
    }

    /// Register the state `id`, whose cached key must already be set.
    pub(crate) fn insert(&mut self, id: StateID, states: &[ItemSet]) {
        if self.len >= self.buckets.len() {
            self.grow(states);
        }
        let key = states[id.index()]
            .key()
            .expect("state registered without a dedup key");
        let slot = self.slot(key);
        self.buckets[slot].push(id);
        self.len += 1;
    }

    fn grow(&mut self, states: &[ItemSet]) {
        let count = self.buckets.len() * 2;
        tracing::trace!("rehashing state index into {} buckets", count);
        self.buckets = vec![Vec::new(); count];
        for (index, state) in states.iter().enumerate().take(self.len) {
            if let Some(key) = state.key() {
                let slot = self.slot(key);
                self.buckets[slot].push(StateID::from_index(index));
            }
        }
    }
}
