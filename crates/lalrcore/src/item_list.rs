//! Sorted lists of LR(1) items.

use crate::{
    grammar::{Grammar, ProductionID},
    item::{Item, ItemShape},
    util::display_fn,
};
use std::{fmt, ops::Index, slice};

/// The items of one state, sorted by shape.
///
/// No two items in a list share a shape: inserting an item whose shape is
/// already present merges its lookaheads into the resident item instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn search(&self, shape: ItemShape) -> Result<usize, usize> {
        self.items.binary_search_by_key(&shape, Item::shape)
    }

    /// Insert an item, or merge its lookaheads into the item with the same shape.
    ///
    /// Returns `true` if an item was added or an existing one gained lookaheads.
    pub fn insert(&mut self, item: Item) -> bool {
        match self.search(item.shape()) {
            Ok(i) => self.items[i].merge_lookaheads(&item.lookaheads),
            Err(i) => {
                self.items.insert(i, item);
                true
            }
        }
    }

    /// Same as `insert`, except that the propagate marker is never stored.
    pub fn insert_resolved(&mut self, mut item: Item) -> bool {
        match self.search(item.shape()) {
            Ok(i) => self.items[i].merge_resolved_lookaheads(&item.lookaheads),
            Err(i) => {
                item.lookaheads.strip_propagate();
                self.items.insert(i, item);
                true
            }
        }
    }

    /// Find the position of the item with the given shape.
    pub fn find(&self, production: ProductionID, dot: u16) -> Option<usize> {
        self.search(ItemShape { production, dot }).ok()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Create a new list holding copies of the items accepted by `include`.
    pub fn filter<F>(&self, include: F) -> Self
    where
        F: Fn(&Item) -> bool,
    {
        Self {
            items: self.items.iter().filter(|item| include(*item)).cloned().collect(),
        }
    }

    /// The kernel items of this list.
    pub fn kernel(&self) -> Self {
        self.filter(Item::is_kernel)
    }

    /// Whether both lists consist of the same shapes, lookaheads aside.
    pub fn same_shapes(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(l, r)| l.shape() == r.shape())
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for item in &self.items {
                writeln!(f, "- {}", item.display(g))?;
            }
            Ok(())
        })
    }
}

impl Index<usize> for ItemList {
    type Output = Item;

    fn index(&self, index: usize) -> &Item {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        let mut list = Self::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}
