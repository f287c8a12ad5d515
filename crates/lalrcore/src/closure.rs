//! Closure of LR(1) item sets.

use crate::{
    first_sets::FirstSets,
    grammar::{Grammar, SymbolID},
    item::{Item, ItemShape},
    item_list::ItemList,
    item_set::ItemSet,
    types::Worklist,
};

/// Expand a kernel into the full item set of its state.
///
/// The result is a fresh `ItemSet`: items and goto edges of `kernel` are
/// copied, never shared.
pub fn closure(kernel: &ItemSet, g: &Grammar, first_sets: &FirstSets) -> ItemSet {
    let mut items = kernel.items().clone();
    close_items(&mut items, g, first_sets);
    let mut closed = ItemSet::with_gotos(items, kernel.gotos().clone());
    closed.update_successors(g);
    closed
}

/// Close `items` in place.
///
/// For `[X -> ... . N beta, L]` and every production `N -> gamma`, the item
/// `[N -> . gamma, First(beta)]` is added, plus `L` when `beta` is nullable.
/// Items of the same shape share one lookahead set, so an item is expanded
/// again whenever its lookaheads grow. The propagate marker is carried along
/// like any other terminal.
pub(crate) fn close_items(items: &mut ItemList, g: &Grammar, first_sets: &FirstSets) {
    let mut pending: Worklist<ItemShape> = items.iter().map(Item::shape).collect();
    while let Some(shape) = pending.pop() {
        let Some(index) = items.find(shape.production, shape.dot) else {
            continue;
        };

        let production = g.production(shape.production);
        let (n, beta) = match &production.right[usize::from(shape.dot)..] {
            [SymbolID::N(n), beta @ ..] => (*n, beta),
            _ => continue,
        };

        let (mut lookaheads, nullable) = first_sets.first(beta);
        if nullable {
            lookaheads.union_with(&items[index].lookaheads);
        }

        for &id in g.productions_of(n) {
            if items.insert(Item::new(id, 0, lookaheads.clone())) {
                tracing::trace!("closure: expand {:?} with {:?}", id, lookaheads);
                pending.push(ItemShape {
                    production: id,
                    dot: 0,
                });
            }
        }
    }
}
