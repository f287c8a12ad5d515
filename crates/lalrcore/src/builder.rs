//! Construction of canonical LR(1) and LALR(1) automata.

use crate::{
    automaton::{Automaton, StateID},
    closure::{close_items, closure},
    first_sets::FirstSets,
    grammar::{Grammar, ProductionID, SymbolID, TerminalID},
    item::{Item, ItemShape},
    item_list::ItemList,
    item_set::ItemSet,
    lookahead::LookaheadSet,
    types::{Map, Set},
};

/// How states are told apart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Knuth's canonical LR(1): states differ whenever their lookaheads do.
    Canonical,

    /// DeRemer's LALR(1): states with the same LR(0) items are one state,
    /// and their lookaheads are computed afterwards by propagation.
    #[default]
    LALR,
}

impl Mode {
    /// Whether the dedup key of a state covers the lookaheads of its items.
    pub fn includes_lookaheads(self) -> bool {
        matches!(self, Self::Canonical)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self { mode: Mode::LALR }
    }

    /// Build a canonical LR(1) automaton.
    pub fn use_canonical(&mut self) -> &mut Self {
        self.mode = Mode::Canonical;
        self
    }

    /// Build an LALR(1) automaton. This is the default.
    pub fn use_lalr(&mut self) -> &mut Self {
        self.mode = Mode::LALR;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generate(&self, grammar: &Grammar) -> Automaton {
        Automaton::generate_with_config(grammar, self)
    }
}

impl Automaton {
    pub fn generate(grammar: &Grammar) -> Self {
        Self::generate_with_config(grammar, &Config::new())
    }

    pub fn generate_with_config(grammar: &Grammar, config: &Config) -> Self {
        let mut gen = AutomatonGenerator::new(grammar, config.mode);
        gen.populate_states();
        if !config.mode.includes_lookaheads() {
            gen.fill_lalr_lookaheads();
        }
        tracing::debug!(
            "generated {} states ({:?})",
            gen.automaton.len(),
            config.mode
        );
        gen.automaton
    }
}

struct AutomatonGenerator<'g> {
    grammar: &'g Grammar,
    first_sets: FirstSets,
    automaton: Automaton,
}

impl<'g> AutomatonGenerator<'g> {
    fn new(grammar: &'g Grammar, mode: Mode) -> Self {
        Self {
            grammar,
            first_sets: FirstSets::new(grammar),
            automaton: Automaton::new(mode),
        }
    }

    fn populate_states(&mut self) {
        let g = self.grammar;

        let start: ItemList = Some(Item::new(
            ProductionID::ACCEPT,
            0,
            LookaheadSet::singleton(TerminalID::EOI),
        ))
        .into_iter()
        .collect();
        let start = closure(&ItemSet::new(start), g, &self.first_sets);
        let key = self.automaton.key_for(&start);
        self.automaton.add(start, key, StateID::START, g);

        // States are appended while we walk over them, so the store itself is the queue.
        let mut current = 0;
        while current < self.automaton.len() {
            let from = StateID::from_index(current);
            let successors = self.automaton.state(from).successors().to_vec();
            for symbol in successors {
                let mut kernel = self.automaton.state(from).goto_kernel(g, symbol);
                if !self.automaton.mode().includes_lookaheads() {
                    kernel = kernel
                        .iter()
                        .map(|item| Item::new(item.production, item.dot, LookaheadSet::new()))
                        .collect();
                }

                let candidate = closure(&ItemSet::new(kernel), g, &self.first_sets);
                let key = self.automaton.key_for(&candidate);
                let to = match self.automaton.probe(&key) {
                    Some(to) => to,
                    None => {
                        let id = self.automaton.next_id();
                        self.automaton.add(candidate, key, id, g)
                    }
                };
                tracing::trace!("goto({:?}, {}) = {:?}", from, g.symbol_name(symbol), to);
                self.automaton.add_goto(from, symbol, to);
            }
            current += 1;
        }
    }

    /// Compute the LALR(1) lookaheads of an automaton built from LR(0) kernels.
    fn fill_lalr_lookaheads(&mut self) {
        let g = self.grammar;

        // Lookaheads of every kernel item, and the propagation links between them.
        let mut kernels: Map<(StateID, ItemShape), LookaheadSet> = Map::default();
        for (id, state) in self.automaton.states() {
            for item in state.items().iter().filter(|item| item.is_kernel()) {
                kernels.insert((id, item.shape()), LookaheadSet::new());
            }
        }
        if let Some(start) = kernels.get_mut(&(
            StateID::START,
            ItemShape {
                production: ProductionID::ACCEPT,
                dot: 0,
            },
        )) {
            start.insert(TerminalID::EOI);
        }

        let mut links: Set<(usize, usize)> = Set::default();
        for index in 0..kernels.len() {
            let Some((&(from, shape), _)) = kernels.get_index(index) else {
                continue;
            };

            let mut items: ItemList = Some(Item::new(
                shape.production,
                shape.dot,
                LookaheadSet::singleton(TerminalID::PROPAGATE),
            ))
            .into_iter()
            .collect();
            close_items(&mut items, g, &self.first_sets);

            for item in &items {
                let Some(symbol) = item.next_symbol(g) else {
                    continue;
                };
                let to = self
                    .automaton
                    .goto(from, symbol)
                    .expect("closure item without a goto edge");
                let target = kernels
                    .get_index_of(&(to, item.advance().shape()))
                    .expect("advanced item missing from the goto kernel");

                if item.lookaheads.contains(TerminalID::PROPAGATE) {
                    links.insert((index, target));
                }
                if let Some((_, lookaheads)) = kernels.get_index_mut(target) {
                    if lookaheads.merge_resolved(&item.lookaheads) {
                        tracing::trace!(
                            "spontaneous lookaheads {:?} for {:?} in {:?}",
                            item.lookaheads,
                            item.advance().shape(),
                            to
                        );
                    }
                }
            }
        }
        tracing::debug!(
            "{} kernel items, {} propagation links",
            kernels.len(),
            links.len()
        );

        let mut changed = true;
        let mut passes = 0;
        while changed {
            changed = false;
            passes += 1;
            for &(from, to) in &links {
                if from == to {
                    continue;
                }
                let Some((_, lookaheads)) = kernels.get_index(from) else {
                    continue;
                };
                let lookaheads = lookaheads.clone();
                if let Some((_, target)) = kernels.get_index_mut(to) {
                    changed |= target.merge_resolved(&lookaheads);
                }
            }
        }
        tracing::debug!("lookahead propagation settled after {} passes", passes);

        let ids: Vec<StateID> = self.automaton.states().map(|(id, _)| id).collect();
        for id in ids {
            let mut items = ItemList::new();
            for item in self.automaton.state(id).items().iter().filter(|item| item.is_kernel()) {
                let lookaheads = kernels
                    .get(&(id, item.shape()))
                    .cloned()
                    .unwrap_or_default();
                items.insert_resolved(Item::new(item.production, item.dot, lookaheads));
            }
            close_items(&mut items, g, &self.first_sets);
            self.automaton.refill_lookaheads(id, items, g);
        }
    }
}

/// The productions a state may reduce by, grouped by lookahead.
pub fn reductions(state: &ItemSet, g: &Grammar) -> Map<TerminalID, Vec<ProductionID>> {
    let mut reductions: Map<TerminalID, Vec<ProductionID>> = Map::default();
    for item in state.items().iter().filter(|item| item.is_reduce(g)) {
        for token in item.lookaheads.iter() {
            let productions = reductions.entry(token).or_default();
            if !productions.contains(&item.production) {
                productions.push(item.production);
            }
        }
    }
    reductions
}

/// The lookaheads on which `state` both shifts and reduces, or reduces by more than one production.
pub fn conflicts(state: &ItemSet, g: &Grammar) -> Vec<TerminalID> {
    let mut conflicts: Vec<TerminalID> = reductions(state, g)
        .into_iter()
        .filter(|(token, productions)| {
            productions.len() > 1 || state.gotos().contains(SymbolID::T(*token))
        })
        .map(|(token, _)| token)
        .collect();
    conflicts.sort_unstable();
    conflicts
}
