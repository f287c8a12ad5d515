//! The core of an LR(1) / LALR(1) automaton generator.

pub mod automaton;
pub mod builder;
pub mod closure;
pub mod first_sets;
pub mod goto;
pub mod grammar;
pub mod item;
pub mod item_list;
pub mod item_set;
pub mod key;
pub mod lookahead;
pub mod types;
pub mod util;

pub use crate::{
    automaton::{Automaton, StateID},
    builder::{Config, Mode},
    grammar::{Grammar, GrammarDef, GrammarDefError},
};
