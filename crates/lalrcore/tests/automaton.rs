mod grammars;

use lalrcore::{
    builder::conflicts,
    grammar::{Grammar, GrammarDef, GrammarDefError, ProductionID, SymbolID, TerminalID},
    lookahead::LookaheadSet,
    Automaton, Config, StateID,
};

fn grammar(f: fn(&mut GrammarDef) -> Result<(), GrammarDefError>) -> Grammar {
    Grammar::define(f).unwrap()
}

fn s(raw: u32) -> StateID {
    StateID::from_raw(raw)
}

fn edges(automaton: &Automaton, g: &Grammar) -> Vec<(u32, String, u32)> {
    automaton
        .states()
        .flat_map(|(id, state)| {
            state.gotos().iter().map(move |edge| {
                (
                    id.into_raw(),
                    g.symbol_name(edge.symbol).to_owned(),
                    edge.target.into_raw(),
                )
            })
        })
        .collect()
}

fn lookaheads(g: &Grammar, names: &[&str]) -> LookaheadSet {
    names
        .iter()
        .map(|name| match *name {
            "$eoi" => TerminalID::EOI,
            name => g.terminal_by_name(name).unwrap(),
        })
        .collect()
}

/// The lookaheads of the item `S -> a S b` with the given dot inside `state`.
fn kernel_lookaheads(automaton: &Automaton, state: StateID, dot: u16) -> &LookaheadSet {
    let items = automaton.state(state).items();
    let index = items.find(ProductionID::from_raw(1), dot).unwrap();
    &items[index].lookaheads
}

#[test]
fn anbn_canonical() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let g = grammar(grammars::anbn);
    let automaton = Config::new().use_canonical().generate(&g);
    eprintln!("{}", automaton.display(&g));

    assert_eq!(automaton.len(), 9);
    let expected: Vec<(u32, String, u32)> = [
        (0, "a", 1),
        (0, "S", 2),
        (1, "a", 3),
        (1, "S", 4),
        (2, "$eoi", 5),
        (3, "a", 3),
        (3, "S", 6),
        (4, "b", 7),
        (6, "b", 8),
    ]
    .into_iter()
    .map(|(from, symbol, to)| (from, symbol.to_owned(), to))
    .collect();
    assert_eq!(edges(&automaton, &g), expected);

    // a S b with the dot after `a`, reached from the start state and from itself
    assert_eq!(kernel_lookaheads(&automaton, s(1), 1), &lookaheads(&g, &["$eoi"]));
    assert_eq!(kernel_lookaheads(&automaton, s(3), 1), &lookaheads(&g, &["b"]));
    assert_eq!(kernel_lookaheads(&automaton, s(4), 2), &lookaheads(&g, &["$eoi"]));
    assert_eq!(kernel_lookaheads(&automaton, s(6), 2), &lookaheads(&g, &["b"]));
    assert_eq!(kernel_lookaheads(&automaton, s(7), 3), &lookaheads(&g, &["$eoi"]));
    assert_eq!(kernel_lookaheads(&automaton, s(8), 3), &lookaheads(&g, &["b"]));

    let empty = automaton.state(s(1)).items();
    let index = empty.find(ProductionID::from_raw(2), 0).unwrap();
    assert_eq!(empty[index].lookaheads, lookaheads(&g, &["b"]));
}

#[test]
fn anbn_lalr() {
    let g = grammar(grammars::anbn);
    let automaton = Automaton::generate(&g);
    eprintln!("{}", automaton.display(&g));

    assert_eq!(automaton.len(), 6);
    let expected: Vec<(u32, String, u32)> = [
        (0, "a", 1),
        (0, "S", 2),
        (1, "a", 1),
        (1, "S", 3),
        (2, "$eoi", 4),
        (3, "b", 5),
    ]
    .into_iter()
    .map(|(from, symbol, to)| (from, symbol.to_owned(), to))
    .collect();
    assert_eq!(edges(&automaton, &g), expected);

    let merged = lookaheads(&g, &["$eoi", "b"]);
    assert_eq!(kernel_lookaheads(&automaton, s(1), 1), &merged);
    assert_eq!(kernel_lookaheads(&automaton, s(3), 2), &merged);
    assert_eq!(kernel_lookaheads(&automaton, s(5), 3), &merged);

    // closure items of a merged state are recomputed from its final kernel
    let items = automaton.state(s(1)).items();
    let index = items.find(ProductionID::from_raw(2), 0).unwrap();
    assert_eq!(items[index].lookaheads, lookaheads(&g, &["b"]));

    let start = automaton.state(StateID::START).items();
    let index = start.find(ProductionID::from_raw(2), 0).unwrap();
    assert_eq!(start[index].lookaheads, lookaheads(&g, &["$eoi"]));
}

#[test]
fn dragon_cc_state_counts() {
    let g = grammar(grammars::dragon_cc);
    let canonical = Config::new().use_canonical().generate(&g);
    let lalr = Config::new().use_lalr().generate(&g);
    assert_eq!(canonical.len(), 11);
    assert_eq!(lalr.len(), 8);

    // C -> d . is reduced on c, d and $eoi once the two states are merged
    let d = g.terminal_by_name("d").unwrap();
    let after_d = lalr.goto(StateID::START, SymbolID::T(d)).unwrap();
    let items = lalr.state(after_d).items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].lookaheads, lookaheads(&g, &["c", "d", "$eoi"]));
}

#[test]
fn expr_lalr_state_count() {
    let g = grammar(grammars::expr);
    assert_eq!(Automaton::generate(&g).len(), 13);
}

#[test]
fn lalr_merging_introduces_conflict() {
    let g = grammar(grammars::g2);
    let comma = g.terminal_by_name("COMMA").unwrap();

    let canonical = Config::new().use_canonical().generate(&g);
    for (id, state) in canonical.states() {
        assert!(conflicts(state, &g).is_empty(), "conflict in {:?}", id);
    }

    let lalr = Automaton::generate(&g);
    let conflicting: Vec<_> = lalr
        .states()
        .map(|(_, state)| conflicts(state, &g))
        .filter(|tokens| !tokens.is_empty())
        .collect();
    assert_eq!(conflicting, vec![vec![comma]]);
}

#[test]
fn nullable_lookaheads() {
    // 1: S -> A B c, 2: S -> B d, 3: A -> a, 4: A -> (empty), 5: B -> b B, 6: B -> A
    let g = grammar(grammars::nullables);
    let a_ = g.nonterminal_by_name("A").unwrap();

    for automaton in [Config::new().use_canonical().generate(&g), Automaton::generate(&g)] {
        let at = |state: StateID, production: u16, dot: u16| {
            let items = automaton.state(state).items();
            let index = items.find(ProductionID::from_raw(production), dot).unwrap();
            items[index].lookaheads.clone()
        };

        // A is followed by First(B c) in the first production and inherits d through B -> A
        let start = StateID::START;
        assert_eq!(at(start, 3, 0), lookaheads(&g, &["a", "b", "c", "d"]));
        assert_eq!(at(start, 4, 0), lookaheads(&g, &["a", "b", "c", "d"]));
        assert_eq!(at(start, 5, 0), lookaheads(&g, &["d"]));
        assert_eq!(at(start, 6, 0), lookaheads(&g, &["d"]));

        let after_a = automaton.goto(start, SymbolID::N(a_)).unwrap();
        assert_eq!(at(after_a, 1, 1), lookaheads(&g, &["$eoi"]));
        assert_eq!(at(after_a, 6, 1), lookaheads(&g, &["d"]));
        assert_eq!(at(after_a, 5, 0), lookaheads(&g, &["c"]));
        assert_eq!(at(after_a, 4, 0), lookaheads(&g, &["c"]));
    }
}
