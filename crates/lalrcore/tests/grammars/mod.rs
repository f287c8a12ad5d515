//! Grammar definitions for integration tests and benchmarks.

#![allow(dead_code)]

use lalrcore::grammar::{GrammarDef, GrammarDefError, SymbolID::*};

// S -> a S b | (empty)
pub fn anbn(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let a = g.terminal("a")?;
    let b = g.terminal("b")?;

    let s = g.nonterminal("S")?;

    g.rule(s, [T(a), N(s), T(b)])?;
    g.rule(s, [])?;
    Ok(())
}

// S -> C C ; C -> c C | d
pub fn dragon_cc(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let c = g.terminal("c")?;
    let d = g.terminal("d")?;

    let s = g.nonterminal("S")?;
    let c_ = g.nonterminal("C")?;

    g.rule(s, [N(c_), N(c_)])?;
    g.rule(c_, [T(c), N(c_)])?;
    g.rule(c_, [T(d)])?;
    Ok(())
}

pub fn g_simple1(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let equal = g.terminal("EQUAL")?;
    let plus = g.terminal("PLUS")?;
    let ident = g.terminal("ID")?;
    let num = g.terminal("NUM")?;

    let a = g.nonterminal("A")?;
    let e = g.nonterminal("E")?;
    let t = g.nonterminal("T")?;

    g.start_symbol(a)?;

    g.rule(a, [N(e), T(equal), N(e)])?;
    g.rule(a, [T(ident)])?;
    g.rule(e, [N(e), T(plus), N(t)])?;
    g.rule(e, [N(t)])?;
    g.rule(t, [T(num)])?;
    g.rule(t, [T(ident)])?;
    Ok(())
}

pub fn g_simple2(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let lparen = g.terminal("LPAREN")?;
    let rparen = g.terminal("RPAREN")?;
    let plus = g.terminal("PLUS")?;
    let minus = g.terminal("MINUS")?;
    let star = g.terminal("STAR")?;
    let slash = g.terminal("SLASH")?;
    let num = g.terminal("NUM")?;

    let expr = g.nonterminal("EXPR")?;
    let factor = g.nonterminal("FACTOR")?;
    let term = g.nonterminal("TERM")?;

    g.start_symbol(expr)?;

    g.rule(expr, [N(expr), T(plus), N(factor)])?;
    g.rule(expr, [N(expr), T(minus), N(factor)])?;
    g.rule(expr, [N(factor)])?;
    g.rule(factor, [N(factor), T(star), N(term)])?;
    g.rule(factor, [N(factor), T(slash), N(term)])?;
    g.rule(factor, [N(term)])?;
    g.rule(term, [T(num)])?;
    g.rule(term, [T(lparen), N(expr), T(rparen)])?;
    Ok(())
}

// E -> E + T | T ; T -> T * F | F ; F -> ( E ) | id
pub fn expr(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let plus = g.terminal("PLUS")?;
    let star = g.terminal("STAR")?;
    let lparen = g.terminal("LPAREN")?;
    let rparen = g.terminal("RPAREN")?;
    let id = g.terminal("ID")?;

    let e = g.nonterminal("E")?;
    let t = g.nonterminal("T")?;
    let f = g.nonterminal("F")?;

    g.rule(e, [N(e), T(plus), N(t)])?;
    g.rule(e, [N(t)])?;
    g.rule(t, [N(t), T(star), N(f)])?;
    g.rule(t, [N(f)])?;
    g.rule(f, [T(lparen), N(e), T(rparen)])?;
    g.rule(f, [T(id)])?;
    Ok(())
}

pub fn g1(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let plus = g.terminal("PLUS")?;
    let star = g.terminal("STAR")?;
    let a = g.terminal("A")?;

    let e = g.nonterminal("E")?;
    let t = g.nonterminal("T")?;

    g.start_symbol(e)?;

    g.rule(e, [N(e), T(plus), N(t)])?;
    g.rule(e, [N(t)])?;
    g.rule(t, [N(t), T(star), T(a)])?;
    g.rule(t, [T(a)])?;
    Ok(())
}

// A grammar which is LR(1) but not LALR(1).
pub fn g2(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let comma = g.terminal("COMMA")?;
    let colon = g.terminal("COLON")?;
    let ident = g.terminal("ID")?;

    let def = g.nonterminal("DEF")?;
    let param_spec = g.nonterminal("PARAM_SPEC")?;
    let return_spec = g.nonterminal("RETURN_SPEC")?;
    let type_ = g.nonterminal("TYPE")?;
    let name = g.nonterminal("NAME")?;
    let name_list = g.nonterminal("NAME_LIST")?;

    g.rule(def, [N(param_spec), N(return_spec), T(comma)])?;
    g.rule(param_spec, [N(type_)])?;
    g.rule(param_spec, [N(name_list), T(colon), N(type_)])?;
    g.rule(return_spec, [N(type_)])?;
    g.rule(return_spec, [N(name), T(colon), N(type_)])?;
    g.rule(type_, [T(ident)])?;
    g.rule(name, [T(ident)])?;
    g.rule(name_list, [N(name)])?;
    g.rule(name_list, [N(name), T(comma), N(name_list)])?;
    Ok(())
}

pub fn g4(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let plus = g.terminal("PLUS")?;
    let lparen = g.terminal("LPAREN")?;
    let rparen = g.terminal("RPAREN")?;
    let num = g.terminal("NUM")?;

    let e = g.nonterminal("E")?;
    let t = g.nonterminal("T")?;

    // E -> E + T | T
    // T -> ( E ) | n
    g.rule(e, [N(e), T(plus), N(t)])?;
    g.rule(e, [N(t)])?;
    g.rule(t, [T(lparen), N(e), T(rparen)])?;
    g.rule(t, [T(num)])?;
    Ok(())
}

// Nullable nonterminals in the middle of productions.
// S -> A B c | B d ; A -> a | ; B -> b B | A
pub fn nullables(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    let a = g.terminal("a")?;
    let b = g.terminal("b")?;
    let c = g.terminal("c")?;
    let d = g.terminal("d")?;

    let s = g.nonterminal("S")?;
    let a_ = g.nonterminal("A")?;
    let b_ = g.nonterminal("B")?;

    g.rule(s, [N(a_), N(b_), T(c)])?;
    g.rule(s, [N(b_), T(d)])?;
    g.rule(a_, [T(a)])?;
    g.rule(a_, [])?;
    g.rule(b_, [T(b), N(b_)])?;
    g.rule(b_, [N(a_)])?;
    Ok(())
}
