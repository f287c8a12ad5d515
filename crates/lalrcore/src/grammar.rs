//! Grammar types.

use crate::{
    lookahead::MAX_TERMINALS,
    types::Map,
    util::{display_fn, write_symbols},
};
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TerminalID(u16);

impl TerminalID {
    /// Reserved symbol used as a terminal symbol that means the end of input.
    pub const EOI: Self = Self(0);

    /// Reserved lookahead marker meaning "inherited from the reaching state".
    ///
    /// It only appears while lookaheads are being propagated between states
    /// and never remains in the lookahead set of a finished item.
    pub const PROPAGATE: Self = Self(1);

    const OFFSET: u16 = 2;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for TerminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EOI => write!(f, "T#End"),
            Self::PROPAGATE => write!(f, "T#Prop"),
            _ => write!(f, "T#{:03}", self.0),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NonterminalID(u16);

impl NonterminalID {
    /// The left-hand side of the augmented start production.
    pub const START: Self = Self(0);

    const OFFSET: u16 = 1;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for NonterminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::START => write!(f, "N#Start"),
            _ => write!(f, "N#{:03}", self.0),
        }
    }
}

/// A grammar symbol. Terminals are ordered before nonterminals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolID {
    T(TerminalID),
    N(NonterminalID),
}

impl fmt::Debug for SymbolID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(t) => write!(f, "{:?}", t),
            Self::N(n) => write!(f, "{:?}", n),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ProductionID(u16);

impl ProductionID {
    /// The augmented start production `$start -> S $eoi`.
    pub const ACCEPT: Self = Self(0);

    const OFFSET: u16 = 1;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ProductionID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ACCEPT => write!(f, "P#Accept"),
            _ => write!(f, "P#{:03}", self.0),
        }
    }
}

/// The type that represents a production rule in grammar.
#[derive(Debug)]
#[non_exhaustive]
pub struct Production {
    pub left: NonterminalID,
    pub right: Vec<SymbolID>,
}

impl Production {
    // `"LHS := R1 R2 R3"`
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            write!(f, "{} :=", g.nonterminals[&self.left])?;
            if !self.right.is_empty() {
                f.write_str(" ")?;
            }
            write_symbols(f, g, &self.right, None)
        })
    }
}

/// The grammar definition used to derive the automaton.
#[derive(Debug)]
#[non_exhaustive]
pub struct Grammar {
    pub terminals: Map<TerminalID, String>,
    pub nonterminals: Map<NonterminalID, String>,
    pub productions: Map<ProductionID, Production>,
    pub start_symbol: NonterminalID,
    by_left: Map<NonterminalID, Vec<ProductionID>>,
}

impl Grammar {
    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarDefError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarDefError>,
    {
        let mut def = GrammarDef::default();
        f(&mut def)?;
        def.end()
    }

    pub fn production(&self, id: ProductionID) -> &Production {
        &self.productions[&id]
    }

    /// Return the productions whose left-hand side is `n`, in declaration order.
    pub fn productions_of(&self, n: NonterminalID) -> &[ProductionID] {
        self.by_left.get(&n).map_or(&[][..], |ids| &ids[..])
    }

    pub fn symbol_name(&self, symbol: SymbolID) -> &str {
        match symbol {
            SymbolID::T(t) => &self.terminals[&t],
            SymbolID::N(n) => &self.nonterminals[&n],
        }
    }

    pub fn terminal_by_name(&self, name: &str) -> Option<TerminalID> {
        self.terminals
            .iter()
            .find_map(|(id, n)| (n == name).then_some(*id))
    }

    pub fn nonterminal_by_name(&self, name: &str) -> Option<NonterminalID> {
        self.nonterminals
            .iter()
            .find_map(|(id, n)| (n == name).then_some(*id))
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## terminals:")?;
        for name in self.terminals.values() {
            writeln!(f, "{}", name)?;
        }

        writeln!(f, "\n## nonterminals:")?;
        for (id, name) in &self.nonterminals {
            write!(f, "{}", name)?;
            if *id == self.start_symbol {
                write!(f, " (start)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n## productions:")?;
        for (id, production) in &self.productions {
            writeln!(f, "{:?}: {}", id, production.display(self))?;
        }

        Ok(())
    }
}

/// The contextural values for building a `Grammar`.
#[derive(Debug)]
pub struct GrammarDef {
    terminals: Map<TerminalID, String>,
    nonterminals: Map<NonterminalID, String>,
    productions: Map<ProductionID, Production>,
    start: Option<NonterminalID>,
    next_terminal_id: u16,
    next_nonterminal_id: u16,
    next_production_id: u16,
}

impl Default for GrammarDef {
    fn default() -> Self {
        let mut def = GrammarDef {
            terminals: Map::default(),
            nonterminals: Map::default(),
            productions: Map::default(),
            start: None,
            next_terminal_id: TerminalID::OFFSET,
            next_nonterminal_id: NonterminalID::OFFSET,
            next_production_id: ProductionID::OFFSET,
        };
        def.terminals.insert(TerminalID::EOI, "$eoi".into());
        def.terminals.insert(TerminalID::PROPAGATE, "#".into());
        def.nonterminals
            .insert(NonterminalID::START, "$start".into());
        def
    }
}

impl GrammarDef {
    /// Declare a terminal symbol used in this grammar.
    pub fn terminal(&mut self, name: &str) -> Result<TerminalID, GrammarDefError> {
        if self.terminals.values().any(|n| n == name) {
            return Err(GrammarDefError::DuplicateTerminal { name: name.into() });
        }
        if usize::from(self.next_terminal_id) >= MAX_TERMINALS {
            return Err(GrammarDefError::TooManyTerminals);
        }

        let id = TerminalID(self.next_terminal_id);
        self.next_terminal_id += 1;
        self.terminals.insert(id, name.into());
        Ok(id)
    }

    /// Declare a nonterminal symbol used in this grammar.
    pub fn nonterminal(&mut self, name: &str) -> Result<NonterminalID, GrammarDefError> {
        if self.nonterminals.values().any(|n| n == name) {
            return Err(GrammarDefError::DuplicateNonterminal { name: name.into() });
        }

        let next = self
            .next_nonterminal_id
            .checked_add(1)
            .ok_or(GrammarDefError::TooManyNonterminals)?;
        let id = NonterminalID(self.next_nonterminal_id);
        self.next_nonterminal_id = next;
        self.nonterminals.insert(id, name.into());
        Ok(id)
    }

    /// Specify a production rule into this grammer.
    pub fn rule<I>(&mut self, left: NonterminalID, right: I) -> Result<ProductionID, GrammarDefError>
    where
        I: IntoIterator<Item = SymbolID>,
    {
        let right: Vec<SymbolID> = right.into_iter().collect();

        let declared = |symbol: &SymbolID| match symbol {
            SymbolID::T(t) => *t != TerminalID::PROPAGATE && self.terminals.contains_key(t),
            SymbolID::N(n) => *n != NonterminalID::START && self.nonterminals.contains_key(n),
        };
        if left == NonterminalID::START || !self.nonterminals.contains_key(&left) {
            return Err(GrammarDefError::UnknownSymbol { symbol: SymbolID::N(left) });
        }
        if let Some(symbol) = right.iter().find(|s| !declared(*s)) {
            return Err(GrammarDefError::UnknownSymbol { symbol: *symbol });
        }

        if self
            .productions
            .values()
            .any(|p| p.left == left && p.right == right)
        {
            return Err(GrammarDefError::DuplicateRule {
                left: self.nonterminals[&left].clone(),
            });
        }

        let next = self
            .next_production_id
            .checked_add(1)
            .ok_or(GrammarDefError::TooManyProductions)?;
        let id = ProductionID(self.next_production_id);
        self.next_production_id = next;
        self.productions.insert(id, Production { left, right });
        Ok(id)
    }

    /// Specify the start symbol for this grammar.
    pub fn start_symbol(&mut self, symbol: NonterminalID) -> Result<(), GrammarDefError> {
        if symbol == NonterminalID::START || !self.nonterminals.contains_key(&symbol) {
            return Err(GrammarDefError::UnknownSymbol { symbol: SymbolID::N(symbol) });
        }
        self.start.replace(symbol);
        Ok(())
    }

    fn end(mut self) -> Result<Grammar, GrammarDefError> {
        // Fall back to the first declared nonterminal.
        let start = match self.start.take() {
            Some(start) => start,
            None => self
                .nonterminals
                .keys()
                .find(|id| **id != NonterminalID::START)
                .copied()
                .ok_or(GrammarDefError::EmptyNonterminals)?,
        };

        self.productions.insert(
            ProductionID::ACCEPT,
            Production {
                left: NonterminalID::START,
                right: vec![SymbolID::N(start), SymbolID::T(TerminalID::EOI)],
            },
        );
        self.productions.sort_keys();

        let mut by_left: Map<NonterminalID, Vec<ProductionID>> = Map::default();
        for (id, production) in &self.productions {
            by_left.entry(production.left).or_default().push(*id);
        }

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            productions: self.productions,
            start_symbol: start,
            by_left,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarDefError {
    #[error("the terminal `{name}' has already been declared")]
    DuplicateTerminal { name: String },

    #[error("the nonterminal `{name}' has already been declared")]
    DuplicateNonterminal { name: String },

    #[error("duplicate production rule for `{left}'")]
    DuplicateRule { left: String },

    #[error("too many terminal symbols (at most {} including reserved ones)", MAX_TERMINALS)]
    TooManyTerminals,

    #[error("too many nonterminal symbols")]
    TooManyNonterminals,

    #[error("too many production rules")]
    TooManyProductions,

    #[error("undeclared or reserved symbol {symbol:?}")]
    UnknownSymbol { symbol: SymbolID },

    #[error("empty nonterminal symbols")]
    EmptyNonterminals,
}
