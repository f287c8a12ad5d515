use crate::grammar::{Grammar, SymbolID};
use std::fmt;

pub fn display_fn(f: impl Fn(&mut fmt::Formatter<'_>) -> fmt::Result) -> impl fmt::Display {
    DisplayFn(f)
}

struct DisplayFn<F>(F);
impl<F> fmt::Display for DisplayFn<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.0)(formatter)
    }
}

/// Write a sequence of grammar symbols separated by spaces, with an optional
/// marker inserted before the symbol at `dot`.
pub(crate) fn write_symbols(
    f: &mut fmt::Formatter<'_>,
    g: &Grammar,
    symbols: &[SymbolID],
    dot: Option<usize>,
) -> fmt::Result {
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        if dot == Some(i) {
            f.write_str(". ")?;
        }
        f.write_str(g.symbol_name(*symbol))?;
    }
    if dot == Some(symbols.len()) {
        if !symbols.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str(".")?;
    }
    Ok(())
}
