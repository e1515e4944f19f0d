//! Symbol resolution and the load → clean → print pipeline.
//!
//! The prompt loop keeps asking until the user types an allowed symbol
//! (case-insensitively). Rejected input prints a notice and loops again;
//! the only other way out is the input stream ending.

use crate::config::LoaderConfig;
use crate::data::clean::{CleanError, Cleaner};
use crate::data::ingest::{DataError, HistoricalLoader};
use crate::data::universe::{Symbol, SymbolSet};
use polars::prelude::DataFrame;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Notice printed after a rejected entry.
pub const INVALID_SYMBOL_NOTICE: &str = "You have entered an invalid symbol!";

/// Interactive symbol prompt over any line source and sink.
pub struct SymbolPrompt<'a, R, W> {
    symbols: &'a SymbolSet,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> SymbolPrompt<'a, R, W> {
    pub fn new(symbols: &'a SymbolSet, input: R, output: W) -> Self {
        Self {
            symbols,
            input,
            output,
        }
    }

    /// Prompt until an allowed symbol is entered.
    ///
    /// Only the line terminator is removed before the upper-cased
    /// comparison. Returns [`ResolveError::InputClosed`] if the input ends
    /// first.
    pub fn read_symbol(&mut self) -> Result<Symbol, ResolveError> {
        loop {
            writeln!(
                self.output,
                "Please enter one of the following symbols! {}",
                self.symbols
            )?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                return Err(ResolveError::InputClosed);
            }
            // Undecodable bytes become U+FFFD so the line is rejected, not fatal.
            let line = String::from_utf8_lossy(&raw);
            let entered = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

            match self.symbols.resolve(entered) {
                Some(symbol) => {
                    debug!(symbol = %symbol, "symbol accepted");
                    return Ok(symbol);
                }
                None => {
                    debug!(input = entered, "rejected symbol");
                    writeln!(self.output, "{INVALID_SYMBOL_NOTICE}")?;
                }
            }
        }
    }
}

/// Validate a symbol given up front (no one to re-prompt).
pub fn resolve_named(symbols: &SymbolSet, raw: &str) -> Result<Symbol, ResolveError> {
    symbols
        .resolve(raw)
        .ok_or_else(|| ResolveError::InvalidSymbol {
            input: raw.to_string(),
            allowed: symbols.to_string(),
        })
}

/// Load and clean the table for an already validated symbol.
pub fn load_table(config: &LoaderConfig, symbol: &Symbol) -> Result<DataFrame, ResolveError> {
    let path = config.path_for(symbol);
    info!(symbol = %symbol, path = %path.display(), "loading historical data");
    let raw = HistoricalLoader::load(&path)?;
    Ok(Cleaner::clean(raw, symbol)?)
}

/// Load, clean and print the table for `symbol`.
pub fn report<W: Write>(
    config: &LoaderConfig,
    symbol: &Symbol,
    output: &mut W,
) -> Result<DataFrame, ResolveError> {
    let df = load_table(config, symbol)?;
    writeln!(output, "{df}")?;
    output.flush()?;
    Ok(df)
}

/// Prompt for a symbol on `input`, then load, clean and print its table to
/// `output`. Returns the symbol that was reported.
pub fn resolve_and_report<R: BufRead, W: Write>(
    config: &LoaderConfig,
    input: R,
    output: &mut W,
) -> Result<Symbol, ResolveError> {
    let symbol = SymbolPrompt::new(&config.symbols, input, &mut *output).read_symbol()?;
    report(config, &symbol, output)?;
    Ok(symbol)
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("input ended before a valid symbol was entered")]
    InputClosed,

    #[error("'{input}' is not one of the allowed symbols {allowed}")]
    InvalidSymbol { input: String, allowed: String },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
