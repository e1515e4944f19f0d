//! Column cleaning for raw historical tables.
//!
//! Turns the text table produced by [`crate::data::ingest`] into its
//! reporting shape: a constant `Symbol` column is appended, the
//! currency-formatted price columns become `Float64`, and `Close/Last` is
//! renamed to `Close`.

use crate::data::schema::{column, PriceSchema, SchemaError, CURRENCY_COLUMNS};
use crate::data::universe::Symbol;
use polars::prelude::*;
use std::borrow::Cow;
use std::num::ParseFloatError;
use tracing::debug;

/// Currency marker removed from price cells.
pub const CURRENCY_MARKER: char = '$';

/// Remove every currency marker from `cell`.
///
/// Borrows when there is nothing to strip, so applying it twice is the
/// same as applying it once.
pub fn strip_currency(cell: &str) -> Cow<'_, str> {
    if cell.contains(CURRENCY_MARKER) {
        Cow::Owned(cell.replace(CURRENCY_MARKER, ""))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Strip the currency marker and parse what is left as a decimal number.
/// Surrounding whitespace is ignored.
pub fn parse_currency(cell: &str) -> Result<f64, ParseFloatError> {
    strip_currency(cell).trim().parse::<f64>()
}

/// Applies the cleaning steps to a raw table.
pub struct Cleaner;

impl Cleaner {
    /// Clean `df` for `symbol`. Fails on the first price cell that is not a
    /// number once the marker is gone.
    pub fn clean(mut df: DataFrame, symbol: &Symbol) -> Result<DataFrame, CleanError> {
        Self::append_symbol(&mut df, symbol)?;

        for name in CURRENCY_COLUMNS {
            Self::convert_currency_column(&mut df, name)?;
        }
        Self::type_volume(&mut df)?;

        df.rename(column::CLOSE_LAST, column::CLOSE.into())?;

        PriceSchema::validate_cleaned(&df)?;
        debug!(symbol = %symbol, rows = df.height(), "cleaned historical table");
        Ok(df)
    }

    fn append_symbol(df: &mut DataFrame, symbol: &Symbol) -> Result<(), CleanError> {
        let height = df.height();
        let values = vec![symbol.as_str(); height];
        df.with_column(Series::new(column::SYMBOL.into(), values))?;
        Ok(())
    }

    /// Replace a text column of `$`-prefixed prices with its `Float64` form.
    /// Columns that are already `Float64` are left alone.
    fn convert_currency_column(df: &mut DataFrame, name: &str) -> Result<(), CleanError> {
        let raw = df.column(name)?;
        if raw.dtype() == &DataType::Float64 {
            return Ok(());
        }

        let text = raw.str()?;
        let mut values = Vec::with_capacity(text.len());
        for (row, cell) in text.iter().enumerate() {
            let cell = cell.unwrap_or("");
            let value = parse_currency(cell).map_err(|_| CleanError::NumericConversion {
                column: name.to_string(),
                row,
                value: cell.to_string(),
            })?;
            values.push(value);
        }

        df.with_column(Series::new(name.into(), values))?;
        Ok(())
    }

    /// Type `Volume` as `Int64` when every cell is an integer literal;
    /// otherwise it stays text.
    fn type_volume(df: &mut DataFrame) -> Result<(), CleanError> {
        let Ok(raw) = df.column(column::VOLUME) else {
            return Ok(());
        };
        if raw.dtype() != &DataType::String {
            return Ok(());
        }

        let parsed: Option<Vec<i64>> = raw
            .str()?
            .iter()
            .map(|cell| cell.and_then(|c| c.trim().parse::<i64>().ok()))
            .collect();

        match parsed {
            Some(values) => {
                df.with_column(Series::new(column::VOLUME.into(), values))?;
            }
            None => debug!("Volume column has non-integer cells, leaving it as text"),
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("cannot convert {value:?} in column '{column}' at row {row} to a number")]
    NumericConversion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("cleaned table is malformed: {0}")]
    Schema(#[from] SchemaError),

    #[error("table error: {0}")]
    Table(#[from] PolarsError),
}
