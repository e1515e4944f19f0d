use polars::prelude::*;

/// Column names as exported by the quote provider.
pub mod column {
    pub const DATE: &str = "Date";
    pub const CLOSE_LAST: &str = "Close/Last";
    pub const VOLUME: &str = "Volume";
    pub const OPEN: &str = "Open";
    pub const HIGH: &str = "High";
    pub const LOW: &str = "Low";

    /// Name `CLOSE_LAST` is renamed to during cleaning.
    pub const CLOSE: &str = "Close";
    /// Appended during cleaning.
    pub const SYMBOL: &str = "Symbol";
}

/// Currency-formatted columns, in the order they are cleaned.
pub const CURRENCY_COLUMNS: [&str; 4] =
    [column::OPEN, column::HIGH, column::LOW, column::CLOSE_LAST];

/// Expected layout of historical price tables.
pub struct PriceSchema;

impl PriceSchema {
    /// Columns a raw file must carry. `Volume` is passed through when
    /// present but not required.
    pub fn required_columns() -> [&'static str; 5] {
        [
            column::DATE,
            column::OPEN,
            column::HIGH,
            column::LOW,
            column::CLOSE_LAST,
        ]
    }

    /// Validate a freshly loaded table against the raw layout.
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        for name in Self::required_columns() {
            if df.get_column_index(name).is_none() {
                return Err(SchemaError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Validate a cleaned table: prices are `Float64`, `Symbol` is text,
    /// and the raw `Close/Last` name is gone.
    pub fn validate_cleaned(df: &DataFrame) -> Result<(), SchemaError> {
        if df.get_column_index(column::CLOSE_LAST).is_some() {
            return Err(SchemaError::UnexpectedColumn(column::CLOSE_LAST.to_string()));
        }

        let expected = [
            (column::OPEN, DataType::Float64),
            (column::HIGH, DataType::Float64),
            (column::LOW, DataType::Float64),
            (column::CLOSE, DataType::Float64),
            (column::SYMBOL, DataType::String),
        ];
        for (name, dtype) in expected {
            let actual = df
                .column(name)
                .map_err(|_| SchemaError::MissingColumn(name.to_string()))?
                .dtype();
            if *actual != dtype {
                return Err(SchemaError::TypeMismatch {
                    column: name.to_string(),
                    expected: dtype,
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unexpected column: {0}")]
    UnexpectedColumn(String),

    #[error("Type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
