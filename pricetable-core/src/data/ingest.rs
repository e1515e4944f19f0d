//! Historical data file ingestion.
//!
//! The file is read into memory in one go and parsed as headed CSV. Every
//! cell is kept as text; typing happens in [`crate::data::clean`]. The raw
//! table is checked against [`PriceSchema`] before it is handed out.

use crate::data::schema::{PriceSchema, SchemaError};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loader for exported historical price files.
pub struct HistoricalLoader;

impl HistoricalLoader {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<DataFrame, DataError> {
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => DataError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => DataError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read data file");
        Self::parse(path, &bytes)
    }

    /// Parse CSV bytes. `path` is only used in error messages.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<DataFrame, DataError> {
        let parse_err = |source: csv::Error| DataError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(parse_err)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(DataError::DuplicateColumn {
                    path: path.to_path_buf(),
                    column: name.clone(),
                });
            }
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(parse_err)?;
            for (column, value) in cells.iter_mut().zip(record.iter()) {
                column.push(value.to_string());
            }
        }

        let columns: Vec<Column> = headers
            .iter()
            .zip(cells)
            .map(|(name, values)| Column::from(Series::new(name.as_str().into(), values)))
            .collect();
        let df = DataFrame::new(columns)?;

        PriceSchema::validate(&df).map_err(|source| DataError::Schema {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), rows = df.height(), "parsed historical table");
        Ok(df)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Parse { path: PathBuf, source: csv::Error },

    #[error("duplicate column '{column}' in {}", .path.display())]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("unexpected layout in {}: {source}", .path.display())]
    Schema { path: PathBuf, source: SchemaError },

    #[error("table error: {0}")]
    Table(#[from] PolarsError),
}
