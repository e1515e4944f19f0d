//! Historical data ingestion and cleaning

pub mod clean;
pub mod ingest;
pub mod schema;
pub mod universe;

pub use clean::{parse_currency, strip_currency, CleanError, Cleaner};
pub use ingest::{DataError, HistoricalLoader};
pub use schema::{PriceSchema, SchemaError};
pub use universe::{Symbol, SymbolSet, DEFAULT_SYMBOLS};
