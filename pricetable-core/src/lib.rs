//! pricetable core: symbol allow-list, historical price loading and cleaning.
//!
//! This crate contains everything except the terminal wiring:
//! - The allowed symbol set and validated `Symbol` type
//! - Loader configuration (data directory, file naming, symbol list)
//! - CSV ingestion with an explicit required-column check
//! - Currency column cleaning (`$` stripping, `Float64` conversion, `Close/Last` rename)
//! - The prompt loop and the `resolve_and_report` pipeline

pub mod config;
pub mod data;
pub mod resolver;

pub use config::{ConfigError, LoaderConfig};
pub use data::{Symbol, SymbolSet};
pub use resolver::{
    load_table, report, resolve_and_report, resolve_named, ResolveError, SymbolPrompt,
};
