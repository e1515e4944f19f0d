//! pricetable CLI: prompt for a ticker and print its cleaned price table.
//!
//! Without `--symbol`, the allowed symbols are listed on stdout and a line
//! is read from stdin until it names one of them. The matching
//! `HistoricalData_<SYMBOL>.csv` is then loaded from the data directory,
//! its `$` price columns are converted to numbers, and the table is printed.
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` for load details.

use anyhow::{Context, Result};
use clap::Parser;
use pricetable_core::{report, resolve_and_report, resolve_named, LoaderConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricetable",
    about = "Print a cleaned historical price table for a ticker"
)]
struct Cli {
    /// Path to a TOML config file (data_dir, file_prefix, extension, symbols).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the HistoricalData_<SYMBOL>.csv files. Overrides the config file.
    #[arg(long, env = "PRICETABLE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Report this symbol without prompting. Must be one of the allowed symbols.
    #[arg(long)]
    symbol: Option<String>,

    /// Maximum number of table rows to print.
    #[arg(long)]
    max_rows: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Some(rows) = cli.max_rows {
        std::env::set_var("POLARS_FMT_MAX_ROWS", rows.to_string());
    }

    let config = load_config(cli.config.as_deref(), cli.data_dir)?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        symbols = %config.symbols,
        "config loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let symbol = match cli.symbol {
        Some(raw) => {
            let symbol = resolve_named(&config.symbols, &raw)?;
            report(&config, &symbol, &mut out)
                .with_context(|| format!("failed to report {symbol}"))?;
            symbol
        }
        None => resolve_and_report(&config, io::stdin().lock(), &mut out)
            .context("failed to report price table")?,
    };

    out.flush()?;
    tracing::info!(symbol = %symbol, "report complete");
    Ok(())
}

/// Log to stderr so stdout only carries the prompt and the table.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Defaults, then the config file, then `--data-dir` / `PRICETABLE_DATA_DIR`.
fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<LoaderConfig> {
    let config = match path {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LoaderConfig::default(),
    };

    Ok(match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricetable_core::ResolveError;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("pricetable.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn no_file_gives_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn config_file_sets_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "data_dir = \"/srv/quotes\"\n");

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/quotes"));
    }

    #[test]
    fn explicit_data_dir_beats_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "data_dir = \"/srv/quotes\"\nfile_prefix = \"daily-\"\nsymbols = [\"spy\"]\n",
        );

        let config = load_config(Some(&path), Some(PathBuf::from("/mnt/override"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/mnt/override"));
        assert_eq!(config.file_prefix, "daily-");
        assert_eq!(config.symbols.iter().collect::<Vec<_>>(), ["SPY"]);
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = load_config(Some(&path), None).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }

    #[test]
    fn symbol_flag_outside_config_set_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "symbols = [\"spy\"]\n");
        let config = load_config(Some(&path), None).unwrap();

        let err = resolve_named(&config.symbols, "aapl").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSymbol { ref input, .. } if input == "aapl"));
        assert_eq!(resolve_named(&config.symbols, "spy").unwrap().as_str(), "SPY");
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "pricetable",
            "--data-dir",
            "/srv/quotes",
            "--symbol",
            "msft",
            "--max-rows",
            "20",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/quotes")));
        assert_eq!(cli.symbol.as_deref(), Some("msft"));
        assert_eq!(cli.max_rows, Some(20));
        assert!(cli.config.is_none());
    }
}
