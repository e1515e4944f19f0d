//! Loader configuration: where the per-symbol CSV files live and which
//! symbols may be requested.
//!
//! Every field has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! data_dir = "/srv/quotes"
//! file_prefix = "HistoricalData_"
//! extension = "csv"
//! symbols = ["AAPL", "MSFT"]
//! ```

use crate::data::universe::{Symbol, SymbolSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory used when neither the config file nor the caller names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name prefix of exported historical data files.
pub const DEFAULT_FILE_PREFIX: &str = "HistoricalData_";

/// Errors from reading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("symbol list is empty")]
    EmptySymbolSet,
}

/// Settings for resolving a symbol to its data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding the `HistoricalData_<SYMBOL>.csv` files.
    pub data_dir: PathBuf,

    /// Prefix placed before the symbol in the file name.
    pub file_prefix: String,

    /// File extension, without the dot.
    pub extension: String,

    /// Symbols the user may pick from.
    pub symbols: SymbolSet,
}

impl LoaderConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replace the data directory, keeping everything else.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Path of the data file for `symbol`:
    /// `{data_dir}/{file_prefix}{SYMBOL}.{extension}`.
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!(
            "{}{}.{}",
            self.file_prefix,
            symbol.as_str(),
            self.extension
        ))
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            extension: "csv".to_string(),
            symbols: SymbolSet::default_set(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_matches_export_naming() {
        let config = LoaderConfig::default().with_data_dir("/tmp/quotes");
        let aapl = config.symbols.resolve("aapl").unwrap();
        assert_eq!(
            config.path_for(&aapl),
            PathBuf::from("/tmp/quotes/HistoricalData_AAPL.csv")
        );
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = LoaderConfig::from_toml("").unwrap();
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = LoaderConfig::from_toml(
            r#"
            data_dir = "/srv/quotes"
            symbols = ["spy"]
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/quotes"));
        assert_eq!(config.file_prefix, DEFAULT_FILE_PREFIX);
        assert_eq!(config.extension, "csv");
        assert_eq!(config.symbols.len(), 1);
        assert!(config.symbols.contains("SPY"));
    }

    #[test]
    fn custom_prefix_and_extension_shape_the_path() {
        let config = LoaderConfig::from_toml(
            r#"
            data_dir = "quotes"
            file_prefix = "daily-"
            extension = "txt"
            "#,
        )
        .unwrap();
        let msft = config.symbols.resolve("msft").unwrap();
        assert_eq!(config.path_for(&msft), PathBuf::from("quotes/daily-MSFT.txt"));
    }

    #[test]
    fn toml_roundtrip() {
        let config = LoaderConfig::default().with_data_dir("/srv/quotes");
        let text = config.to_toml().unwrap();
        let parsed = LoaderConfig::from_toml(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = LoaderConfig::from_toml("symbols = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let err = LoaderConfig::from_toml("symbols = []").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("symbol list is empty"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LoaderConfig::from_file(Path::new("/nonexistent/pricetable.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pricetable.toml"));
    }
}
