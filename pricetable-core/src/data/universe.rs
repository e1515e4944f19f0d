//! Allowed symbol set: the tickers a user may ask for.
//!
//! The set is ordered (it is shown to the user in this order) and never
//! changes once built. The built-in default holds ten US large caps; the
//! `symbols` key of a config file may replace it with another list.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tickers accepted when no config file overrides them.
pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "AAPL", "AMD", "AMZN", "CSCO", "META", "MSFT", "NFLX", "QCOM", "SBUX", "TSLA",
];

/// A ticker that has been validated against a [`SymbolSet`].
///
/// Always upper-case. Only [`SymbolSet::resolve`] hands these out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered allow-list of ticker symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolSet {
    symbols: Vec<String>,
}

impl SymbolSet {
    /// The ten built-in tickers.
    pub fn default_set() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a set from arbitrary input. Entries are trimmed and
    /// upper-cased; blanks and repeats are dropped, first occurrence wins.
    pub fn new<I, S>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in symbols {
            let sym = raw.as_ref().trim().to_uppercase();
            if sym.is_empty() || out.contains(&sym) {
                continue;
            }
            out.push(sym);
        }
        if out.is_empty() {
            return Err(ConfigError::EmptySymbolSet);
        }
        Ok(Self { symbols: out })
    }

    /// Upper-case `input` and return it as a [`Symbol`] if it is a member.
    ///
    /// Only the comparison is case-insensitive; surrounding whitespace is
    /// significant, so `" AAPL"` is rejected.
    pub fn resolve(&self, input: &str) -> Option<Symbol> {
        let candidate = input.to_uppercase();
        self.symbols
            .iter()
            .find(|s| **s == candidate)
            .map(|s| Symbol(s.clone()))
    }

    pub fn contains(&self, input: &str) -> bool {
        self.resolve(input).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::default_set()
    }
}

/// Renders as `[AAPL, AMD, ...]`, the form shown in the prompt.
impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.symbols.join(", "))
    }
}

impl TryFrom<Vec<String>> for SymbolSet {
    type Error = ConfigError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SymbolSet> for Vec<String> {
    fn from(set: SymbolSet) -> Self {
        set.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_ten_symbols_in_order() {
        let set = SymbolSet::default_set();
        assert_eq!(set.len(), 10);
        let all: Vec<&str> = set.iter().collect();
        assert_eq!(all, DEFAULT_SYMBOLS.to_vec());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let set = SymbolSet::default_set();
        assert_eq!(set.resolve("aapl").unwrap().as_str(), "AAPL");
        assert_eq!(set.resolve("Tsla").unwrap().as_str(), "TSLA");
        assert_eq!(set.resolve("MSFT").unwrap().as_str(), "MSFT");
    }

    #[test]
    fn resolve_rejects_unknown_and_padded_input() {
        let set = SymbolSet::default_set();
        assert!(set.resolve("GOOG").is_none());
        assert!(set.resolve("").is_none());
        assert!(set.resolve(" AAPL").is_none());
        assert!(set.resolve("AAPL ").is_none());
    }

    #[test]
    fn new_normalizes_and_dedupes() {
        let set = SymbolSet::new(["spy", " QQQ ", "SPY", ""]).unwrap();
        let all: Vec<&str> = set.iter().collect();
        assert_eq!(all, vec!["SPY", "QQQ"]);
    }

    #[test]
    fn new_rejects_empty_list() {
        let err = SymbolSet::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySymbolSet));
    }

    #[test]
    fn display_lists_symbols() {
        let set = SymbolSet::new(["AAPL", "AMD"]).unwrap();
        assert_eq!(set.to_string(), "[AAPL, AMD]");
    }
}
