//! Data source trait definition and implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rrg_core::PriceSeries;

use crate::csv::CsvLoader;
use crate::error::DataError;
use crate::validation::validate_series;

/// Trait for types that can load price data by symbol name.
///
/// A missing symbol is reported as [`DataError::SymbolNotFound`] so callers
/// can skip that symbol and carry on with the rest.
pub trait DataSource: Sync {
    fn load(&self, symbol: &str) -> Result<PriceSeries, DataError>;
}

/// Loads `<symbol>.csv` files from a directory.
#[derive(Debug, Clone)]
pub struct SymbolDirectory {
    dir: PathBuf,
}

impl SymbolDirectory {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `symbol`, trying the exact name then lowercase.
    pub fn locate(&self, symbol: &str) -> Option<PathBuf> {
        let exact = self.dir.join(format!("{symbol}.csv"));
        if exact.is_file() {
            return Some(exact);
        }

        let lower = self.dir.join(format!("{}.csv", symbol.to_lowercase()));
        lower.is_file().then_some(lower)
    }
}

impl DataSource for SymbolDirectory {
    fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.locate(symbol).ok_or_else(|| DataError::SymbolNotFound {
            symbol: symbol.to_string(),
            dir: self.dir.clone(),
        })?;

        log::debug!("Loading {} from {}", symbol, path.display());
        CsvLoader::new(path, symbol).load()
    }
}

/// Data source backed by series held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: HashMap<String, PriceSeries>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, keyed by its symbol.
    pub fn insert(&mut self, series: PriceSeries) {
        debug_assert!(validate_series(&series));
        self.series.insert(series.symbol().to_string(), series);
    }

    pub fn with(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }
}

impl DataSource for InMemorySource {
    fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
                dir: PathBuf::from("<memory>"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_lookup_falls_back_to_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("infy.csv"),
            "Date,Close\n2024-01-01,10\n2024-01-02,11\n",
        )
        .unwrap();

        let source = SymbolDirectory::new(dir.path());
        let series = source.load("INFY").unwrap();

        assert_eq!(series.symbol(), "INFY");
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_missing_symbol_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = SymbolDirectory::new(dir.path());

        let err = source.load("NOPE").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new().with(PriceSeries::from_unsorted("A", Vec::new()));
        assert!(source.load("A").is_ok());
        assert!(source.load("B").unwrap_err().is_not_found());
    }
}
