//! Errors raised while locating and reading price data.

use std::path::PathBuf;

use thiserror::Error;

/// Data loading errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no data file for symbol `{symbol}` in {}", dir.display())]
    SymbolNotFound { symbol: String, dir: PathBuf },
    #[error("{}: missing `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: no usable rows", path.display())]
    Empty { path: PathBuf },
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] ::csv::Error),
}

impl DataError {
    /// Whether this error means the symbol simply has no data file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::SymbolNotFound { .. })
    }
}
