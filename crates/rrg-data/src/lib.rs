//! Data loading utilities for rrg.

pub mod csv;
pub mod error;
pub mod source;
pub mod validation;
pub mod watchlist;

pub use self::csv::{load_closes_from_csv, parse_date, CsvLoader};
pub use error::DataError;
pub use source::{DataSource, InMemorySource, SymbolDirectory};
pub use watchlist::{load_watchlist, parse_watchlist, WatchlistEntry};
