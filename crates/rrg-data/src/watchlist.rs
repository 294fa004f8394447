//! Watchlist files: one `SYMBOL[,Short Name]` entry per line.

use std::fs;
use std::path::Path;

use crate::error::DataError;

/// A symbol to plot, with the name shown next to its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub label: String,
}

impl WatchlistEntry {
    /// Parse `SYMBOL` or `SYMBOL,Short Name`. Returns `None` for blank input.
    pub fn parse(s: &str) -> Option<Self> {
        let (symbol, label) = match s.split_once(',') {
            Some((symbol, label)) => (symbol.trim(), label.trim()),
            None => (s.trim(), ""),
        };

        if symbol.is_empty() {
            return None;
        }

        let label = if label.is_empty() { symbol } else { label };
        Some(Self {
            symbol: symbol.to_string(),
            label: label.to_uppercase(),
        })
    }
}

/// Parse watchlist text, skipping blank lines and `#` comments.
pub fn parse_watchlist(text: &str) -> Vec<WatchlistEntry> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .filter_map(WatchlistEntry::parse)
        .collect()
}

/// Read and parse a watchlist file.
pub fn load_watchlist<P: AsRef<Path>>(path: P) -> Result<Vec<WatchlistEntry>, DataError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_watchlist(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_with_short_name() {
        let entry = WatchlistEntry::parse("hdfcbank, Hdfc Bk").unwrap();
        assert_eq!(entry.symbol, "hdfcbank");
        assert_eq!(entry.label, "HDFC BK");
    }

    #[test]
    fn test_parse_entry_without_short_name() {
        let entry = WatchlistEntry::parse(" tcs ").unwrap();
        assert_eq!(entry.symbol, "tcs");
        assert_eq!(entry.label, "TCS");
        assert!(WatchlistEntry::parse("   ").is_none());
    }

    #[test]
    fn test_parse_watchlist_skips_comments() {
        let text = "# banks\nhdfcbank\n\nicicibank,ICICI # private\n  # trailing\n";
        let entries = parse_watchlist(text);

        let symbols: Vec<_> = entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["hdfcbank", "icicibank"]);
        assert_eq!(entries[1].label, "ICICI");
    }

    #[test]
    fn test_load_watchlist_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "a\nb,Bee\n").unwrap();

        let entries = load_watchlist(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(load_watchlist(dir.path().join("missing.txt")).is_err());
    }
}
