//! CSV data loading implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rrg_core::{PricePoint, PriceSeries};

use crate::error::DataError;
use crate::validation::validate_close;

/// Loads close prices for one symbol from a CSV file.
pub struct CsvLoader {
    path: PathBuf,
    symbol: String,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P, symbol: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            symbol: symbol.into(),
        }
    }

    pub fn load(&self) -> Result<PriceSeries, DataError> {
        load_closes_from_csv(&self.path, &self.symbol)
    }
}

/// Smallest cell read as a Unix timestamp in seconds (March 1973).
const MIN_UNIX_SECONDS: i64 = 100_000_000;

/// Parse a date cell.
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-MM-DD HH:MM:SS` (or any text
/// starting with an ISO date), and integer Unix timestamps in seconds or
/// milliseconds.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(s, "%Y%m%d").ok();
    }

    // Unix timestamp, e.g. "1704067200" or "1704067200000"
    if s.bytes().all(|b| b.is_ascii_digit()) {
        let ts = s.parse::<i64>().ok()?;
        if ts < MIN_UNIX_SECONDS {
            return None;
        }
        // 13 digits are milliseconds
        let secs = if ts > 1_000_000_000_000 { ts / 1000 } else { ts };
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }

    // Format: "2017-08-17T04:00:00+05:30" and similar
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Load close prices from a CSV file.
///
/// The date column is the first header named `date`, `datetime`, `time` or
/// containing `timestamp` (defaults to column 0). The close column must be
/// named `close`; `adj close` is ignored. Rows with an unreadable date or a
/// non-positive close are skipped.
pub fn load_closes_from_csv<P: AsRef<Path>>(
    path: P,
    symbol: &str,
) -> Result<PriceSeries, DataError> {
    let path = path.as_ref();
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .from_path(path)?;

    // Detect format from headers
    let headers = reader.headers()?.clone();
    let headers_lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let date_col = headers_lower
        .iter()
        .position(|h| h == "date" || h == "datetime" || h == "time" || h.contains("timestamp"))
        .unwrap_or(0);
    let close_col = headers_lower
        .iter()
        .position(|h| h == "close")
        .ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: "close",
        })?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;

        let date = record.get(date_col).and_then(parse_date);
        let close = record
            .get(close_col)
            .and_then(|c| c.trim().parse::<f64>().ok())
            .filter(|c| validate_close(*c));

        match (date, close) {
            (Some(date), Some(close)) => points.push(PricePoint::new(date, close)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("{}: skipped {} unusable rows", path.display(), skipped);
    }

    if points.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }

    // Sort by date and drop duplicate rows
    let series = PriceSeries::from_unsorted(symbol, points);

    let dates: Vec<NaiveDate> = series.dates().collect();
    if let Some(report) = analyze_data_gaps(&dates) {
        log::debug!("{symbol}: {report}");
    }

    Ok(series)
}

/// Summary of gaps found in a dated series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    /// Number of rows analysed.
    pub points: usize,
    /// Most common spacing between rows, in days.
    pub expected_interval: i64,
    /// Number of places where the spacing exceeds the expected interval.
    pub gaps: usize,
    /// Largest spacing found, in days, and the date it starts on.
    pub largest_gap: Option<(i64, NaiveDate)>,
}

impl std::fmt::Display for GapReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, interval {}d, {} gaps",
            self.points, self.expected_interval, self.gaps
        )?;
        if let Some((days, start)) = self.largest_gap {
            write!(f, ", largest {days}d after {start}")?;
        }
        Ok(())
    }
}

/// Analyze data for gaps between consecutive dates.
///
/// Returns `None` when there are fewer than two dates.
pub fn analyze_data_gaps(dates: &[NaiveDate]) -> Option<GapReport> {
    if dates.len() < 2 {
        return None;
    }

    // Detect the interval (1 day for daily data, 7 for weekly)
    let mut intervals: HashMap<i64, usize> = HashMap::new();
    for window in dates.windows(2) {
        let diff = (window[1] - window[0]).num_days();
        *intervals.entry(diff).or_insert(0) += 1;
    }

    // Ties resolve to the smaller interval so the result is deterministic
    let expected_interval = intervals
        .iter()
        .max_by_key(|(interval, count)| (**count, std::cmp::Reverse(**interval)))
        .map(|(interval, _)| *interval)
        .unwrap_or(1);

    let mut gaps = 0;
    let mut largest_gap: Option<(i64, NaiveDate)> = None;

    for window in dates.windows(2) {
        let diff = (window[1] - window[0]).num_days();
        // Weekends are not gaps for daily data
        if diff > expected_interval.max(3) {
            gaps += 1;
            if largest_gap.is_none_or(|(largest, _)| diff > largest) {
                largest_gap = Some((diff, window[0]));
            }
        }
    }

    Some(GapReport {
        points: dates.len(),
        expected_interval,
        gaps,
        largest_gap,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05 15:30:00"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05T15:30:00+05:30"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("1704067200"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("1704067200000"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_numeric_cells_that_are_not_timestamps() {
        assert_eq!(parse_date("20240105"), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("20241305"), None);
        assert_eq!(parse_date("NaN"), None);
        assert_eq!(parse_date("inf"), None);
        assert_eq!(parse_date("12.5"), None);
        assert_eq!(parse_date("-1704067200"), None);
        assert_eq!(parse_date("42"), None);
    }

    #[test]
    fn test_load_ohlc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "abc.csv",
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-03,1,1,1,11.0,99,100\n\
             2024-01-02,1,1,1,10.0,99,100\n\
             2024-01-04,1,1,1,-1,99,100\n\
             2024-01-02,1,1,1,12.0,99,100\n",
        );

        let series = load_closes_from_csv(&path, "ABC").unwrap();

        assert_eq!(series.symbol(), "ABC");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0], PricePoint::new(date(2024, 1, 2), 10.0));
        assert_eq!(series.points()[1], PricePoint::new(date(2024, 1, 3), 11.0));
    }

    #[test]
    fn test_missing_close_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "abc.csv", "Date,Price\n2024-01-02,10\n");

        let err = load_closes_from_csv(&path, "ABC").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { column: "close", .. }));
    }

    #[test]
    fn test_empty_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "abc.csv", "Date,Close\n");

        assert!(matches!(
            load_closes_from_csv(&path, "ABC"),
            Err(DataError::Empty { .. })
        ));
    }

    #[test]
    fn test_gap_analysis_weekly() {
        let dates = vec![
            date(2024, 1, 7),
            date(2024, 1, 14),
            date(2024, 1, 21),
            date(2024, 2, 11),
            date(2024, 2, 18),
        ];

        let report = analyze_data_gaps(&dates).unwrap();
        assert_eq!(report.expected_interval, 7);
        assert_eq!(report.gaps, 1);
        assert_eq!(report.largest_gap, Some((21, date(2024, 1, 21))));
        assert!(analyze_data_gaps(&dates[..1]).is_none());
    }
}
