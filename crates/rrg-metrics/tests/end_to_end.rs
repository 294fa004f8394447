//! End-to-end tests: CSV files on disk through to instrument trails.

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use rrg_core::Timeframe;
use rrg_data::{SymbolDirectory, WatchlistEntry};
use rrg_metrics::{run_batch, MetricConfig, MetricError};

const POINTS: usize = 70;

fn week(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Days::new(7 * i as u64)
}

fn benchmark_close(i: usize) -> f64 {
    1000.0 + 4.0 * i as f64 + 15.0 * (i as f64 * 0.21).sin()
}

fn instrument_close(i: usize, drift: f64) -> f64 {
    100.0 * (1.0 + drift * i as f64) + 6.0 * (i as f64 * 0.37).cos()
}

fn write_csv(dir: &Path, symbol: &str, closes: impl Iterator<Item = f64>) {
    let mut text = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, close) in closes.enumerate() {
        text.push_str(&format!("{},0,0,0,{close},0\n", week(i)));
    }
    fs::write(dir.join(format!("{symbol}.csv")), text).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "NIFTY", (0..POINTS).map(benchmark_close));
    write_csv(dir.path(), "INFY", (0..POINTS).map(|i| instrument_close(i, 0.004)));
    write_csv(dir.path(), "TCS", (0..POINTS).map(|i| instrument_close(i, -0.002)));
    dir
}

fn watchlist(symbols: &[&str]) -> Vec<WatchlistEntry> {
    symbols
        .iter()
        .filter_map(|s| WatchlistEntry::parse(s))
        .collect()
}

fn full_history() -> MetricConfig {
    MetricConfig {
        tail_length: POINTS,
        ..Default::default()
    }
}

#[test]
fn test_seventy_weekly_points() {
    let dir = fixture();
    let source = SymbolDirectory::new(dir.path());

    let output = run_batch(
        &source,
        "NIFTY",
        &watchlist(&["INFY"]),
        Timeframe::Weekly,
        full_history(),
    )
    .unwrap();

    assert!(output.failures.is_empty());
    let trail = &output.trails[0];

    // The first 14 points are consumed by the ratio warm-up
    assert_eq!(trail.len(), 56);
    assert_eq!(trail.points()[0].date, week(14));

    // Base date is 52 periods back, index 4 of the ratio sequence
    assert_eq!(output.base_date.date(), week(18));
    assert_eq!(trail.points()[4].date, week(18));
    assert_eq!(trail.points()[4].rs_momentum, 100.0);

    let last = trail.head().unwrap();
    assert_ne!(last.rs_ratio, trail.points()[4].rs_ratio);
    assert!((last.rs_momentum - 100.0).abs() > 1e-9);

    for point in trail.points() {
        assert!(point.rs_ratio.is_finite());
        assert!(point.rs_momentum.is_finite());
    }
}

#[test]
fn test_missing_symbol_is_skipped() {
    let dir = fixture();
    let source = SymbolDirectory::new(dir.path());

    let output = run_batch(
        &source,
        "NIFTY",
        &watchlist(&["INFY", "WIPRO", "TCS,Tata"]),
        Timeframe::Weekly,
        MetricConfig::default(),
    )
    .unwrap();

    let labels: Vec<_> = output.trails.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["INFY", "TATA"]);

    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].symbol, "WIPRO");
    assert!(output.failures[0].error.is_not_found());
}

#[test]
fn test_base_date_changes_momentum_only() {
    let dir = fixture();
    let source = SymbolDirectory::new(dir.path());
    let symbols = watchlist(&["INFY", "TCS"]);

    let run = |base: NaiveDate| {
        let config = MetricConfig {
            base_date: Some(base),
            ..full_history()
        };
        run_batch(&source, "NIFTY", &symbols, Timeframe::Weekly, config).unwrap()
    };

    let early = run(week(20));
    let late = run(week(40));

    for (a, b) in early.trails.iter().zip(&late.trails) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.points().iter().zip(b.points()) {
            assert_eq!(p.rs_ratio, q.rs_ratio);
        }
        let moved = a
            .points()
            .iter()
            .zip(b.points())
            .any(|(p, q)| p.rs_momentum != q.rs_momentum);
        assert!(moved, "{} momentum ignored the base date", a.symbol);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let dir = fixture();
    let source = SymbolDirectory::new(dir.path());
    let symbols = watchlist(&["INFY", "TCS"]);

    let first = run_batch(&source, "NIFTY", &symbols, Timeframe::Weekly, full_history()).unwrap();
    let second = run_batch(&source, "NIFTY", &symbols, Timeframe::Weekly, full_history()).unwrap();

    assert_eq!(first.base_date, second.base_date);
    for (a, b) in first.trails.iter().zip(&second.trails) {
        for (p, q) in a.points().iter().zip(b.points()) {
            assert_eq!(p.rs_ratio.to_bits(), q.rs_ratio.to_bits());
            assert_eq!(p.rs_momentum.to_bits(), q.rs_momentum.to_bits());
        }
    }
}

#[test]
fn test_base_date_outside_data_aborts() {
    let dir = fixture();
    let source = SymbolDirectory::new(dir.path());

    let config = MetricConfig {
        base_date: NaiveDate::from_ymd_opt(2020, 1, 5),
        ..Default::default()
    };
    let err = run_batch(&source, "NIFTY", &watchlist(&["INFY"]), Timeframe::Weekly, config)
        .unwrap_err();

    assert!(matches!(err, MetricError::InvalidBaseDate { .. }));
    assert!(err.is_fatal());
}
