//! Errors raised by the metric pipeline.

use chrono::NaiveDate;
use rrg_data::DataError;
use thiserror::Error;

/// Metric computation errors.
///
/// Per-instrument variants exclude that instrument from the chart. The
/// benchmark and base-date variants abort the whole run.
#[derive(Error, Debug)]
pub enum MetricError {
    #[error("{symbol}: only {available} dates overlap the benchmark, {required} required")]
    InsufficientOverlap {
        symbol: String,
        required: usize,
        available: usize,
    },
    #[error("{symbol}: {available} aligned points, at least {required} required")]
    InsufficientData {
        symbol: String,
        required: usize,
        available: usize,
    },
    #[error("{symbol}: history starts after base date {base_date} (first ratio on {first})")]
    BaseDateNotCovered {
        symbol: String,
        base_date: NaiveDate,
        first: NaiveDate,
    },
    #[error("period must be at least {minimum}, got {period}")]
    InvalidPeriod { period: usize, minimum: usize },
    #[error("base date {base_date} outside benchmark range {first} to {last}")]
    InvalidBaseDate {
        base_date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },
    #[error("benchmark has {available} points, {required} needed to derive a base date")]
    BenchmarkTooShort { required: usize, available: usize },
    #[error("benchmark `{symbol}` unavailable: {source}")]
    BenchmarkUnavailable {
        symbol: String,
        #[source]
        source: DataError,
    },
}

impl MetricError {
    /// Whether this error aborts the run rather than a single instrument.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MetricError::InvalidPeriod { .. }
                | MetricError::InvalidBaseDate { .. }
                | MetricError::BenchmarkTooShort { .. }
                | MetricError::BenchmarkUnavailable { .. }
        )
    }
}
