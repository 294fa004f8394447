//! Date alignment of an instrument against the benchmark.

use chrono::NaiveDate;
use rrg_core::PriceSeries;

use crate::error::MetricError;

/// Closes of an instrument and the benchmark on the dates both share.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    symbol: String,
    dates: Vec<NaiveDate>,
    instrument: Vec<f64>,
    benchmark: Vec<f64>,
}

impl AlignedSeries {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn instrument(&self) -> &[f64] {
        &self.instrument
    }

    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Relative strength per date: `100 * instrument / benchmark`.
    pub fn relative_strength(&self) -> Vec<f64> {
        self.instrument
            .iter()
            .zip(&self.benchmark)
            .map(|(inst, bench)| inst / bench * 100.0)
            .collect()
    }
}

/// Intersect the dates of `instrument` and `benchmark`.
///
/// Both series are sorted, so a single merge walk finds the shared dates.
/// Fails when fewer than `min_len` dates are shared.
pub fn align(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
    min_len: usize,
) -> Result<AlignedSeries, MetricError> {
    let left = instrument.points();
    let right = benchmark.points();
    let capacity = left.len().min(right.len());

    let mut aligned = AlignedSeries {
        symbol: instrument.symbol().to_string(),
        dates: Vec::with_capacity(capacity),
        instrument: Vec::with_capacity(capacity),
        benchmark: Vec::with_capacity(capacity),
    };

    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].date.cmp(&right[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                aligned.dates.push(left[i].date);
                aligned.instrument.push(left[i].close);
                aligned.benchmark.push(right[j].close);
                i += 1;
                j += 1;
            }
        }
    }

    if aligned.len() < min_len {
        return Err(MetricError::InsufficientOverlap {
            symbol: aligned.symbol,
            required: min_len,
            available: aligned.dates.len(),
        });
    }

    Ok(aligned)
}
