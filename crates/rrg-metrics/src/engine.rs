//! RS-Ratio and RS-Momentum computation.
//!
//! Relative strength is `100 * instrument / benchmark`. RS-Ratio is that
//! value z-scored against the `period` values before it, offset to 100.
//! RS-Momentum is the percentage change of RS-Ratio against its value on a
//! single session-wide base date, also offset to 100.

use std::fmt;

use chrono::NaiveDate;
use rrg_core::{DatedSeries, InstrumentTrail, MomentumMode, PriceSeries, RrgPoint, PARITY};

use crate::align::{align, AlignedSeries};
use crate::error::MetricError;
use crate::rolling::prior_window_zscores;

/// Engine parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricConfig {
    /// Rolling window `W` for the ratio normalization.
    pub period: usize,
    /// Periods back from the latest benchmark date used as the base date.
    pub momentum_lookback: usize,
    /// Explicit base date, overriding `momentum_lookback`.
    pub base_date: Option<NaiveDate>,
    /// Number of most recent points kept per trail.
    pub tail_length: usize,
    pub momentum_mode: MomentumMode,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            period: 14,
            momentum_lookback: 52,
            base_date: None,
            tail_length: 4,
            momentum_mode: MomentumMode::Anchored,
        }
    }
}

impl MetricConfig {
    pub const MIN_PERIOD: usize = 2;
    pub const MIN_TAIL_LENGTH: usize = 2;

    /// Reject a window too short for a sample standard deviation.
    pub fn validate(&self) -> Result<(), MetricError> {
        if self.period < Self::MIN_PERIOD {
            return Err(MetricError::InvalidPeriod {
                period: self.period,
                minimum: Self::MIN_PERIOD,
            });
        }
        Ok(())
    }

    /// Tail length with the minimum applied.
    pub fn tail_length(&self) -> usize {
        self.tail_length.max(Self::MIN_TAIL_LENGTH)
    }

    /// Shared dates an instrument needs with the benchmark.
    ///
    /// A derived base date sits `momentum_lookback` periods back, so the
    /// ratio sequence has to reach that far. An explicit date only needs
    /// one ratio.
    pub fn min_overlap(&self) -> usize {
        match self.base_date {
            Some(_) => self.period + 1,
            None => self.period + self.momentum_lookback.max(1),
        }
    }

    /// Aligned points needed before the first point can be emitted.
    pub fn min_points(&self) -> usize {
        match self.momentum_mode {
            MomentumMode::Anchored => self.period + 1,
            MomentumMode::Standardized => 2 * self.period + 1,
        }
    }
}

/// The momentum anchor shared by every instrument in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseDate(NaiveDate);

impl BaseDate {
    /// Resolve the base date against the benchmark's dates.
    ///
    /// An explicit date must fall between the benchmark's first ratio date
    /// (`dates[period]`) and its last date. Without one, the date
    /// `lookback` periods back is used, counting the latest as period 1.
    pub fn resolve(
        explicit: Option<NaiveDate>,
        benchmark_dates: &[NaiveDate],
        period: usize,
        lookback: usize,
    ) -> Result<Self, MetricError> {
        let n = benchmark_dates.len();

        if let Some(date) = explicit {
            if n <= period {
                return Err(MetricError::BenchmarkTooShort {
                    required: period + 1,
                    available: n,
                });
            }
            let first = benchmark_dates[period];
            let last = benchmark_dates[n - 1];
            if date < first || date > last {
                return Err(MetricError::InvalidBaseDate {
                    base_date: date,
                    first,
                    last,
                });
            }
            return Ok(Self(date));
        }

        let lookback = lookback.max(1);
        if n < period + lookback {
            return Err(MetricError::BenchmarkTooShort {
                required: period + lookback,
                available: n,
            });
        }
        Ok(Self(benchmark_dates[n - lookback]))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Computes instrument trails for one session.
#[derive(Debug, Clone)]
pub struct MetricEngine {
    config: MetricConfig,
    base_date: BaseDate,
}

impl MetricEngine {
    pub fn new(config: MetricConfig, base_date: BaseDate) -> Self {
        Self { config, base_date }
    }

    /// Build an engine whose base date is resolved from `benchmark`.
    pub fn for_benchmark(
        config: MetricConfig,
        benchmark: &PriceSeries,
    ) -> Result<Self, MetricError> {
        config.validate()?;
        let dates: Vec<NaiveDate> = benchmark.dates().collect();
        let base_date = BaseDate::resolve(
            config.base_date,
            &dates,
            config.period,
            config.momentum_lookback,
        )?;
        Ok(Self::new(config, base_date))
    }

    pub fn config(&self) -> &MetricConfig {
        &self.config
    }

    pub fn base_date(&self) -> BaseDate {
        self.base_date
    }

    /// Align `instrument` with `benchmark` and compute its trail.
    pub fn trail(
        &self,
        instrument: &PriceSeries,
        benchmark: &PriceSeries,
    ) -> Result<InstrumentTrail, MetricError> {
        let aligned = align(instrument, benchmark, self.config.min_overlap())?;
        self.compute(&aligned)
    }

    /// Compute the trail of an aligned series, keeping the last `tail_length` points.
    pub fn compute(&self, aligned: &AlignedSeries) -> Result<InstrumentTrail, MetricError> {
        let mut points = self.points(aligned)?;
        let start = points.len().saturating_sub(self.config.tail_length());
        points.drain(..start);

        Ok(InstrumentTrail::new(aligned.symbol(), aligned.symbol(), points))
    }

    /// Every point of an aligned series, oldest first, without truncation.
    pub fn points(&self, aligned: &AlignedSeries) -> Result<Vec<RrgPoint>, MetricError> {
        self.config.validate()?;
        let required = self.config.min_points();
        if aligned.len() < required {
            return Err(MetricError::InsufficientData {
                symbol: aligned.symbol().to_string(),
                required,
                available: aligned.len(),
            });
        }

        let window = self.config.period;
        let ratios: DatedSeries<f64> = aligned.dates()[window..]
            .iter()
            .copied()
            .zip(
                prior_window_zscores(&aligned.relative_strength(), window)
                    .into_iter()
                    .map(|z| PARITY + z),
            )
            .collect();

        let anchor = match (ratios.as_of(self.base_date.date()), ratios.dates().first()) {
            (Some((_, &ratio)), _) => ratio,
            (None, Some(&first)) => {
                return Err(MetricError::BaseDateNotCovered {
                    symbol: aligned.symbol().to_string(),
                    base_date: self.base_date.date(),
                    first,
                });
            }
            (None, None) => {
                return Err(MetricError::InsufficientData {
                    symbol: aligned.symbol().to_string(),
                    required,
                    available: aligned.len(),
                });
            }
        };

        let changes: Vec<f64> = ratios
            .values()
            .iter()
            .map(|&ratio| anchored_change(ratio, anchor))
            .collect();

        let points = match self.config.momentum_mode {
            MomentumMode::Anchored => ratios
                .iter()
                .zip(changes)
                .map(|((date, &ratio), change)| RrgPoint::new(date, ratio, PARITY + change))
                .collect(),
            MomentumMode::Standardized => ratios
                .iter()
                .skip(window)
                .zip(prior_window_zscores(&changes, window))
                .map(|((date, &ratio), z)| RrgPoint::new(date, ratio, PARITY + z))
                .collect(),
        };

        Ok(points)
    }
}

/// Percentage change of `ratio` against `anchor`.
fn anchored_change(ratio: f64, anchor: f64) -> f64 {
    if anchor == 0.0 {
        return 0.0;
    }
    let change = 100.0 * (ratio / anchor - 1.0);
    if change.is_finite() { change } else { 0.0 }
}
