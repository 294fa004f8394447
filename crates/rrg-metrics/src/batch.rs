//! Batch computation over a watchlist.

use rayon::prelude::*;
use rrg_core::{resample, InstrumentTrail, PriceSeries, Timeframe};
use rrg_data::{DataError, DataSource, WatchlistEntry};
use thiserror::Error;

use crate::engine::{BaseDate, MetricConfig, MetricEngine};
use crate::error::MetricError;

/// Why one instrument was left out of a batch.
#[derive(Error, Debug)]
pub enum InstrumentError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Metric(#[from] MetricError),
}

impl InstrumentError {
    /// Whether the instrument had no data file at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, InstrumentError::Data(err) if err.is_not_found())
    }
}

/// A skipped instrument.
#[derive(Debug)]
pub struct InstrumentFailure {
    pub symbol: String,
    pub error: InstrumentError,
}

/// Result of a batch run: trails in watchlist order plus skipped instruments.
#[derive(Debug)]
pub struct BatchOutput {
    pub base_date: BaseDate,
    pub trails: Vec<InstrumentTrail>,
    pub failures: Vec<InstrumentFailure>,
}

impl MetricEngine {
    /// Compute trails for every watchlist entry against `benchmark`.
    ///
    /// Instruments are independent and computed in parallel. A failing
    /// instrument is logged and recorded, the rest are unaffected.
    pub fn run<S: DataSource + ?Sized>(
        &self,
        source: &S,
        benchmark: &PriceSeries,
        instruments: &[WatchlistEntry],
        timeframe: Timeframe,
    ) -> BatchOutput {
        let results: Vec<(&WatchlistEntry, Result<InstrumentTrail, InstrumentError>)> = instruments
            .par_iter()
            .map(|entry| {
                let result = source
                    .load(&entry.symbol)
                    .map_err(InstrumentError::from)
                    .and_then(|series| {
                        let series = resample(&series, timeframe);
                        Ok(self.trail(&series, benchmark)?)
                    })
                    .map(|mut trail| {
                        trail.label = entry.label.clone();
                        trail
                    });
                (entry, result)
            })
            .collect();

        let mut output = BatchOutput {
            base_date: self.base_date(),
            trails: Vec::with_capacity(results.len()),
            failures: Vec::new(),
        };

        for (entry, result) in results {
            match result {
                Ok(trail) => output.trails.push(trail),
                Err(error) => {
                    log::warn!("Skipping {}: {}", entry.symbol, error);
                    output.failures.push(InstrumentFailure {
                        symbol: entry.symbol.clone(),
                        error,
                    });
                }
            }
        }

        output
    }
}

/// Load the benchmark, resolve the base date and run the whole watchlist.
///
/// An explicit base date is moved to the label of its timeframe bucket so it
/// matches the resampled dates. Errors returned here abort the run.
pub fn run_batch<S: DataSource + ?Sized>(
    source: &S,
    benchmark_symbol: &str,
    instruments: &[WatchlistEntry],
    timeframe: Timeframe,
    mut config: MetricConfig,
) -> Result<BatchOutput, MetricError> {
    let benchmark = source
        .load(benchmark_symbol)
        .map_err(|source| MetricError::BenchmarkUnavailable {
            symbol: benchmark_symbol.to_string(),
            source,
        })?;
    let benchmark = resample(&benchmark, timeframe);

    config.base_date = config.base_date.map(|date| timeframe.bucket_end(date));
    let engine = MetricEngine::for_benchmark(config, &benchmark)?;
    log::info!(
        "Benchmark {}: {} {} points, base date {}",
        benchmark_symbol,
        benchmark.len(),
        timeframe,
        engine.base_date()
    );

    Ok(engine.run(source, &benchmark, instruments, timeframe))
}
