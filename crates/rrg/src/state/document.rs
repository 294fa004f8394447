//! The computed chart being viewed.
//!
//! Trails and their display curves are fixed once the batch has run; only
//! the session state changes while the window is open.

use chrono::NaiveDate;
use rrg_chart::snapshot::DATE_FORMAT;
use rrg_core::{ChartPos, InstrumentTrail};
use rrg_metrics::TailSmoother;

#[derive(Debug, Clone)]
pub struct DocumentState {
    pub title: String,
    pub trails: Vec<InstrumentTrail>,
    /// Smoothed tail of each trail, same order as `trails`.
    pub curves: Vec<Vec<ChartPos>>,
}

impl DocumentState {
    pub fn new(benchmark: &str, trails: Vec<InstrumentTrail>, smoother: &TailSmoother) -> Self {
        let curves = smoother.smooth_all(&trails);
        log::debug!(
            "Smoothed {} tails with {}",
            curves.len(),
            smoother.strategy_name()
        );

        Self {
            title: chart_title(benchmark, latest_date(&trails)),
            trails,
            curves,
        }
    }
}

/// Newest head date across all trails.
pub fn latest_date(trails: &[InstrumentTrail]) -> Option<NaiveDate> {
    trails.iter().filter_map(|t| t.head()).map(|p| p.date).max()
}

/// Window title: `RRG - BENCHMARK - 05 Jan 2024`.
pub fn chart_title(benchmark: &str, latest: Option<NaiveDate>) -> String {
    match latest {
        Some(date) => format!(
            "RRG - {} - {}",
            benchmark.to_uppercase(),
            date.format(DATE_FORMAT)
        ),
        None => format!("RRG - {}", benchmark.to_uppercase()),
    }
}
