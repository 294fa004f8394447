//! Dated close-price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated close price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Close prices for one symbol, ordered by strictly increasing date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from rows in any order.
    ///
    /// Rows are sorted ascending by date and duplicate dates are dropped,
    /// keeping the first occurrence in input order.
    pub fn from_unsorted(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps the first duplicate ahead of later ones
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);

        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// Symbol this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterator over the dates of the series.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Date of the most recent row.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Date of the oldest row.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }
}
