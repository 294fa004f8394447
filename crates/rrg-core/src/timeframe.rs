//! Timeframe types and price resampling.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::price::{PricePoint, PriceSeries};

/// Timeframe enumeration for chart periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Timeframe {
    /// The label date of the bucket containing `date`.
    ///
    /// Weekly buckets are ISO weeks labelled with their Sunday, monthly
    /// buckets are labelled with the last day of the month.
    pub fn bucket_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Timeframe::Daily => date,
            Timeframe::Weekly => {
                let to_sunday = 6 - u64::from(date.weekday().num_days_from_monday());
                date.checked_add_days(Days::new(to_sunday)).unwrap_or(date)
            }
            Timeframe::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|first| first.pred_opt())
                    .unwrap_or(date)
            }
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" | "1d" => Ok(Timeframe::Daily),
            "weekly" | "week" | "w" | "1w" => Ok(Timeframe::Weekly),
            "monthly" | "month" | "m" | "1m" => Ok(Timeframe::Monthly),
            other => Err(format!("unknown timeframe `{other}`")),
        }
    }
}

/// Resample a daily series into a coarser timeframe.
///
/// Each bucket keeps the last close inside it and is dated with the bucket
/// label, so every symbol resampled with the same timeframe shares dates.
pub fn resample(series: &PriceSeries, timeframe: Timeframe) -> PriceSeries {
    if timeframe == Timeframe::Daily || series.is_empty() {
        return series.clone();
    }

    let mut resampled = Vec::new();
    let mut current_bucket: Option<PricePoint> = None;

    for point in series.points() {
        let label = timeframe.bucket_end(point.date);

        match current_bucket.as_mut() {
            // Same bucket - later close replaces the earlier one
            Some(bucket) if bucket.date == label => bucket.close = point.close,
            _ => {
                // New bucket - save current and start new
                if let Some(finished) = current_bucket.take() {
                    resampled.push(finished);
                }
                current_bucket = Some(PricePoint::new(label, point.close));
            }
        }
    }

    // Don't forget the last bucket
    if let Some(bucket) = current_bucket {
        resampled.push(bucket);
    }

    PriceSeries::from_unsorted(series.symbol(), resampled)
}
