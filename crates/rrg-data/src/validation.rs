//! Validation utilities for loaded price data.

use rrg_core::PriceSeries;

/// Validate a close price is usable as a ratio operand.
pub fn validate_close(close: f64) -> bool {
    close.is_finite() && close > 0.0
}

/// Validate a series is ordered, duplicate free, and holds only usable closes.
pub fn validate_series(series: &PriceSeries) -> bool {
    let ordered = series
        .points()
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date);

    ordered && series.points().iter().all(|p| validate_close(p.close))
}
