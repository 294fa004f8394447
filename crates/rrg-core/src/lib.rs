//! Core types for the rrg workspace.
//!
//! This crate provides the fundamental value types shared by every other crate:
//! - `PriceSeries` - dated close prices for one symbol
//! - `DatedSeries` - a dated sequence of derived values
//! - `RrgPoint` / `InstrumentTrail` - computed chart coordinates
//! - `Timeframe` - bucket period and resampling

pub mod point;
pub mod price;
pub mod series;
pub mod timeframe;

pub use point::{ChartPos, InstrumentTrail, MomentumMode, Quadrant, RrgPoint, PARITY};
pub use price::{PricePoint, PriceSeries};
pub use series::DatedSeries;
pub use timeframe::{resample, Timeframe};
