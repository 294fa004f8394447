//! Relative rotation metrics.
//!
//! Turns price series into RS-Ratio / RS-Momentum trails:
//! - `align` - shared dates of an instrument and the benchmark
//! - `MetricEngine` - ratio and momentum against a session base date
//! - `TailSmoother` - display curves through trail points
//! - `run_batch` - a whole watchlist, in parallel

pub mod align;
pub mod batch;
pub mod engine;
pub mod error;
pub mod rolling;
pub mod smoothing;

pub use align::{align, AlignedSeries};
pub use batch::{run_batch, BatchOutput, InstrumentError, InstrumentFailure};
pub use engine::{BaseDate, MetricConfig, MetricEngine};
pub use error::MetricError;
#[cfg(feature = "spline")]
pub use smoothing::SplineInterpolation;
pub use smoothing::{CurveStrategy, StraightSegment, TailSmoother};
