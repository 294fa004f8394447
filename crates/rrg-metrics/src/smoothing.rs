//! Display curves for instrument tails.
//!
//! Curves are only a drawing aid. Hit-testing and labels always read the
//! trail points themselves.

use rrg_core::{ChartPos, InstrumentTrail};

/// Turns an ordered run of points into the polyline that is drawn.
pub trait CurveStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce the drawn polyline. Every input point must appear in the output.
    fn curve(&self, points: &[ChartPos]) -> Vec<ChartPos>;
}

/// Straight lines between consecutive points.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightSegment;

impl CurveStrategy for StraightSegment {
    fn name(&self) -> &'static str {
        "straight"
    }

    fn curve(&self, points: &[ChartPos]) -> Vec<ChartPos> {
        points.to_vec()
    }
}

/// Uniform Catmull-Rom spline through every point.
#[cfg(feature = "spline")]
#[derive(Debug, Clone, Copy)]
pub struct SplineInterpolation {
    samples_per_segment: usize,
}

#[cfg(feature = "spline")]
impl Default for SplineInterpolation {
    fn default() -> Self {
        Self {
            samples_per_segment: 16,
        }
    }
}

#[cfg(feature = "spline")]
impl SplineInterpolation {
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment: samples_per_segment.max(1),
        }
    }

    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    fn sample(p0: ChartPos, p1: ChartPos, p2: ChartPos, p3: ChartPos, t: f64) -> ChartPos {
        let t2 = t * t;
        let t3 = t2 * t;
        let axis = |a: f64, b: f64, c: f64, d: f64| {
            0.5 * (2.0 * b
                + (c - a) * t
                + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
                + (3.0 * b - a - 3.0 * c + d) * t3)
        };
        ChartPos::new(axis(p0.x, p1.x, p2.x, p3.x), axis(p0.y, p1.y, p2.y, p3.y))
    }
}

#[cfg(feature = "spline")]
impl CurveStrategy for SplineInterpolation {
    fn name(&self) -> &'static str {
        "spline"
    }

    fn curve(&self, points: &[ChartPos]) -> Vec<ChartPos> {
        let n = points.len();
        if n < 3 {
            return points.to_vec();
        }

        let steps = self.samples_per_segment;
        let mut curve = Vec::with_capacity((n - 1) * steps + 1);

        for i in 0..n - 1 {
            // End segments reuse the end point as the missing neighbour
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(n - 1)];

            // Knots are pushed as is, not evaluated
            curve.push(p1);
            for step in 1..steps {
                let t = step as f64 / steps as f64;
                curve.push(Self::sample(p0, p1, p2, p3, t));
            }
        }
        curve.push(points[n - 1]);

        curve
    }
}

#[cfg(feature = "spline")]
fn spline_strategy() -> Option<Box<dyn CurveStrategy>> {
    Some(Box::new(SplineInterpolation::default()))
}

#[cfg(not(feature = "spline"))]
fn spline_strategy() -> Option<Box<dyn CurveStrategy>> {
    None
}

/// Chooses a curve strategy once and applies it to every tail.
pub struct TailSmoother {
    strategy: Box<dyn CurveStrategy>,
}

impl TailSmoother {
    /// Build a smoother. Requesting curves in a build without the `spline`
    /// feature falls back to straight segments.
    pub fn new(curves_requested: bool) -> Self {
        let strategy = if curves_requested {
            spline_strategy().unwrap_or_else(|| {
                log::debug!("Smoothing unavailable: built without `spline`, using straight tails");
                Box::new(StraightSegment)
            })
        } else {
            Box::new(StraightSegment)
        };

        Self { strategy }
    }

    pub fn with_strategy(strategy: Box<dyn CurveStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// The polyline to draw for `trail`.
    pub fn smooth(&self, trail: &InstrumentTrail) -> Vec<ChartPos> {
        let points = trail.positions();
        if points.len() < 3 {
            return points;
        }
        self.strategy.curve(&points)
    }

    /// Curves for every trail, in order.
    pub fn smooth_all(&self, trails: &[InstrumentTrail]) -> Vec<Vec<ChartPos>> {
        trails.iter().map(|trail| self.smooth(trail)).collect()
    }
}

impl Default for TailSmoother {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for TailSmoother {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailSmoother")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
