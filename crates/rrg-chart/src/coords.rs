//! Coordinate conversion and hit-testing.
//!
//! Two spaces are involved:
//!
//! - **Screen** ([`ScreenPos`]): logical pixels from the top-left of the window
//! - **Chart** ([`ChartPos`]): x = RS-Ratio, y = RS-Momentum
//!
//! [`ChartTransform`] maps one onto the other for a given plot rectangle.
//! Hit-testing happens in chart space so it always reads trail data, never
//! drawn curves.

use rrg_core::{ChartPos, InstrumentTrail, PARITY};

/// Screen coordinates in logical pixels from the top-left corner.
///
/// X increases to the right, Y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for ScreenPos {
    fn from(pos: (f32, f32)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

/// Plot area on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check if a screen position is inside the rectangle.
    #[must_use]
    pub fn contains(self, pos: ScreenPos) -> bool {
        pos.x >= self.left
            && pos.x <= self.left + self.width
            && pos.y >= self.top
            && pos.y <= self.top + self.height
    }
}

/// Visible chart range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartBounds {
    /// Margin added around the data on every side, in chart units.
    pub const PADDING: f64 = 0.3;

    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest bounds holding every trail point. `None` without points.
    #[must_use]
    pub fn of_trails(trails: &[InstrumentTrail]) -> Option<Self> {
        let mut points = trails.iter().flat_map(|t| t.points());
        let first = points.next()?;

        let init = Self::new(first.rs_ratio, first.rs_ratio, first.rs_momentum, first.rs_momentum);
        Some(points.fold(init, |b, p| Self {
            x_min: b.x_min.min(p.rs_ratio),
            x_max: b.x_max.max(p.rs_ratio),
            y_min: b.y_min.min(p.rs_momentum),
            y_max: b.y_max.max(p.rs_momentum),
        }))
    }

    /// Bounds to draw `trails` in: the data extent plus [`Self::PADDING`].
    #[must_use]
    pub fn fit(trails: &[InstrumentTrail]) -> Self {
        Self::of_trails(trails).unwrap_or_default().expand(Self::PADDING)
    }

    /// Grow every side by `margin` chart units.
    #[must_use]
    pub fn expand(self, margin: f64) -> Self {
        Self {
            x_min: self.x_min - margin,
            x_max: self.x_max + margin,
            y_min: self.y_min - margin,
            y_max: self.y_max + margin,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn contains(self, pos: ChartPos) -> bool {
        pos.x >= self.x_min && pos.x <= self.x_max && pos.y >= self.y_min && pos.y <= self.y_max
    }
}

impl Default for ChartBounds {
    fn default() -> Self {
        Self::new(PARITY - 1.0, PARITY + 1.0, PARITY - 1.0, PARITY + 1.0)
    }
}

/// Maps chart bounds onto a screen rectangle. Built once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTransform {
    pub bounds: ChartBounds,
    pub rect: ScreenRect,
}

impl ChartTransform {
    #[must_use]
    pub fn new(bounds: ChartBounds, rect: ScreenRect) -> Self {
        Self { bounds, rect }
    }

    // Degenerate sizes would divide by zero
    fn scale(&self) -> (f64, f64) {
        let width = f64::from(self.rect.width).max(1.0);
        let height = f64::from(self.rect.height).max(1.0);
        let sx = width / self.bounds.width().max(f64::EPSILON);
        let sy = height / self.bounds.height().max(f64::EPSILON);
        (sx, sy)
    }

    /// Convert a chart position to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, pos: ChartPos) -> ScreenPos {
        let (sx, sy) = self.scale();
        ScreenPos::new(
            self.rect.left + ((pos.x - self.bounds.x_min) * sx) as f32,
            self.rect.top + ((self.bounds.y_max - pos.y) * sy) as f32,
        )
    }

    /// Convert screen coordinates to a chart position.
    #[must_use]
    pub fn to_chart(&self, pos: ScreenPos) -> ChartPos {
        let (sx, sy) = self.scale();
        ChartPos::new(
            self.bounds.x_min + f64::from(pos.x - self.rect.left) / sx,
            self.bounds.y_max - f64::from(pos.y - self.rect.top) / sy,
        )
    }

    /// A hit tolerance of `pixels` on screen, expressed in chart units.
    #[must_use]
    pub fn hit_radius(&self, pixels: f32) -> HitRadius {
        let (sx, sy) = self.scale();
        let pixels = f64::from(pixels);
        HitRadius::new(pixels / sx, pixels / sy)
    }
}

/// Hit tolerance along each chart axis.
///
/// The axes are scaled independently on screen, so a round tolerance in
/// pixels is an ellipse in chart units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadius {
    pub x: f64,
    pub y: f64,
}

impl HitRadius {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn uniform(r: f64) -> Self {
        Self { x: r, y: r }
    }

    /// Usable only with positive, finite extents.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }

    /// Distance from `a` to `b` where 1.0 is the edge of the ellipse.
    #[must_use]
    pub fn normalized_distance(&self, a: ChartPos, b: ChartPos) -> f64 {
        let dx = (a.x - b.x) / self.x;
        let dy = (a.y - b.y) / self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A trail point under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the trail.
    pub trail: usize,
    /// Index of the point within the trail.
    pub point: usize,
    /// Normalized distance, at most 1.0.
    pub distance: f64,
}

/// Find the trail point nearest to `at` within `radius`.
///
/// The head of every trail is a candidate. Older points are candidates only
/// for trails where `tail_visible(trail index)` holds. On equal distances the
/// earlier trail and point win.
#[must_use]
pub fn hit_test<F>(
    trails: &[InstrumentTrail],
    at: ChartPos,
    radius: HitRadius,
    tail_visible: F,
) -> Option<Hit>
where
    F: Fn(usize) -> bool,
{
    if !radius.is_valid() || !at.x.is_finite() || !at.y.is_finite() {
        return None;
    }

    let mut best: Option<Hit> = None;
    for (trail_idx, trail) in trails.iter().enumerate() {
        let points = trail.points();
        let first = if tail_visible(trail_idx) {
            0
        } else {
            points.len().saturating_sub(1)
        };

        for (point_idx, point) in points.iter().enumerate().skip(first) {
            let distance = radius.normalized_distance(at, point.pos());
            if distance > 1.0 {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Hit {
                    trail: trail_idx,
                    point: point_idx,
                    distance,
                });
            }
        }
    }
    best
}
