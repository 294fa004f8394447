//! Computed RRG coordinates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value at which both axes indicate parity with the benchmark trend.
pub const PARITY: f64 = 100.0;

/// How RS-Momentum is derived from the RS-Ratio sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumMode {
    /// Percentage change of RS-Ratio against its value on the base date.
    #[default]
    Anchored,
    /// The anchored change, z-scored over the trailing window.
    Standardized,
}

/// A position in chart space: x = RS-Ratio, y = RS-Momentum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPos {
    pub x: f64,
    pub y: f64,
}

impl ChartPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The normalized coordinate of one instrument on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RrgPoint {
    pub date: NaiveDate,
    pub rs_ratio: f64,
    pub rs_momentum: f64,
}

impl RrgPoint {
    pub fn new(date: NaiveDate, rs_ratio: f64, rs_momentum: f64) -> Self {
        Self {
            date,
            rs_ratio,
            rs_momentum,
        }
    }

    /// Position of this point in chart space.
    pub fn pos(&self) -> ChartPos {
        ChartPos::new(self.rs_ratio, self.rs_momentum)
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::of(self.rs_ratio, self.rs_momentum)
    }
}

/// Rotation quadrant of an RRG point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Strong and gaining (top-right).
    Leading,
    /// Strong but losing momentum (bottom-right).
    Weakening,
    /// Weak and losing (bottom-left).
    Lagging,
    /// Weak but gaining momentum (top-left).
    Improving,
}

impl Quadrant {
    /// Classify a (ratio, momentum) pair. Values on the parity line count as weak.
    pub fn of(rs_ratio: f64, rs_momentum: f64) -> Self {
        match (rs_ratio > PARITY, rs_momentum > PARITY) {
            (true, true) => Quadrant::Leading,
            (true, false) => Quadrant::Weakening,
            (false, false) => Quadrant::Lagging,
            (false, true) => Quadrant::Improving,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Leading => "Leading",
            Quadrant::Weakening => "Weakening",
            Quadrant::Lagging => "Lagging",
            Quadrant::Improving => "Improving",
        }
    }

    /// Marker colour (RGB) for points in this quadrant.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Quadrant::Leading => [0x00, 0x82, 0x17],
            Quadrant::Weakening => [0x91, 0x80, 0x00],
            Quadrant::Lagging => [0xE0, 0x00, 0x2B],
            Quadrant::Improving => [0x00, 0x74, 0x9D],
        }
    }

    /// Background fill (RGB) for the quadrant area.
    pub fn background(&self) -> [u8; 3] {
        match self {
            Quadrant::Leading => [0xBD, 0xFF, 0xC9],
            Quadrant::Weakening => [0xFF, 0xF7, 0xB8],
            Quadrant::Lagging => [0xFF, 0xB9, 0xC6],
            Quadrant::Improving => [0xB1, 0xEB, 0xFF],
        }
    }

    pub fn all() -> &'static [Quadrant] {
        &[
            Quadrant::Leading,
            Quadrant::Weakening,
            Quadrant::Lagging,
            Quadrant::Improving,
        ]
    }
}

/// The most recent RRG points of one instrument, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentTrail {
    /// Data symbol the trail was computed for.
    pub symbol: String,
    /// Display name (short name from the watchlist, or the symbol).
    pub label: String,
    points: Vec<RrgPoint>,
}

impl InstrumentTrail {
    pub fn new(symbol: impl Into<String>, label: impl Into<String>, points: Vec<RrgPoint>) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
            points,
        }
    }

    pub fn points(&self) -> &[RrgPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The newest point (the head marker).
    pub fn head(&self) -> Option<&RrgPoint> {
        self.points.last()
    }

    /// Index of the newest point.
    pub fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    /// Chart positions of all points, oldest first.
    pub fn positions(&self) -> Vec<ChartPos> {
        self.points.iter().map(RrgPoint::pos).collect()
    }
}
