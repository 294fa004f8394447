//! Render snapshot for decoupled rendering.
//!
//! [`RenderSnapshot`] is an immutable description of one frame, built from
//! the trails and the session state alone. The renderer draws exactly what
//! it contains and keeps no state of its own.

use rrg_core::{ChartPos, InstrumentTrail, Quadrant, PARITY};

use crate::coords::ChartBounds;
use crate::session::SessionState;

/// Alpha of tail lines shown by the tails toggle.
pub const TAIL_ALPHA: f32 = 0.5;
/// Alpha of name labels shown by the annotations toggle.
pub const LABEL_ALPHA: f32 = 0.6;
/// Alpha of the quadrant name labels.
pub const QUADRANT_LABEL_ALPHA: f32 = 0.4;

/// Format of point date labels.
pub const DATE_FORMAT: &str = "%d %b %Y";

pub const HELP_TEXT: &str = "\
Keyboard Shortcuts

[Delete]  Remove all highlights
[A]       Toggle text annotations
[T]       Toggle tail lines
[H]       Display this help text
[R]       Reset the chart
[Q]       Quit

With an instrument highlighted:

Use the \u{2190} and \u{2192} arrow keys to cycle through dates.

Mouse interaction

Left-click a marker to highlight its tail, markers and label";

/// Format a chart position for the status line.
pub fn format_coords(pos: ChartPos) -> String {
    format!("RS: {:.2}     MOM: {:.2}", pos.x, pos.y)
}

/// Date text next to a trail point.
#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pub pos: ChartPos,
    pub text: String,
    /// Set for the newest point of the trail.
    pub bold: bool,
}

/// Everything drawn for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailView {
    pub symbol: String,
    pub label: String,
    /// Colour of the quadrant the newest point sits in.
    pub color: [u8; 3],
    /// Newest point, always drawn.
    pub head: ChartPos,
    pub highlighted: bool,
    /// Polyline through the tail, when visible.
    pub line: Option<Vec<ChartPos>>,
    pub line_alpha: f32,
    /// Older points drawn as small markers while highlighted.
    pub tail_markers: Vec<ChartPos>,
    /// Alpha of the name label, 0.0 when hidden.
    pub label_alpha: f32,
    /// Date of the point under the cursor, while highlighted.
    pub date_label: Option<DateLabel>,
}

/// Quadrant name placed at the edge of the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantLabel {
    pub quadrant: Quadrant,
    pub pos: ChartPos,
}

/// Immutable snapshot of everything needed to render a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub title: String,
    pub bounds: ChartBounds,
    pub trails: Vec<TrailView>,
    pub quadrant_labels: Vec<QuadrantLabel>,
    pub help: Option<&'static str>,
}

impl RenderSnapshot {
    /// Build the frame for `trails` in `state`.
    ///
    /// `curves` holds the smoothed polyline of each trail, in the same order.
    /// A missing curve falls back to the trail points.
    pub fn build(
        title: impl Into<String>,
        trails: &[InstrumentTrail],
        curves: &[Vec<ChartPos>],
        state: &SessionState,
    ) -> Self {
        let flags = state.flags();

        let views = trails
            .iter()
            .enumerate()
            .filter_map(|(idx, trail)| {
                let head = trail.head()?;
                let cursor = state.cursor(idx);
                let highlighted = cursor.is_some();

                let line_visible = flags.show_tails || highlighted;
                let line = line_visible.then(|| {
                    curves
                        .get(idx)
                        .filter(|curve| !curve.is_empty())
                        .cloned()
                        .unwrap_or_else(|| trail.positions())
                });
                let line_alpha = if highlighted { 1.0 } else { TAIL_ALPHA };

                let tail_markers = if highlighted {
                    trail.points()[..trail.len() - 1].iter().map(|p| p.pos()).collect()
                } else {
                    Vec::new()
                };

                let label_alpha = match (highlighted, flags.show_annotations) {
                    (true, _) => 1.0,
                    (false, true) => LABEL_ALPHA,
                    (false, false) => 0.0,
                };

                let date_label = cursor.and_then(|c| {
                    let point = trail.points().get(c)?;
                    Some(DateLabel {
                        pos: point.pos(),
                        text: point.date.format(DATE_FORMAT).to_string(),
                        bold: Some(c) == trail.last_index(),
                    })
                });

                Some(TrailView {
                    symbol: trail.symbol.clone(),
                    label: trail.label.clone(),
                    color: head.quadrant().color(),
                    head: head.pos(),
                    highlighted,
                    line,
                    line_alpha,
                    tail_markers,
                    label_alpha,
                    date_label,
                })
            })
            .collect();

        Self {
            title: title.into(),
            bounds: ChartBounds::fit(trails),
            trails: views,
            quadrant_labels: quadrant_labels(trails),
            help: flags.show_help.then_some(HELP_TEXT),
        }
    }
}

/// Quadrant names for the quadrants the data reaches into.
fn quadrant_labels(trails: &[InstrumentTrail]) -> Vec<QuadrantLabel> {
    let Some(extent) = ChartBounds::of_trails(trails) else {
        return Vec::new();
    };

    let mut labels = Vec::with_capacity(4);
    if extent.x_min < PARITY && extent.y_max > PARITY {
        labels.push(QuadrantLabel {
            quadrant: Quadrant::Improving,
            pos: ChartPos::new(extent.x_min - 0.2, extent.y_max),
        });
    }
    if extent.x_max > PARITY && extent.y_max > PARITY {
        labels.push(QuadrantLabel {
            quadrant: Quadrant::Leading,
            pos: ChartPos::new(extent.x_max - 0.1, extent.y_max),
        });
    }
    if extent.x_max > PARITY && extent.y_min < PARITY {
        labels.push(QuadrantLabel {
            quadrant: Quadrant::Weakening,
            pos: ChartPos::new(extent.x_max - 0.2, extent.y_min),
        });
    }
    if extent.x_min < PARITY && extent.y_min < PARITY {
        labels.push(QuadrantLabel {
            quadrant: Quadrant::Lagging,
            pos: ChartPos::new(extent.x_min - 0.2, extent.y_min),
        });
    }
    labels
}
