//! The rotation chart itself.
//!
//! Paints quadrant backgrounds, parity lines, axes, and every trail of a
//! [`RenderSnapshot`] into the central panel.

use egui::{pos2, vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};
use rrg_chart::snapshot::QUADRANT_LABEL_ALPHA;
use rrg_chart::{format_coords, ChartTransform, RenderSnapshot, ScreenPos, ScreenRect, TrailView};
use rrg_core::{ChartPos, Quadrant, PARITY};

const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 48.0;

const HEAD_RADIUS: f32 = 5.0;
const TAIL_MARKER_RADIUS: f32 = 3.0;
const AXIS_COLOR: Color32 = Color32::from_rgb(0x40, 0x40, 0x40);
const TEXT_COLOR: Color32 = Color32::BLACK;

/// What the host needs after the chart was drawn.
#[derive(Debug, Clone, Copy)]
pub struct ChartPanelResponse {
    /// Mapping used for this frame.
    pub transform: ChartTransform,
    /// Where the primary button went down on the plot this frame, if it did.
    pub pressed_at: Option<ScreenPos>,
}

/// Draws the chart into the central panel.
pub fn show_chart(ctx: &egui::Context, snapshot: &RenderSnapshot) -> ChartPanelResponse {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(Color32::WHITE))
        .show(ctx, |ui| {
            let full = ui.max_rect();
            let min = full.min + vec2(MARGIN_LEFT, MARGIN_TOP);
            let max = (full.max - vec2(MARGIN_RIGHT, MARGIN_BOTTOM)).max(min + vec2(1.0, 1.0));
            let plot = Rect::from_min_max(min, max);
            let transform = ChartTransform::new(
                snapshot.bounds,
                ScreenRect::new(plot.left(), plot.top(), plot.width(), plot.height()),
            );
            // Windows on top (help) take the press instead
            let response = ui.allocate_rect(plot, egui::Sense::click());
            let pressed_at = if response.hovered() {
                ui.input(|i| {
                    i.pointer
                        .primary_pressed()
                        .then(|| i.pointer.press_origin())
                        .flatten()
                })
                .map(|p| ScreenPos::new(p.x, p.y))
            } else {
                None
            };

            let painter = ui.painter_at(full);

            paint_quadrants(&painter, &transform);
            paint_axes(&painter, &transform, plot, &snapshot.title);
            paint_quadrant_labels(&painter, &transform, snapshot);

            let plot_painter = painter.with_clip_rect(plot);
            for view in &snapshot.trails {
                paint_trail(&plot_painter, &transform, view);
            }
            // Labels go on top of every trail
            for view in &snapshot.trails {
                paint_labels(&plot_painter, &transform, view);
            }

            if let Some(hover) = ctx.input(|i| i.pointer.hover_pos()) {
                if plot.contains(hover) {
                    let at = transform.to_chart(ScreenPos::new(hover.x, hover.y));
                    painter.text(
                        pos2(full.right() - 8.0, full.bottom() - 6.0),
                        Align2::RIGHT_BOTTOM,
                        format_coords(at),
                        FontId::monospace(12.0),
                        AXIS_COLOR,
                    );
                }
            }

            ChartPanelResponse {
                transform,
                pressed_at,
            }
        })
        .inner
}

fn to_pos2(transform: &ChartTransform, pos: ChartPos) -> Pos2 {
    let screen = transform.to_screen(pos);
    pos2(screen.x, screen.y)
}

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// Fill the part of each quadrant that is visible.
fn paint_quadrants(painter: &Painter, transform: &ChartTransform) {
    let b = transform.bounds;
    for &quadrant in Quadrant::all() {
        let (x0, x1) = match quadrant {
            Quadrant::Leading | Quadrant::Weakening => (b.x_min.max(PARITY), b.x_max),
            Quadrant::Lagging | Quadrant::Improving => (b.x_min, b.x_max.min(PARITY)),
        };
        let (y0, y1) = match quadrant {
            Quadrant::Leading | Quadrant::Improving => (b.y_min.max(PARITY), b.y_max),
            Quadrant::Weakening | Quadrant::Lagging => (b.y_min, b.y_max.min(PARITY)),
        };
        if x0 >= x1 || y0 >= y1 {
            continue;
        }

        let rect = Rect::from_two_pos(
            to_pos2(transform, ChartPos::new(x0, y0)),
            to_pos2(transform, ChartPos::new(x1, y1)),
        );
        painter.rect_filled(rect, 0.0, rgb(quadrant.background()));
    }
}

fn paint_axes(painter: &Painter, transform: &ChartTransform, plot: Rect, title: &str) {
    let b = transform.bounds;
    let axis = Stroke::new(1.0, AXIS_COLOR);
    let grid = Stroke::new(1.0, AXIS_COLOR.gamma_multiply(0.15));
    let font = FontId::proportional(11.0);

    // Frame
    for (a, c) in [
        (plot.left_top(), plot.right_top()),
        (plot.right_top(), plot.right_bottom()),
        (plot.right_bottom(), plot.left_bottom()),
        (plot.left_bottom(), plot.left_top()),
    ] {
        painter.line_segment([a, c], axis);
    }

    for x in tick_values(b.x_min, b.x_max, 8) {
        let p = to_pos2(transform, ChartPos::new(x, b.y_min));
        painter.line_segment([pos2(p.x, plot.top()), pos2(p.x, plot.bottom())], grid);
        painter.line_segment([pos2(p.x, plot.bottom()), pos2(p.x, plot.bottom() + 4.0)], axis);
        painter.text(
            pos2(p.x, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            format!("{x:.1}"),
            font.clone(),
            AXIS_COLOR,
        );
    }
    for y in tick_values(b.y_min, b.y_max, 8) {
        let p = to_pos2(transform, ChartPos::new(b.x_min, y));
        painter.line_segment([pos2(plot.left(), p.y), pos2(plot.right(), p.y)], grid);
        painter.line_segment([pos2(plot.left() - 4.0, p.y), pos2(plot.left(), p.y)], axis);
        painter.text(
            pos2(plot.left() - 6.0, p.y),
            Align2::RIGHT_CENTER,
            format!("{y:.1}"),
            font.clone(),
            AXIS_COLOR,
        );
    }

    // Dashed parity lines
    let dashed = Stroke::new(1.0, AXIS_COLOR.gamma_multiply(0.6));
    if b.x_min < PARITY && PARITY < b.x_max {
        let x = to_pos2(transform, ChartPos::new(PARITY, b.y_min)).x;
        let path = [pos2(x, plot.top()), pos2(x, plot.bottom())];
        painter.extend(Shape::dashed_line(&path, dashed, 6.0, 4.0));
    }
    if b.y_min < PARITY && PARITY < b.y_max {
        let y = to_pos2(transform, ChartPos::new(b.x_min, PARITY)).y;
        let path = [pos2(plot.left(), y), pos2(plot.right(), y)];
        painter.extend(Shape::dashed_line(&path, dashed, 6.0, 4.0));
    }

    painter.text(
        pos2(plot.center().x, plot.top() - 12.0),
        Align2::CENTER_BOTTOM,
        title,
        FontId::proportional(16.0),
        TEXT_COLOR,
    );
    painter.text(
        pos2(plot.center().x, plot.bottom() + 24.0),
        Align2::CENTER_TOP,
        "RS Ratio",
        FontId::proportional(13.0),
        TEXT_COLOR,
    );
    painter.text(
        pos2(plot.left() - MARGIN_LEFT + 4.0, plot.top() - 4.0),
        Align2::LEFT_BOTTOM,
        "RS Momentum",
        FontId::proportional(13.0),
        TEXT_COLOR,
    );
}

fn paint_quadrant_labels(painter: &Painter, transform: &ChartTransform, snapshot: &RenderSnapshot) {
    for label in &snapshot.quadrant_labels {
        let align = match label.quadrant {
            Quadrant::Improving => Align2::LEFT_TOP,
            Quadrant::Leading => Align2::RIGHT_TOP,
            Quadrant::Weakening => Align2::RIGHT_BOTTOM,
            Quadrant::Lagging => Align2::LEFT_BOTTOM,
        };
        let color = rgb(label.quadrant.color()).gamma_multiply(QUADRANT_LABEL_ALPHA);
        painter.text(
            to_pos2(transform, label.pos),
            align,
            label.quadrant.label(),
            FontId::proportional(18.0),
            color,
        );
    }
}

fn paint_trail(painter: &Painter, transform: &ChartTransform, view: &TrailView) {
    let color = rgb(view.color);

    if let Some(line) = &view.line {
        let points: Vec<Pos2> = line.iter().map(|&p| to_pos2(transform, p)).collect();
        if points.len() > 1 {
            let width = if view.highlighted { 1.6 } else { 1.2 };
            let stroke = Stroke::new(width, color.gamma_multiply(view.line_alpha));
            painter.add(Shape::line(points, stroke));
        }
    }

    for &marker in &view.tail_markers {
        painter.circle_filled(to_pos2(transform, marker), TAIL_MARKER_RADIUS, color);
    }
    painter.circle_filled(to_pos2(transform, view.head), HEAD_RADIUS, color);
}

fn paint_labels(painter: &Painter, transform: &ChartTransform, view: &TrailView) {
    if view.label_alpha > 0.0 {
        let head = to_pos2(transform, view.head);
        painter.text(
            head + vec2(HEAD_RADIUS + 3.0, 3.0),
            Align2::LEFT_CENTER,
            &view.label,
            FontId::proportional(12.0),
            TEXT_COLOR.gamma_multiply(view.label_alpha),
        );
    }

    if let Some(date) = &view.date_label {
        let anchor = to_pos2(transform, date.pos) + vec2(-(HEAD_RADIUS + 3.0), 3.0);
        let galley =
            painter.layout_no_wrap(date.text.clone(), FontId::proportional(11.0), TEXT_COLOR);
        let rect = Align2::RIGHT_CENTER.anchor_size(anchor, galley.size());
        painter.rect_filled(rect.expand(2.0), 2.0, Color32::WHITE);
        if date.bold {
            // egui fonts have no bold weight, so overstrike
            painter.galley(rect.min + vec2(0.6, 0.0), galley.clone(), TEXT_COLOR);
        }
        painter.galley(rect.min, galley, TEXT_COLOR);
    }
}

/// Evenly spaced round values covering `[min, max]`, about `target` of them.
pub fn tick_values(min: f64, max: f64, target: usize) -> Vec<f64> {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 || target == 0 {
        return Vec::new();
    }

    let raw = range / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n < 1.5 => 1.0,
        n if n < 3.0 => 2.0,
        n if n < 7.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_round_and_inside() {
        let ticks = tick_values(98.7, 101.3, 8);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| (98.7..=101.3).contains(&t)));
        assert!(ticks.iter().any(|&t| (t - 100.0).abs() < 1e-9));

        let steps: Vec<f64> = ticks.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(steps.iter().all(|s| (s - steps[0]).abs() < 1e-9));
    }

    #[test]
    fn test_ticks_scale_with_range() {
        assert_eq!(tick_values(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!(tick_values(0.0, 1000.0, 4).len() <= 6);
    }

    #[test]
    fn test_ticks_degenerate_range() {
        assert!(tick_values(100.0, 100.0, 8).is_empty());
        assert!(tick_values(101.0, 99.0, 8).is_empty());
        assert!(tick_values(f64::NAN, 100.0, 8).is_empty());
    }
}
