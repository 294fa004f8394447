//! Input handling for the rrg viewer.
//!
//! Converts raw key codes and pointer presses into [`ChartEvent`]s. The
//! session state machine never sees winit or egui types.

use rrg_chart::{ChartEvent, ChartKey, ChartTransform, ScreenPos};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Click distance, in logical pixels, that still selects a marker.
    pub hit_radius_px: f32,
}

impl InputHandler {
    #[must_use]
    pub fn new(hit_radius_px: f32) -> Self {
        Self { hit_radius_px }
    }

    /// Handle a keyboard event.
    ///
    /// Returns `None` for releases and for keys the chart ignores.
    #[must_use]
    pub fn handle_key(&self, code: KeyCode, is_pressed: bool) -> Option<ChartEvent> {
        if !is_pressed {
            return None;
        }

        let key = match code {
            KeyCode::ArrowLeft => ChartKey::Left,
            KeyCode::ArrowRight => ChartKey::Right,
            KeyCode::Delete | KeyCode::Backspace => ChartKey::Delete,
            KeyCode::KeyT => ChartKey::ToggleTails,
            KeyCode::KeyA => ChartKey::ToggleAnnotations,
            KeyCode::KeyH => ChartKey::ToggleHelp,
            KeyCode::KeyR => ChartKey::Reset,
            KeyCode::KeyQ | KeyCode::Escape => ChartKey::Quit,
            _ => return None,
        };
        Some(ChartEvent::Key(key))
    }

    /// Turn a primary-button press at `pos` into a chart click.
    ///
    /// Presses outside the plot area are ignored.
    #[must_use]
    pub fn handle_press(&self, pos: ScreenPos, transform: &ChartTransform) -> Option<ChartEvent> {
        if !transform.rect.contains(pos) {
            return None;
        }

        Some(ChartEvent::Click {
            at: transform.to_chart(pos),
            radius: transform.hit_radius(self.hit_radius_px),
        })
    }
}

#[cfg(test)]
mod tests {
    use rrg_chart::{ChartBounds, ScreenRect};

    use super::*;

    fn key(handler: &InputHandler, code: KeyCode) -> Option<ChartKey> {
        match handler.handle_key(code, true) {
            Some(ChartEvent::Key(key)) => Some(key),
            _ => None,
        }
    }

    #[test]
    fn test_key_handling() {
        let handler = InputHandler::new(8.0);

        assert_eq!(key(&handler, KeyCode::ArrowLeft), Some(ChartKey::Left));
        assert_eq!(key(&handler, KeyCode::ArrowRight), Some(ChartKey::Right));
        assert_eq!(key(&handler, KeyCode::KeyT), Some(ChartKey::ToggleTails));
        assert_eq!(key(&handler, KeyCode::KeyA), Some(ChartKey::ToggleAnnotations));
        assert_eq!(key(&handler, KeyCode::KeyH), Some(ChartKey::ToggleHelp));
        assert_eq!(key(&handler, KeyCode::KeyR), Some(ChartKey::Reset));

        // Key release should return None
        assert_eq!(handler.handle_key(KeyCode::KeyT, false), None);

        // Unknown key should return None
        assert_eq!(handler.handle_key(KeyCode::KeyZ, true), None);
    }

    #[test]
    fn test_delete_and_quit_aliases() {
        let handler = InputHandler::new(8.0);

        assert_eq!(key(&handler, KeyCode::Delete), Some(ChartKey::Delete));
        assert_eq!(key(&handler, KeyCode::Backspace), Some(ChartKey::Delete));
        assert_eq!(key(&handler, KeyCode::KeyQ), Some(ChartKey::Quit));
        assert_eq!(key(&handler, KeyCode::Escape), Some(ChartKey::Quit));
    }

    #[test]
    fn test_press_converts_to_chart_space() {
        let handler = InputHandler::new(10.0);
        // 2 chart units over 200 px on both axes
        let transform = ChartTransform::new(
            ChartBounds::new(99.0, 101.0, 99.0, 101.0),
            ScreenRect::new(50.0, 20.0, 200.0, 200.0),
        );

        let Some(ChartEvent::Click { at, radius }) =
            handler.handle_press(ScreenPos::new(150.0, 120.0), &transform)
        else {
            panic!("press inside the plot should click");
        };
        assert!((at.x - 100.0).abs() < 1e-9);
        assert!((at.y - 100.0).abs() < 1e-9);
        assert!((radius.x - 0.1).abs() < 1e-9);
        assert!((radius.y - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_press_outside_plot_is_ignored() {
        let handler = InputHandler::new(8.0);
        let transform = ChartTransform::new(
            ChartBounds::default(),
            ScreenRect::new(50.0, 20.0, 200.0, 200.0),
        );

        assert!(handler.handle_press(ScreenPos::new(10.0, 10.0), &transform).is_none());
    }
}
