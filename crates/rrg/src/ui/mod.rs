//! egui panels for the chart window.
//!
//! Each function draws from a `RenderSnapshot` and returns what the state
//! needs back. None of them touch the session directly.

mod chart_panel;
mod help_overlay;

pub use chart_panel::{show_chart, ChartPanelResponse};
pub use help_overlay::show_help_overlay;
