//! Keyboard and mouse help window.

/// Shows the help text centered over the chart.
///
/// Does nothing when the snapshot has no help text.
pub fn show_help_overlay(ctx: &egui::Context, help: Option<&str>) {
    let Some(text) = help else {
        return;
    };

    egui::Window::new("Help")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(text).monospace());
            ui.add_space(6.0);
        });
}
