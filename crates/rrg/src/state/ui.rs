//! UI framework state.

use winit::window::Window;

/// Owns the egui context and its winit and wgpu halves.
pub struct UiState {
    pub egui_ctx: egui::Context,
    /// The egui-winit state for input handling.
    pub egui_state: egui_winit::State,
    /// The egui-wgpu renderer for GPU rendering.
    pub egui_renderer: egui_wgpu::Renderer,
}

impl UiState {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }
}
