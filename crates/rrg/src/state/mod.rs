//! Window state for the chart viewer.
//!
//! - `graphics` - wgpu surface and device
//! - `ui` - egui context and renderer
//! - `document` - the computed trails and their curves
//!
//! Key presses arrive through winit callbacks and pointer presses through
//! the egui chart panel. Both are queued on an [`EventBus`] as chart events
//! and applied to the [`SessionState`] in order. Each frame is drawn from a
//! fresh [`RenderSnapshot`].

mod document;
mod graphics;
mod ui;

use std::sync::Arc;

use rrg_chart::{EventBus, Outcome, RenderSnapshot, SessionState, ToggleFlags};
use winit::{keyboard::KeyCode, window::Window};

pub use document::DocumentState;
use graphics::GraphicsState;
use ui::UiState;

use crate::input::InputHandler;
use crate::ui::{show_chart, show_help_overlay, ChartPanelResponse};

pub struct State {
    pub window: Arc<Window>,
    pub graphics: GraphicsState,
    pub ui: UiState,
    pub document: DocumentState,
    pub session: SessionState,
    bus: EventBus,
    input: InputHandler,
}

impl State {
    pub async fn new(
        window: Arc<Window>,
        document: DocumentState,
        defaults: ToggleFlags,
        hit_radius_px: f32,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let mut graphics = GraphicsState::new(window.clone()).await?;
        graphics.resize(size.width, size.height);

        let ui = UiState::new(&window, &graphics.device, graphics.surface_format());
        let session = SessionState::new(document.trails.len(), defaults);

        Ok(Self {
            window,
            graphics,
            ui,
            document,
            session,
            bus: EventBus::new(),
            input: InputHandler::new(hit_radius_px),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.graphics.resize(width, height);
    }

    pub fn handle_key(&mut self, code: KeyCode, is_pressed: bool) {
        if let Some(event) = self.input.handle_key(code, is_pressed) {
            self.bus.emit(event);
        }
    }

    /// Apply every queued event to the session, oldest first.
    pub fn process_events(&mut self) -> Outcome {
        let mut outcome = Outcome::Unchanged;
        while let Some(event) = self.bus.next_event() {
            let (session, result) = self.session.clone().apply(&event, &self.document.trails);
            self.session = session;
            if result == Outcome::Reset {
                log::debug!("Chart reset");
            }
            outcome = outcome.merge(result);
        }
        outcome
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.graphics.is_surface_configured {
            return Ok(());
        }

        let output = self.graphics.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let snapshot = RenderSnapshot::build(
            self.document.title.as_str(),
            &self.document.trails,
            &self.document.curves,
            &self.session,
        );

        let mut panel: Option<ChartPanelResponse> = None;
        let raw_input = self.ui.egui_state.take_egui_input(&self.window);
        let full_output = self.ui.egui_ctx.run(raw_input, |ctx| {
            show_help_overlay(ctx, snapshot.help);
            panel = Some(show_chart(ctx, &snapshot));
        });

        // Clicks are applied by the caller, after this frame is presented
        if let Some(ChartPanelResponse {
            transform,
            pressed_at: Some(pos),
        }) = panel
        {
            if let Some(event) = self.input.handle_press(pos, &transform) {
                self.bus.emit(event);
            }
        }

        self.ui
            .egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .ui
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.graphics.dimensions();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.ui
                .egui_renderer
                .update_texture(&self.graphics.device, &self.graphics.queue, *id, image_delta);
        }

        let mut encoder = self
            .graphics
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Chart Encoder"),
            });

        self.ui.egui_renderer.update_buffers(
            &self.graphics.device,
            &self.graphics.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Chart Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(graphics::CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.ui
                .egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.ui.egui_renderer.free_texture(id);
        }

        self.graphics.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
