//! Application handler for winit events.

use std::sync::Arc;

use rrg_chart::{Outcome, ToggleFlags};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

use crate::state::{DocumentState, State};

const INITIAL_SIZE: LogicalSize<f64> = LogicalSize::new(1200.0, 800.0);

pub struct App {
    /// Chart waiting for the window, taken on the first `resumed`.
    pending: Option<DocumentState>,
    defaults: ToggleFlags,
    hit_radius_px: f32,
    state: Option<State>,
}

impl App {
    pub fn new(document: DocumentState, defaults: ToggleFlags, hit_radius_px: f32) -> Self {
        Self {
            pending: Some(document),
            defaults,
            hit_radius_px,
            state: None,
        }
    }

    fn create_state(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(document) = self.pending.take() else {
            return Ok(());
        };

        let window_attributes = Window::default_attributes()
            .with_title(document.title.clone())
            .with_inner_size(INITIAL_SIZE);
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let state = pollster::block_on(State::new(
            window,
            document,
            self.defaults,
            self.hit_radius_px,
        ))?;
        state.window.request_redraw();
        self.state = Some(state);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.create_state(event_loop) {
            log::error!("Unable to open chart window: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // Let egui handle the event first. Pointer input always reaches egui,
        // the chart panel reports presses on the plot when it is drawn.
        let egui_response = state.ui.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint && !matches!(event, WindowEvent::RedrawRequested) {
            state.window.request_redraw();
        }
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size.width, size.height);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => state.handle_key(code, key_state.is_pressed()),
            _ => {}
        }

        match state.process_events() {
            Outcome::Quit => event_loop.exit(),
            outcome if outcome.needs_redraw() => state.window.request_redraw(),
            _ => {}
        }
    }
}
