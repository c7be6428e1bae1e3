// ui/overlay.rs - Selection Overlay Window
//
// A frameless, transparent, always-on-top window covering the primary
// monitor. It runs its own event loop until the user has dragged out one
// rectangle (or dismissed the overlay), then hides, tears itself down and
// stops the loop.
//
// The window is sized to the monitor instead of going native fullscreen:
// on macOS a fullscreen window gets its own Space and the desktop behind
// it shows up black.

use std::sync::Arc;

use anyhow::Context;
use log::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId, WindowLevel};

use super::selection::RegionSelection;
use crate::capture::{CaptureRect, Point};
use crate::constants::overlay;
use crate::error::CaptureError;
use crate::renderer::SelectionRenderer;

/// Show the overlay and wait for the user's rectangle.
///
/// Returns the selection in logical coordinates relative to the primary
/// monitor. An empty rectangle means "no selection": the user clicked
/// without dragging, pressed Escape or closed the overlay.
pub fn pick_region() -> Result<CaptureRect, CaptureError> {
    let event_loop = EventLoop::new().map_err(|e| CaptureError::Overlay(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = RegionSelectorApp::new();
    event_loop
        .run_app(&mut app)
        .map_err(|e| CaptureError::Overlay(e.to_string()))?;

    if let Some(failure) = app.failure {
        return Err(CaptureError::Overlay(failure));
    }

    // The loop can also end without an emission (window destroyed by the
    // system); treat that like a dismissal.
    Ok(app.picked.unwrap_or_default())
}

/// Event loop state for one selection
struct RegionSelectorApp {
    selection: RegionSelection,
    window: Option<Arc<Window>>,
    renderer: Option<SelectionRenderer>,
    picked: Option<CaptureRect>,
    failure: Option<String>,
}

impl RegionSelectorApp {
    fn new() -> Self {
        Self {
            selection: RegionSelection::new(),
            window: None,
            renderer: None,
            picked: None,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (position, size) = match event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        {
            Some(monitor) => (monitor.position(), monitor.size()),
            None => (
                PhysicalPosition::new(0, 0),
                PhysicalSize::new(overlay::FALLBACK_WIDTH, overlay::FALLBACK_HEIGHT),
            ),
        };

        let attributes = WindowAttributes::default()
            .with_title(overlay::TITLE)
            .with_position(position)
            .with_inner_size(size)
            .with_resizable(false)
            .with_decorations(false)
            .with_transparent(true)
            .with_window_level(WindowLevel::AlwaysOnTop);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create overlay window")?,
        );
        window.set_cursor(CursorIcon::Crosshair);
        info!(
            "Overlay window created at {:?}, {}x{} (scale {})",
            position,
            size.width,
            size.height,
            window.scale_factor()
        );

        let renderer = SelectionRenderer::new(window.clone())?;
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Hide the overlay, hand over the rectangle and stop the loop
    fn finish(&mut self, event_loop: &ActiveEventLoop, rect: CaptureRect) {
        if let Some(window) = &self.window {
            window.set_visible(false);
        }
        info!("Region picked: {:?}", rect);
        self.picked = Some(rect);

        self.selection.close();
        self.renderer = None;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("Region selector failed: {:#}", err);
        self.failure = Some(format!("{err:#}"));
        self.selection.close();
        self.renderer = None;
        self.window = None;
        event_loop.exit();
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        let logical = position.to_logical::<f64>(scale);
        Point::new(logical.x.round() as i32, logical.y.round() as i32)
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for RegionSelectorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.picked.is_some() || self.failure.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(rect) = self.selection.cancel() {
                    info!("Overlay closed without a selection");
                    self.finish(event_loop, rect);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    if let Some(rect) = self.selection.cancel() {
                        info!("ESC pressed, using full screen");
                        self.finish(event_loop, rect);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let to = self.to_logical(position);
                if self.selection.pointer_moved(to) {
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.selection.pointer_pressed() {
                        debug!("Drag started at {:?}", self.selection.pointer());
                        self.request_redraw();
                    } else {
                        debug!("Press ignored, pointer position not known yet");
                    }
                }
                ElementState::Released => {
                    if let Some(rect) = self.selection.pointer_released() {
                        self.finish(event_loop, rect);
                    }
                }
            },

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let preview = self.selection.preview();
                let drawn = match &mut self.renderer {
                    Some(renderer) => renderer.render(preview),
                    None => Ok(()),
                };
                if let Err(e) = drawn {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}
