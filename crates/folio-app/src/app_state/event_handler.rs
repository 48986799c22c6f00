//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::Key;
use winit::window::WindowId;

use folio_common::{Point, Size};

use super::core::FolioApp;
use super::pages::Page;

impl ApplicationHandler for FolioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(ref mut rs) = self.render_state {
                        rs.resize(size.width, size.height);
                    }
                    let logical = size.to_logical::<f64>(self.platform.device_pixel_ratio());
                    self.handle_viewport_resize(Size::new(logical.width, logical.height));
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.platform.set_device_pixel_ratio(scale_factor);
                if let Some(ref mut rs) = self.render_state {
                    rs.gpu.scale_factor = scale_factor;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position);
            }

            WindowEvent::CursorEntered { .. } => {
                let dispatches = self.platform.pointer_entered_viewport();
                self.route(&dispatches);
            }

            WindowEvent::CursorLeft { .. } => {
                let dispatches = self.platform.pointer_left_viewport();
                self.route(&dispatches);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.click();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            WindowEvent::RedrawRequested => {
                self.run_frames(self.started.elapsed());
                self.render_frame();
                self.needs_redraw = false;
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.needs_redraw || self.has_pending_frames() {
            if let Some(ref w) = self.window {
                w.request_redraw();
            }
        }
    }
}

impl FolioApp {
    /// Window pixels to logical pixels, then into the platform.
    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f64>(self.platform.device_pixel_ratio());
        let dispatches = self.platform.pointer_moved(Point::new(logical.x, logical.y));
        self.route(&dispatches);
    }

    /// Move page elements first so resize listeners measure the new layout.
    pub(super) fn handle_viewport_resize(&mut self, size: Size) {
        if let Some(nav) = &self.nav {
            if let Err(e) = nav.layout(&mut self.platform.document, size) {
                tracing::debug!("nav layout skipped: {e}");
            }
        }
        if let Some(page) = &self.page {
            if let Err(e) = page.layout(&mut self.platform.document, size) {
                tracing::debug!("page layout skipped: {e}");
            }
        }
        let dispatches = self.platform.resized(size);
        self.route(&dispatches);
    }

    /// Digits 1-6 jump straight to a page.
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if let Key::Character(ref c) = event.logical_key {
            if let Some(page) = Page::from_shortcut(c.as_str()) {
                self.navigate(page);
            }
        }
    }
}
