//! Window creation and renderer initialization.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use folio_common::Size;
use folio_renderer::RenderState;

use super::core::FolioApp;

impl FolioApp {
    /// Create the window and initialize the GPU renderer.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.window.width),
                f64::from(self.config.window.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        match pollster::block_on(RenderState::new(window.clone())) {
            Ok(rs) => self.render_state = Some(rs),
            Err(e) => {
                tracing::error!("Failed to initialize renderer: {e}");
                return false;
            }
        }

        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale);
        self.platform.set_device_pixel_ratio(scale);
        let dispatches = self
            .platform
            .resized(Size::new(logical.width, logical.height));
        self.route(&dispatches);

        self.window = Some(window);
        self.start();

        let overlay_active = self.overlay.as_ref().is_some_and(|o| o.is_active());
        if let Some(ref w) = self.window {
            w.set_cursor_visible(!overlay_active);
        }

        tracing::info!(
            scale,
            width = logical.width,
            height = logical.height,
            "Window created and renderer initialized"
        );
        true
    }
}
