//! Graceful shutdown: unmount the scene, deactivate the overlay, drop GPU state.

use super::core::{scene_backend, FolioApp};

// =============================================================================
// SHUTDOWN
// =============================================================================

impl FolioApp {
    /// Perform graceful shutdown of all subsystems. Safe to call again.
    ///
    /// Order matters:
    /// 1. Unmount the scene (its resources live on the GPU backend)
    /// 2. Deactivate the cursor overlay and give the OS cursor back
    /// 3. Release GPU resources
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        // 1. Scene
        if let Some(mut scene) = self.scene.take() {
            let backend = scene_backend(
                &mut self.render_state,
                &mut self.null_backend,
                self.config.scene.enabled,
            );
            scene.unmount(&mut self.platform, backend);
        }

        // 2. Overlay
        if let Some(ref mut overlay) = self.overlay {
            overlay.deactivate(&mut self.platform);
        }
        if let Some(ref w) = self.window {
            w.set_cursor_visible(true);
        }

        // 3. GPU
        self.render_state = None;

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::FolioApp;
    use folio_config::schema::FolioConfig;

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = FolioApp::new(FolioConfig::default());

        app.shutdown();

        assert!(app.scene.is_none());
        assert!(app.overlay.is_none());
        assert!(app.render_state.is_none());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = FolioApp::new(FolioConfig::default());
        app.start();

        app.shutdown();
        app.shutdown();

        assert!(app.scene.is_none());
        assert!(!app.overlay.as_ref().unwrap().is_active());
        assert!(app.render_state.is_none());
    }

    #[test]
    fn shutdown_leaves_no_registrations() {
        let mut app = FolioApp::new(FolioConfig::default());
        app.start();
        assert!(!app.platform.listeners.is_empty());

        app.shutdown();

        assert!(app.platform.listeners.is_empty());
        assert_eq!(app.platform.document.observer_count(), 0);
        assert_eq!(app.platform.frames.pending_count(), 0);
    }
}
