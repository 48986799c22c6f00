//! Routing of listener dispatches, structural mutations and frame ticks
//! to the component that registered them.

use std::time::Duration;

use folio_common::FolioError;
use folio_platform::{deliver, Dispatch};
use tracing::debug;

use super::core::{scene_backend, FolioApp};

impl FolioApp {
    /// Hand each dispatch to its owner. A failing handler is logged and
    /// the rest still run.
    pub(super) fn route(&mut self, dispatches: &[Dispatch]) {
        if dispatches.is_empty() {
            return;
        }
        let backend = scene_backend(
            &mut self.render_state,
            &mut self.null_backend,
            self.config.scene.enabled,
        );
        let platform = &mut self.platform;
        let scene = &mut self.scene;
        let overlay = &mut self.overlay;

        deliver(dispatches, |dispatch: &Dispatch| -> Result<(), FolioError> {
            if let Some(scene) = scene.as_mut().filter(|s| s.owner() == Some(dispatch.owner)) {
                return scene
                    .handle_event(platform, backend, dispatch)
                    .map_err(FolioError::from);
            }
            if let Some(overlay) = overlay.as_mut().filter(|o| o.owner() == dispatch.owner) {
                return overlay
                    .handle_event(platform, dispatch)
                    .map_err(FolioError::from);
            }
            Ok(())
        });
        self.needs_redraw = true;
    }

    /// Forward pending structural-change records to the overlay.
    pub(super) fn route_mutations(&mut self) {
        let batches = self.platform.take_mutations();
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        for batch in &batches {
            if let Err(e) = overlay.handle_mutations(&mut self.platform, batch) {
                debug!(error = %e, "mutation batch not applied");
            }
        }
    }

    /// Run every frame callback due at `now`.
    pub(super) fn run_frames(&mut self, now: Duration) {
        let ticks = self.platform.frames.take_due(now);
        if ticks.is_empty() {
            return;
        }
        let backend = scene_backend(
            &mut self.render_state,
            &mut self.null_backend,
            self.config.scene.enabled,
        );

        for tick in &ticks {
            if let Some(scene) = self.scene.as_mut().filter(|s| s.owner() == Some(tick.owner)) {
                scene.handle_frame(&mut self.platform, backend, tick);
            } else if let Some(overlay) = self.overlay.as_mut().filter(|o| o.owner() == tick.owner) {
                overlay.handle_frame(&mut self.platform, tick);
            }
        }
        self.needs_redraw = true;
    }

    /// Whether anything asked for another frame.
    pub(super) fn has_pending_frames(&self) -> bool {
        self.platform.frames.pending_count() > 0
    }
}
