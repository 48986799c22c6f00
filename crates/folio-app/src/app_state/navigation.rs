//! Client-side navigation between pages.

use tracing::{debug, info, warn};

use folio_renderer::{PointerOverlay, SceneRenderer};

use super::core::{scene_backend, FolioApp};
use super::pages::{link_target, NavView, Page, PageView};

impl FolioApp {
    /// Build the nav bar and home page, then activate the cursor overlay.
    pub(super) fn start(&mut self) {
        if self.nav.is_none() {
            match NavView::build(&mut self.platform) {
                Ok(nav) => self.nav = Some(nav),
                Err(e) => warn!("Failed to build nav bar: {e}"),
            }
        }

        self.navigate(Page::Home);

        if self.config.cursor.enabled && self.overlay.is_none() {
            match PointerOverlay::activate(&mut self.platform, self.overlay_settings) {
                Ok(overlay) => self.overlay = Some(overlay),
                Err(e) => warn!("Cursor overlay not activated: {e}"),
            }
        }
    }

    pub(super) fn current_page(&self) -> Option<Page> {
        self.page.as_ref().map(|view| view.page)
    }

    /// Swap the page subtree. Leaving home unmounts the scene; entering
    /// home mounts a fresh one.
    pub(super) fn navigate(&mut self, page: Page) {
        if self.current_page() == Some(page) {
            return;
        }

        let backend = scene_backend(
            &mut self.render_state,
            &mut self.null_backend,
            self.config.scene.enabled,
        );

        if let Some(mut scene) = self.scene.take() {
            scene.unmount(&mut self.platform, backend);
        }
        if let Some(old) = self.page.take() {
            if let Err(e) = self.platform.remove_element(old.root) {
                debug!("old page already gone: {e}");
            }
        }

        match PageView::build(&mut self.platform, page) {
            Ok(view) => {
                if let Some(hero) = view.hero {
                    self.scene = Some(SceneRenderer::mount(
                        &mut self.platform,
                        backend,
                        hero,
                        self.scene_settings,
                    ));
                }
                self.page = Some(view);
            }
            Err(e) => warn!("Failed to build {} page: {e}", page.label()),
        }
        info!(page = page.label(), "navigated");

        self.route_mutations();

        // Hover follows the new layout under a stationary pointer.
        if let Some(position) = self.platform.pointer_position() {
            let dispatches = self.platform.pointer_moved(position);
            self.route(&dispatches);
        }
        self.request_redraw();
    }

    /// Navigate to whatever link lies under the pointer.
    pub(super) fn click(&mut self) {
        let Some(position) = self.platform.pointer_position() else {
            return;
        };
        let target = self
            .platform
            .document
            .hit_test(position)
            .and_then(|hit| link_target(&self.platform.document, hit));
        if let Some(page) = target {
            self.navigate(page);
        }
    }
}
