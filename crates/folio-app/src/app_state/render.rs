//! Frame composition and rendering.

use folio_common::Rect;
use folio_renderer::{Composition, QuadInstance, RendererError, SceneView};

use super::core::FolioApp;
use super::pages::Page;

const LINK_ALPHA: f32 = 0.10;
const LINK_HOVER_ALPHA: f32 = 0.30;
const CARD_ALPHA: f32 = 0.06;
const CARD_HOVER_ALPHA: f32 = 0.16;

impl FolioApp {
    /// Everything the window shows this frame, in logical px.
    pub(super) fn compose(&self) -> Composition {
        let palette = self.palette;
        let document = &self.platform.document;
        let mut composition = Composition::new(palette.background);

        // Scene surfaces sit underneath the page chrome.
        for (_, surface, rect) in document.surfaces() {
            composition.surfaces.push((surface, rect));
        }

        if let (Some(scene), Some(hero)) = (&self.scene, self.page.as_ref().and_then(|p| p.hero)) {
            if scene.view() == SceneView::Fallback {
                if let Ok(element) = document.get(hero) {
                    composition.push_fallback(element.rect, palette.primary, palette.accent);
                }
            }
        }

        if let Some(nav) = &self.nav {
            if let Ok(bar) = document.get(nav.root) {
                composition.push(QuadInstance::rect(bar.rect, palette.background.to_rgba_f32(0.85)));
            }
            for (page, id) in &nav.links {
                let Ok(link) = document.get(*id) else { continue };
                let alpha = if self.current_page() == Some(*page) || self.platform.is_hovered(*id) {
                    LINK_HOVER_ALPHA
                } else {
                    LINK_ALPHA
                };
                composition.push(QuadInstance::rect(link.rect, palette.primary.to_rgba_f32(alpha)));
            }
        }

        if let Some(view) = &self.page {
            for (i, id) in view.buttons.iter().enumerate() {
                let Ok(button) = document.get(*id) else { continue };
                let color = if i == 0 { palette.primary } else { palette.accent };
                let alpha = if self.platform.is_hovered(*id) { 0.9 } else { 0.6 };
                composition.push(QuadInstance::rect(button.rect, color.to_rgba_f32(alpha)));
            }
            for id in &view.cards {
                let Ok(card) = document.get(*id) else { continue };
                let alpha = if self.platform.is_hovered(*id) {
                    CARD_HOVER_ALPHA
                } else {
                    CARD_ALPHA
                };
                composition.push(QuadInstance::rect(card.rect, palette.accent.to_rgba_f32(alpha)));
            }
            if view.page != Page::Home {
                if let Some(title) = view.title.and_then(|id| document.get(id).ok()) {
                    let underline = Rect::new(
                        title.rect.x,
                        title.rect.y + title.rect.height - 2.0,
                        title.rect.width.min(120.0),
                        2.0,
                    );
                    composition.push(QuadInstance::gradient(
                        underline,
                        palette.primary.to_rgba_f32(1.0),
                        palette.accent.to_rgba_f32(1.0),
                    ));
                }
            }
        }

        // Cursor last so it draws over everything.
        if let Some(layers) = self.overlay.as_ref().and_then(|o| o.layers()) {
            composition.push_cursor(&layers, palette.primary);
        }

        composition
    }

    /// Render a single frame.
    pub(super) fn render_frame(&mut self) {
        let composition = self.compose();
        if let Some(ref mut rs) = self.render_state {
            if let Err(e) = rs.render(&composition) {
                tracing::error!("Render error: {e}");
                if matches!(e, RendererError::SurfaceError(_)) {
                    rs.gpu.reconfigure();
                }
            }
        }
    }
}
