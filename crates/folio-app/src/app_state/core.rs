//! FolioApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use folio_common::{Color, Size};
use folio_config::schema::{ColorConfig, FolioConfig, PointerMode};
use folio_platform::{Platform, PointerCapability};
use folio_renderer::{
    GraphicsBackend, NullBackend, OverlaySettings, PointerOverlay, RenderState, SceneRenderer,
    SceneSettings,
};

use super::pages::{NavView, PageView};

/// Resolved page colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Palette {
    pub background: Color,
    pub primary: Color,
    pub accent: Color,
}

impl Palette {
    /// Parse the configured hex colours. Validation has already rejected
    /// malformed values in a loaded file; defaults cover the rest.
    pub fn from_config(colors: &ColorConfig) -> Self {
        let defaults = ColorConfig::default();
        let parse = |value: &str, fallback: &str| {
            Color::from_hex(value)
                .or_else(|| Color::from_hex(fallback))
                .unwrap_or(Color::from_rgba(0, 0, 0, 255))
        };
        Self {
            background: parse(&colors.background, &defaults.background),
            primary: parse(&colors.primary, &defaults.primary),
            accent: parse(&colors.accent, &defaults.accent),
        }
    }
}

/// Top-level application state.
pub struct FolioApp {
    pub(super) config: FolioConfig,
    pub(super) palette: Palette,
    pub(super) scene_settings: SceneSettings,
    pub(super) overlay_settings: OverlaySettings,

    // Host model
    pub(super) platform: Platform,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) render_state: Option<RenderState>,
    /// Scene backend when 3D is disabled or no window exists yet.
    pub(super) null_backend: NullBackend,

    // Page layer
    pub(super) nav: Option<NavView>,
    pub(super) page: Option<PageView>,

    // Components
    pub(super) scene: Option<SceneRenderer>,
    pub(super) overlay: Option<PointerOverlay>,

    pub(super) started: Instant,
    pub(super) needs_redraw: bool,
}

impl FolioApp {
    pub fn new(config: FolioConfig) -> Self {
        let viewport = Size::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        );
        let platform = Platform::new(viewport, 1.0, pointer_capability(config.cursor.pointer));

        Self {
            palette: Palette::from_config(&config.colors),
            scene_settings: SceneSettings::from_config(&config),
            overlay_settings: OverlaySettings::from_config(&config.cursor),
            platform,
            window: None,
            render_state: None,
            null_backend: NullBackend::new(),
            nav: None,
            page: None,
            scene: None,
            overlay: None,
            started: Instant::now(),
            needs_redraw: false,
            config,
        }
    }

    pub(super) fn request_redraw(&mut self) {
        self.needs_redraw = true;
        if let Some(ref w) = self.window {
            w.request_redraw();
        }
    }
}

pub(super) fn pointer_capability(mode: PointerMode) -> PointerCapability {
    match mode {
        PointerMode::Auto => PointerCapability::detect(),
        PointerMode::Fine => PointerCapability::Fine,
        PointerMode::Coarse => PointerCapability::Coarse,
    }
}

/// The backend scenes are built on: the window's wgpu backend when 3D is
/// enabled and a window exists, the null backend otherwise.
pub(super) fn scene_backend<'a>(
    render_state: &'a mut Option<RenderState>,
    null: &'a mut NullBackend,
    enabled: bool,
) -> &'a mut dyn GraphicsBackend {
    if enabled {
        if let Some(rs) = render_state {
            return &mut rs.backend;
        }
    }
    null
}
