pub mod backend;
pub mod cursor;
pub mod geometry;
pub mod gpu;
pub mod matrix;
pub mod motion;
pub mod quad;
pub mod render_state;
pub mod scene;

pub use backend::{GraphicsBackend, NullBackend, ResourceCounts, WgpuBackend};
pub use cursor::{CursorLayer, LayerKind, OverlaySettings, PointerOverlay};
pub use gpu::{GpuContext, RendererError};
pub use quad::{QuadInstance, QuadRenderer, QuadShape};
pub use render_state::{Composition, RenderState};
pub use scene::{SceneInit, SceneRenderer, SceneSettings, SceneView};
