//! The decorative 3D scene: four tumbling wireframe solids and a particle
//! field, with camera parallax following the pointer.
//!
//! [`SceneRenderer::mount`] runs the init protocol and degrades to
//! [`SceneView::Empty`] (no graphics) or [`SceneView::Fallback`] (init
//! failed). The host routes frame ticks and listener dispatches owned by the
//! scene back into it, and calls [`SceneRenderer::unmount`] exactly when the
//! container leaves the page.

mod camera;
mod particles;
mod renderer;
mod resources;
mod types;

pub use camera::{parallax_target, Camera};
pub use particles::ParticleField;
pub use renderer::{initialize, normalize_pointer, SceneHandle, SceneRenderer};
pub use resources::SceneObject;
pub use types::*;
