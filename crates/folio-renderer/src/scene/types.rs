//! Scene data: fixed solid table, palette, init outcome and settings.

use folio_common::SurfaceId;
use folio_config::schema::FolioConfig;

use super::SceneHandle;
use crate::geometry::GeometryKind;
use crate::gpu::RendererError;
use crate::matrix::Vec3;

/// Outcome of scene initialization. The host picks its render path from
/// this rather than from a caught failure.
#[derive(Debug)]
pub enum SceneInit {
    Ready(SceneHandle),
    /// No 3D capability; render nothing.
    Unavailable,
    /// Construction failed; everything created so far was released.
    Failed(RendererError),
}

/// What the container should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneView {
    /// Nothing (no graphics, or unmounted).
    Empty,
    /// The live scene surface.
    Scene(SurfaceId),
    /// Static gradient placeholder.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    /// Upper bound on the device pixel ratio used for the surface.
    pub max_pixel_ratio: f64,
    /// Particle RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            seed: None,
        }
    }
}

impl SceneSettings {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            max_pixel_ratio: config.performance.max_pixel_ratio,
            seed: None,
        }
    }
}

/// One wireframe solid in the fixed set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidSpec {
    pub kind: GeometryKind,
    pub position: Vec3,
    pub color: u32,
    pub opacity: f32,
    /// Radians added to each Euler axis per frame.
    pub spin: Vec3,
}

pub const SOLIDS: [SolidSpec; 4] = [
    SolidSpec {
        kind: GeometryKind::TorusKnot {
            radius: 4.0,
            tube: 1.2,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        },
        position: [-8.0, 0.0, -10.0],
        color: 0xb026ff,
        opacity: 0.6,
        spin: [0.003, 0.005, 0.0],
    },
    SolidSpec {
        kind: GeometryKind::Icosahedron { radius: 3.0 },
        position: [12.0, 5.0, -15.0],
        color: 0x00d4ff,
        opacity: 0.5,
        spin: [0.004, 0.0, 0.003],
    },
    SolidSpec {
        kind: GeometryKind::Octahedron { radius: 2.5 },
        position: [8.0, -6.0, -12.0],
        color: 0xff26b0,
        opacity: 0.5,
        spin: [0.0, 0.006, 0.004],
    },
    SolidSpec {
        kind: GeometryKind::Dodecahedron { radius: 2.0 },
        position: [-10.0, -5.0, -18.0],
        color: 0x26ff9e,
        opacity: 0.4,
        spin: [0.002, 0.003, 0.0],
    },
];

pub const PARTICLE_COUNT: usize = 500;
/// Side of the cube particles are scattered in, centred on the origin.
pub const PARTICLE_SPREAD: f32 = 80.0;
pub const PARTICLE_SIZE: f32 = 0.15;
pub const PARTICLE_OPACITY: f32 = 0.8;
pub const PARTICLE_SPIN: Vec3 = [0.0002, 0.0005, 0.0];
pub const PALETTE: [u32; 4] = [0xb026ff, 0x00d4ff, 0xff26b0, 0x26ff9e];

/// Camera offset per unit of normalized pointer position.
pub const PARALLAX_GAIN: [f32; 2] = [3.0, 2.0];
/// Fraction of the remaining camera offset covered each frame.
pub const CAMERA_EASE: f32 = 0.02;

/// `0xRRGGBB` to linear 0..1 channels.
pub fn hex_rgb(hex: u32) -> Vec3 {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
