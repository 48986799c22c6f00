//! Graphics backend seam.
//!
//! Scene code talks to a [`GraphicsBackend`] and never to wgpu directly, so
//! the "no graphics" environment and lifecycle tests are ordinary backend
//! implementations.

mod null;
#[cfg(test)]
pub(crate) mod recording;
pub mod offscreen;

pub use self::null::NullBackend;
pub use self::offscreen::WgpuBackend;

use folio_common::SurfaceId;

use crate::gpu::RendererError;
use crate::matrix::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

/// Offscreen render target size in physical pixels. Always cleared to
/// transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
}

/// Clamp a requested target size to at least 1x1 and reject anything past
/// the device's `max_dimension`.
pub fn checked_surface_size(width: u32, height: u32, max_dimension: u32) -> Result<(u32, u32), RendererError> {
    let (width, height) = (width.max(1), height.max(1));
    if width > max_dimension || height > max_dimension {
        return Err(RendererError::SurfaceError(format!(
            "{width}x{height} exceeds the {max_dimension}px texture limit"
        )));
    }
    Ok((width, height))
}

/// Vertex data uploaded once and drawn every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryData {
    /// Line-list indices into `positions`.
    Lines { positions: Vec<Vec3>, indices: Vec<u32> },
    /// One point per position with a per-point colour.
    Points { positions: Vec<Vec3>, colors: Vec<Vec3> },
}

impl GeometryData {
    /// Check index bounds and attribute lengths.
    pub fn validate(&self) -> Result<(), RendererError> {
        match self {
            GeometryData::Lines { positions, indices } => {
                if indices.len() % 2 != 0 {
                    return Err(RendererError::InvalidGeometry(format!(
                        "line list has odd index count {}",
                        indices.len()
                    )));
                }
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                    return Err(RendererError::InvalidGeometry(format!(
                        "index {bad} out of range for {} positions",
                        positions.len()
                    )));
                }
            }
            GeometryData::Points { positions, colors } => {
                if positions.len() != colors.len() {
                    return Err(RendererError::InvalidGeometry(format!(
                        "{} positions but {} colors",
                        positions.len(),
                        colors.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Unlit wireframe lines.
    Wire { color: Vec3, opacity: f32 },
    /// Camera-facing squares `size` world units across.
    Points { size: f32, opacity: f32, blending: Blending },
}

/// One object to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub model: Mat4,
}

/// Everything needed to draw one frame into a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDesc {
    pub view: Mat4,
    pub projection: Mat4,
    pub draws: Vec<DrawCall>,
}

/// Live resource counts, used for leak checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceCounts {
    pub surfaces: usize,
    pub geometries: usize,
    pub materials: usize,
}

impl ResourceCounts {
    pub fn total(&self) -> usize {
        self.surfaces + self.geometries + self.materials
    }
}

/// A 3D rendering implementation.
///
/// Every `create_*` has a matching `release_*`; releasing an unknown id is
/// an error but leaves the backend usable.
pub trait GraphicsBackend {
    /// Whether a 3D context can be obtained at all. Must not leave any
    /// resource behind.
    fn probe(&mut self) -> bool;

    fn create_surface(&mut self, desc: SurfaceDesc) -> Result<SurfaceId, RendererError>;

    fn resize_surface(&mut self, surface: SurfaceId, width: u32, height: u32) -> Result<(), RendererError>;

    fn create_geometry(&mut self, data: &GeometryData) -> Result<GeometryId, RendererError>;

    fn create_material(&mut self, material: &Material) -> Result<MaterialId, RendererError>;

    /// Clear `surface` to transparent and draw `frame` into it.
    fn render(&mut self, surface: SurfaceId, frame: &FrameDesc) -> Result<(), RendererError>;

    fn release_geometry(&mut self, geometry: GeometryId) -> Result<(), RendererError>;

    fn release_material(&mut self, material: MaterialId) -> Result<(), RendererError>;

    fn release_surface(&mut self, surface: SurfaceId) -> Result<(), RendererError>;

    fn live_resources(&self) -> ResourceCounts;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_line_list_is_invalid() {
        let data = GeometryData::Lines {
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 2],
        };
        assert!(matches!(data.validate(), Err(RendererError::InvalidGeometry(_))));
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let data = GeometryData::Lines {
            positions: vec![[0.0; 3]; 2],
            indices: vec![0, 2],
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn point_colors_must_match_positions() {
        let data = GeometryData::Points {
            positions: vec![[0.0; 3]; 2],
            colors: vec![[1.0; 3]],
        };
        assert!(data.validate().is_err());

        let ok = GeometryData::Points {
            positions: vec![[0.0; 3]; 2],
            colors: vec![[1.0; 3]; 2],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn surface_size_is_clamped_and_limited() {
        assert_eq!(checked_surface_size(0, 0, 8192).unwrap(), (1, 1));
        assert_eq!(checked_surface_size(8192, 600, 8192).unwrap(), (8192, 600));
        assert!(matches!(
            checked_surface_size(8193, 600, 8192),
            Err(RendererError::SurfaceError(_))
        ));
        assert!(checked_surface_size(100, 9000, 8192).is_err());
    }

    #[test]
    fn resource_counts_total() {
        let counts = ResourceCounts {
            surfaces: 1,
            geometries: 5,
            materials: 5,
        };
        assert_eq!(counts.total(), 11);
        assert_eq!(ResourceCounts::default().total(), 0);
    }
}
