//! Null backend: the "no graphics" environment.
//!
//! Probing fails and nothing can be created, so a scene mounted on it
//! never gets past the capability check.

use folio_common::SurfaceId;

use super::{
    FrameDesc, GeometryData, GeometryId, GraphicsBackend, Material, MaterialId, ResourceCounts,
    SurfaceDesc,
};
use crate::gpu::RendererError;

#[derive(Debug, Default)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

impl GraphicsBackend for NullBackend {
    fn probe(&mut self) -> bool {
        false
    }

    fn create_surface(&mut self, _desc: SurfaceDesc) -> Result<SurfaceId, RendererError> {
        Err(RendererError::Unavailable)
    }

    fn resize_surface(&mut self, _surface: SurfaceId, _width: u32, _height: u32) -> Result<(), RendererError> {
        Err(RendererError::Unavailable)
    }

    fn create_geometry(&mut self, _data: &GeometryData) -> Result<GeometryId, RendererError> {
        Err(RendererError::Unavailable)
    }

    fn create_material(&mut self, _material: &Material) -> Result<MaterialId, RendererError> {
        Err(RendererError::Unavailable)
    }

    fn render(&mut self, _surface: SurfaceId, _frame: &FrameDesc) -> Result<(), RendererError> {
        Err(RendererError::Unavailable)
    }

    fn release_geometry(&mut self, _geometry: GeometryId) -> Result<(), RendererError> {
        Err(RendererError::Unavailable)
    }

    fn release_material(&mut self, _material: MaterialId) -> Result<(), RendererError> {
        Err(RendererError::Unavailable)
    }

    fn release_surface(&mut self, _surface: SurfaceId) -> Result<(), RendererError> {
        Err(RendererError::Unavailable)
    }

    fn live_resources(&self) -> ResourceCounts {
        ResourceCounts::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_backend_cannot_probe_or_create() {
        let mut backend = NullBackend::new();
        assert!(!backend.probe());
        let err = backend
            .create_surface(SurfaceDesc {
                width: 1,
                height: 1,
            })
            .unwrap_err();
        assert!(matches!(err, RendererError::Unavailable));
        assert_eq!(backend.live_resources().total(), 0);
    }
}
