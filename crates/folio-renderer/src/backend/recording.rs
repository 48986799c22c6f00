//! In-memory backend that records calls, for lifecycle tests.

use std::collections::{HashMap, HashSet};

use folio_common::SurfaceId;

use super::{
    checked_surface_size, FrameDesc, GeometryData, GeometryId, GraphicsBackend, Material, MaterialId, ResourceCounts,
    SurfaceDesc,
};
use crate::gpu::RendererError;

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    /// Probe result.
    pub probe_ok: bool,
    /// Fail the n-th (0-based) geometry creation.
    pub fail_geometry_at: Option<usize>,
    /// Fail every material creation.
    pub fail_materials: bool,
    /// Largest surface side, like a device texture limit.
    pub max_dimension: Option<u32>,
    pub surfaces: HashMap<SurfaceId, SurfaceDesc>,
    pub geometries: HashSet<GeometryId>,
    pub materials: HashMap<MaterialId, Material>,
    pub geometry_calls: usize,
    pub probes: usize,
    pub renders: Vec<(SurfaceId, FrameDesc)>,
    next_id: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            probe_ok: true,
            ..Self::default()
        }
    }

    fn limit(&self) -> u32 {
        self.max_dimension.unwrap_or(u32::MAX)
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsBackend for RecordingBackend {
    fn probe(&mut self) -> bool {
        self.probes += 1;
        self.probe_ok
    }

    fn create_surface(&mut self, desc: SurfaceDesc) -> Result<SurfaceId, RendererError> {
        let (width, height) = checked_surface_size(desc.width, desc.height, self.limit())?;
        let desc = SurfaceDesc { width, height };
        let id = SurfaceId(self.next());
        self.surfaces.insert(id, desc);
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, width: u32, height: u32) -> Result<(), RendererError> {
        let limit = self.limit();
        let desc = self
            .surfaces
            .get_mut(&surface)
            .ok_or_else(|| RendererError::UnknownResource(surface.to_string()))?;
        let (width, height) = checked_surface_size(width, height, limit)?;
        desc.width = width;
        desc.height = height;
        Ok(())
    }

    fn create_geometry(&mut self, data: &GeometryData) -> Result<GeometryId, RendererError> {
        let call = self.geometry_calls;
        self.geometry_calls += 1;
        if self.fail_geometry_at == Some(call) {
            return Err(RendererError::DeviceError("out of memory".into()));
        }
        data.validate()?;
        let id = GeometryId(self.next());
        self.geometries.insert(id);
        Ok(id)
    }

    fn create_material(&mut self, material: &Material) -> Result<MaterialId, RendererError> {
        if self.fail_materials {
            return Err(RendererError::DeviceError("pipeline creation failed".into()));
        }
        let id = MaterialId(self.next());
        self.materials.insert(id, *material);
        Ok(id)
    }

    fn render(&mut self, surface: SurfaceId, frame: &FrameDesc) -> Result<(), RendererError> {
        if !self.surfaces.contains_key(&surface) {
            return Err(RendererError::UnknownResource(surface.to_string()));
        }
        self.renders.push((surface, frame.clone()));
        Ok(())
    }

    fn release_geometry(&mut self, geometry: GeometryId) -> Result<(), RendererError> {
        if self.geometries.remove(&geometry) {
            Ok(())
        } else {
            Err(RendererError::UnknownResource(format!("geometry-{}", geometry.0)))
        }
    }

    fn release_material(&mut self, material: MaterialId) -> Result<(), RendererError> {
        self.materials
            .remove(&material)
            .map(|_| ())
            .ok_or_else(|| RendererError::UnknownResource(format!("material-{}", material.0)))
    }

    fn release_surface(&mut self, surface: SurfaceId) -> Result<(), RendererError> {
        self.surfaces
            .remove(&surface)
            .map(|_| ())
            .ok_or_else(|| RendererError::UnknownResource(surface.to_string()))
    }

    fn live_resources(&self) -> ResourceCounts {
        ResourceCounts {
            surfaces: self.surfaces.len(),
            geometries: self.geometries.len(),
            materials: self.materials.len(),
        }
    }
}
