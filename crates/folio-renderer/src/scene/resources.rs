//! Scene objects and their backend resources.
//!
//! Every object owns exactly one geometry and one material. Release never
//! stops at the first failure: each resource is released on its own and
//! failures are logged.

use folio_common::SurfaceId;
use tracing::debug;

use crate::backend::{GeometryData, GeometryId, GraphicsBackend, Material, MaterialId};
use crate::gpu::RendererError;
use crate::matrix::{self, Mat4, Vec3};

/// A drawable with its own tumble.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub position: Vec3,
    pub rotation: Vec3,
    /// Radians per frame on each axis.
    pub spin: Vec3,
}

impl SceneObject {
    /// Advance rotation by one frame.
    pub fn tumble(&mut self) {
        self.rotation = matrix::add(self.rotation, self.spin);
    }

    pub fn model(&self) -> Mat4 {
        matrix::model(self.position, self.rotation)
    }
}

/// Create geometry and material for one object. A material failure
/// releases the geometry before returning.
pub fn create_object(
    backend: &mut dyn GraphicsBackend,
    name: &'static str,
    data: &GeometryData,
    material: &Material,
    position: Vec3,
    spin: Vec3,
) -> Result<SceneObject, RendererError> {
    let geometry = backend.create_geometry(data)?;
    let material = match backend.create_material(material) {
        Ok(id) => id,
        Err(e) => {
            if let Err(release) = backend.release_geometry(geometry) {
                debug!(object = name, error = %release, "orphan geometry release failed");
            }
            return Err(e);
        }
    };

    Ok(SceneObject {
        name,
        geometry,
        material,
        position,
        rotation: [0.0; 3],
        spin,
    })
}

/// Release objects then the surface. Returns how many releases failed.
pub fn release_all(
    backend: &mut dyn GraphicsBackend,
    objects: &[SceneObject],
    surface: Option<SurfaceId>,
) -> usize {
    let mut failures = 0;

    for object in objects {
        if let Err(e) = backend.release_geometry(object.geometry) {
            debug!(object = object.name, error = %e, "geometry release failed");
            failures += 1;
        }
        if let Err(e) = backend.release_material(object.material) {
            debug!(object = object.name, error = %e, "material release failed");
            failures += 1;
        }
    }

    if let Some(surface) = surface {
        if let Err(e) = backend.release_surface(surface) {
            debug!(%surface, error = %e, "surface release failed");
            failures += 1;
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;
    use crate::backend::SurfaceDesc;

    fn lines() -> GeometryData {
        GeometryData::Lines {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0]],
            indices: vec![0, 1],
        }
    }

    fn wire() -> Material {
        Material::Wire {
            color: [1.0, 0.0, 0.0],
            opacity: 0.5,
        }
    }

    #[test]
    fn tumble_accumulates_spin() {
        let mut backend = RecordingBackend::new();
        let mut obj = create_object(&mut backend, "a", &lines(), &wire(), [0.0; 3], [0.1, 0.2, 0.0]).unwrap();
        obj.tumble();
        obj.tumble();
        assert!((obj.rotation[0] - 0.2).abs() < 1e-6);
        assert!((obj.rotation[1] - 0.4).abs() < 1e-6);
        assert_eq!(obj.rotation[2], 0.0);
    }

    #[test]
    fn material_failure_releases_geometry() {
        let mut backend = RecordingBackend::new();
        backend.fail_materials = true;
        let result = create_object(&mut backend, "a", &lines(), &wire(), [0.0; 3], [0.0; 3]);
        assert!(result.is_err());
        assert_eq!(backend.live_resources().total(), 0);
    }

    #[test]
    fn release_continues_past_failures() {
        let mut backend = RecordingBackend::new();
        let a = create_object(&mut backend, "a", &lines(), &wire(), [0.0; 3], [0.0; 3]).unwrap();
        let b = create_object(&mut backend, "b", &lines(), &wire(), [0.0; 3], [0.0; 3]).unwrap();
        let surface = backend
            .create_surface(SurfaceDesc {
                width: 4,
                height: 4,
            })
            .unwrap();

        // a's geometry is already gone
        backend.release_geometry(a.geometry).unwrap();

        let failures = release_all(&mut backend, &[a, b], Some(surface));
        assert_eq!(failures, 1);
        assert_eq!(backend.live_resources().total(), 0);
    }
}
