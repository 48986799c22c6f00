//! SceneRenderer: mount, per-frame update, input, and disposal.

use folio_common::{Point, Size, SurfaceId};
use folio_platform::{
    Dispatch, ElementId, Event, EventKind, FrameHandle, FrameTick, ListenerTarget, OwnerId,
    Platform,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::camera::Camera;
use super::particles::ParticleField;
use super::resources::{create_object, release_all, SceneObject};
use super::types::{
    hex_rgb, SceneInit, SceneSettings, SceneView, PARTICLE_OPACITY, PARTICLE_SIZE, PARTICLE_SPIN,
    SOLIDS,
};
use crate::backend::{
    Blending, DrawCall, FrameDesc, GeometryData, GraphicsBackend, Material, SurfaceDesc,
};
use crate::gpu::{PhysicalSize, RendererError};

/// Everything one mounted scene owns. Dropped only through
/// [`SceneHandle::dispose`].
#[derive(Debug)]
pub struct SceneHandle {
    owner: OwnerId,
    container: ElementId,
    surface: SurfaceId,
    camera: Camera,
    solids: Vec<SceneObject>,
    particles: SceneObject,
    frame: Option<FrameHandle>,
    /// Normalized pointer position, -1..1 on both axes.
    pointer: [f32; 2],
}

impl SceneHandle {
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn solids(&self) -> &[SceneObject] {
        &self.solids
    }

    pub fn particles(&self) -> &SceneObject {
        &self.particles
    }

    pub fn pointer(&self) -> [f32; 2] {
        self.pointer
    }

    pub fn frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// One animation step: tumble everything, then ease the camera.
    fn advance(&mut self) {
        for solid in &mut self.solids {
            solid.tumble();
        }
        self.particles.tumble();
        self.camera.follow(self.pointer);
    }

    fn frame_desc(&self) -> FrameDesc {
        let draws = self
            .solids
            .iter()
            .chain(std::iter::once(&self.particles))
            .map(|object| DrawCall {
                geometry: object.geometry,
                material: object.material,
                model: object.model(),
            })
            .collect();

        FrameDesc {
            view: self.camera.view(),
            projection: self.camera.projection(),
            draws,
        }
    }

    fn resize(
        &mut self,
        platform: &Platform,
        backend: &mut dyn GraphicsBackend,
        max_pixel_ratio: f64,
    ) -> Result<(), RendererError> {
        let size = container_size(platform, self.container);
        self.camera.set_aspect(aspect(size));
        let physical = surface_size(platform, size, max_pixel_ratio);
        backend.resize_surface(self.surface, physical.width, physical.height)
    }

    /// Cancel the frame, drop listeners, release resources, detach the
    /// surface. Consumes the handle.
    fn dispose(self, platform: &mut Platform, backend: &mut dyn GraphicsBackend) {
        if let Some(frame) = self.frame {
            platform.frames.cancel(frame);
        }
        platform.listeners.remove_owner(self.owner);

        let mut objects = self.solids;
        objects.push(self.particles);
        let failures = release_all(backend, &objects, Some(self.surface));

        if let Err(e) = platform.document.detach_surface(self.container) {
            debug!(error = %e, "scene container already gone");
        }
        debug!(surface = %self.surface, failures, "scene disposed");
    }
}

#[derive(Debug)]
enum SceneState {
    Empty,
    Ready(Box<SceneHandle>),
    Fallback,
}

/// The decorative 3D scene mounted in a container element.
#[derive(Debug)]
pub struct SceneRenderer {
    state: SceneState,
    settings: SceneSettings,
}

impl SceneRenderer {
    /// Initialize and log the outcome.
    pub fn mount(
        platform: &mut Platform,
        backend: &mut dyn GraphicsBackend,
        container: ElementId,
        settings: SceneSettings,
    ) -> Self {
        let state = match initialize(platform, backend, container, &settings) {
            SceneInit::Ready(handle) => {
                info!(surface = %handle.surface, "3D scene mounted");
                SceneState::Ready(Box::new(handle))
            }
            SceneInit::Unavailable => {
                debug!("3D rendering not available, scene left empty");
                SceneState::Empty
            }
            SceneInit::Failed(e) => {
                warn!(error = %e, "3D scene failed to initialize, showing fallback");
                SceneState::Fallback
            }
        };
        Self { state, settings }
    }

    pub fn view(&self) -> SceneView {
        match &self.state {
            SceneState::Empty => SceneView::Empty,
            SceneState::Ready(handle) => SceneView::Scene(handle.surface),
            SceneState::Fallback => SceneView::Fallback,
        }
    }

    pub fn handle(&self) -> Option<&SceneHandle> {
        match &self.state {
            SceneState::Ready(handle) => Some(handle.as_ref()),
            _ => None,
        }
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.handle().map(SceneHandle::owner)
    }

    /// Run one animation step for `tick`. Ticks for any handle other than
    /// the one currently pending are ignored.
    pub fn handle_frame(
        &mut self,
        platform: &mut Platform,
        backend: &mut dyn GraphicsBackend,
        tick: &FrameTick,
    ) {
        let SceneState::Ready(handle) = &mut self.state else {
            return;
        };
        if handle.frame != Some(tick.handle) {
            return;
        }

        handle.frame = Some(platform.frames.request(handle.owner));
        handle.advance();

        let frame = handle.frame_desc();
        if let Err(e) = backend.render(handle.surface, &frame) {
            debug!(error = %e, "scene frame not drawn");
        }
    }

    /// Handle a listener dispatch owned by this scene.
    pub fn handle_event(
        &mut self,
        platform: &Platform,
        backend: &mut dyn GraphicsBackend,
        dispatch: &Dispatch,
    ) -> Result<(), RendererError> {
        let max_pixel_ratio = self.settings.max_pixel_ratio;
        let SceneState::Ready(handle) = &mut self.state else {
            return Ok(());
        };
        if dispatch.owner != handle.owner {
            return Ok(());
        }

        match dispatch.event {
            Event::PointerMove { position } => {
                handle.pointer = normalize_pointer(position, platform.viewport());
                Ok(())
            }
            Event::Resize { .. } => handle.resize(platform, backend, max_pixel_ratio),
            Event::PointerEnter | Event::PointerLeave => Ok(()),
        }
    }

    /// Tear down. Safe to call any number of times.
    pub fn unmount(&mut self, platform: &mut Platform, backend: &mut dyn GraphicsBackend) {
        if let SceneState::Ready(handle) = std::mem::replace(&mut self.state, SceneState::Empty) {
            handle.dispose(platform, backend);
        }
    }
}

/// Build a scene in `container`. Anything created before a failure is
/// released before returning [`SceneInit::Failed`].
pub fn initialize(
    platform: &mut Platform,
    backend: &mut dyn GraphicsBackend,
    container: ElementId,
    settings: &SceneSettings,
) -> SceneInit {
    if !backend.probe() {
        return SceneInit::Unavailable;
    }

    let owner = platform.new_owner();
    let mut built = Partial::default();
    match build(platform, backend, container, settings, owner, &mut built) {
        Ok(handle) => SceneInit::Ready(handle),
        Err(e) => {
            platform.listeners.remove_owner(owner);
            if built.surface.is_some() && platform.document.surface_of(container) == built.surface {
                if let Err(detach) = platform.document.detach_surface(container) {
                    debug!(error = %detach, "partial scene detach failed");
                }
            }
            let mut objects = built.solids;
            objects.extend(built.particles);
            release_all(backend, &objects, built.surface);
            SceneInit::Failed(e)
        }
    }
}

/// Resources created so far during [`build`].
#[derive(Default)]
struct Partial {
    surface: Option<SurfaceId>,
    solids: Vec<SceneObject>,
    particles: Option<SceneObject>,
}

fn build(
    platform: &mut Platform,
    backend: &mut dyn GraphicsBackend,
    container: ElementId,
    settings: &SceneSettings,
    owner: OwnerId,
    built: &mut Partial,
) -> Result<SceneHandle, RendererError> {
    // Surface
    let reported = platform.document.client_size(container)?;
    let size = if reported.is_empty() {
        platform.viewport()
    } else {
        reported
    };
    let physical = surface_size(platform, size, settings.max_pixel_ratio);
    let surface = backend.create_surface(SurfaceDesc {
        width: physical.width,
        height: physical.height,
    })?;
    built.surface = Some(surface);
    platform.document.attach_surface(container, surface)?;

    let camera = Camera::new(aspect(size));

    // Solids
    for spec in &SOLIDS {
        let mesh = spec.kind.build();
        let data = GeometryData::Lines {
            indices: mesh.edge_indices(),
            positions: mesh.positions,
        };
        let material = Material::Wire {
            color: hex_rgb(spec.color),
            opacity: spec.opacity,
        };
        let object = create_object(
            backend,
            spec.kind.name(),
            &data,
            &material,
            spec.position,
            spec.spin,
        )?;
        built.solids.push(object);
    }

    // Particles
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let field = ParticleField::generate(&mut rng);
    let particles = create_object(
        backend,
        "particles",
        &field.to_geometry(),
        &Material::Points {
            size: PARTICLE_SIZE,
            opacity: PARTICLE_OPACITY,
            blending: Blending::Additive,
        },
        [0.0; 3],
        PARTICLE_SPIN,
    )?;
    built.particles = Some(particles.clone());

    // Listeners
    platform.add_listener(owner, ListenerTarget::Window, EventKind::PointerMove)?;
    platform.add_listener(owner, ListenerTarget::Window, EventKind::Resize)?;

    // Loop
    let frame = platform.frames.request(owner);

    Ok(SceneHandle {
        owner,
        container,
        surface,
        camera,
        solids: std::mem::take(&mut built.solids),
        particles,
        frame: Some(frame),
        pointer: [0.0, 0.0],
    })
}

/// Container size, or the viewport when the container reports nothing.
fn container_size(platform: &Platform, container: ElementId) -> Size {
    match platform.document.client_size(container) {
        Ok(size) if !size.is_empty() => size,
        _ => platform.viewport(),
    }
}

fn surface_size(platform: &Platform, size: Size, max_pixel_ratio: f64) -> PhysicalSize {
    let ratio = platform.device_pixel_ratio().min(max_pixel_ratio);
    PhysicalSize::from_logical(size.width, size.height, ratio)
}

fn aspect(size: Size) -> f32 {
    if size.height > 0.0 {
        (size.width / size.height) as f32
    } else {
        1.0
    }
}

/// Viewport pixels to -1..1, y up.
pub fn normalize_pointer(position: Point, viewport: Size) -> [f32; 2] {
    if viewport.is_empty() {
        return [0.0, 0.0];
    }
    [
        (position.x / viewport.width * 2.0 - 1.0) as f32,
        (-(position.y / viewport.height) * 2.0 + 1.0) as f32,
    ]
}
