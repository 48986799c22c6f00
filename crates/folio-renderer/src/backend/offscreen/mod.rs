//! wgpu implementation of [`GraphicsBackend`].
//!
//! Each surface is an offscreen `Rgba16Float` texture that the compositor
//! later blits into its container rectangle on the window. Draw uniforms for
//! a frame share one buffer addressed with dynamic offsets.

mod blit;
mod points;
mod wire;

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;

use folio_common::SurfaceId;
use tracing::{debug, warn};
use wgpu::util::DeviceExt;

use self::blit::{BlitBinding, BlitPipeline, BlitUniforms};
use self::points::{PointInstance, PointPipeline};
use self::wire::WirePipeline;
use super::{
    checked_surface_size, Blending, FrameDesc, GeometryData, GeometryId, GraphicsBackend, Material, MaterialId,
    ResourceCounts, SurfaceDesc,
};
use crate::gpu::RendererError;

/// Offscreen target format; HDR so additive particles can exceed 1.0 before
/// the blit clamps them.
pub(crate) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Draws per frame beyond this are dropped.
const MAX_DRAWS: usize = 64;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [f32; 16],
    view: [f32; 16],
    projection: [f32; 16],
    /// rgb + opacity.
    color: [f32; 4],
    /// x: point size in world units.
    params: [f32; 4],
}

struct OffscreenTarget {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
    blit: BlitBinding,
    view: wgpu::TextureView,
}

enum GpuGeometry {
    Lines {
        vertices: wgpu::Buffer,
        indices: wgpu::Buffer,
        index_count: u32,
    },
    Points {
        instances: wgpu::Buffer,
        count: u32,
    },
}

impl GpuGeometry {
    fn destroy(&self) {
        match self {
            GpuGeometry::Lines {
                vertices, indices, ..
            } => {
                vertices.destroy();
                indices.destroy();
            }
            GpuGeometry::Points { instances, .. } => instances.destroy(),
        }
    }
}

pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    /// Byte stride between draw slots, honouring the device's offset alignment.
    draw_stride: u64,
    wire: WirePipeline,
    points_normal: PointPipeline,
    points_additive: PointPipeline,
    blit: BlitPipeline,
    surfaces: HashMap<SurfaceId, OffscreenTarget>,
    geometries: HashMap<GeometryId, GpuGeometry>,
    materials: HashMap<MaterialId, Material>,
    next_id: u64,
}

impl WgpuBackend {
    /// `output_format` is the window surface format the blit writes into.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        output_format: wgpu::TextureFormat,
    ) -> Self {
        let uniform_size = std::mem::size_of::<DrawUniforms>() as u64;
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let draw_stride = uniform_size.div_ceil(alignment) * alignment;

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw uniforms layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
        });

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw uniforms"),
            size: draw_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw uniforms bind group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: NonZeroU64::new(uniform_size),
                }),
            }],
        });

        let wire = WirePipeline::new(&device, &draw_layout);
        let points_normal = PointPipeline::new(&device, &draw_layout, Blending::Normal);
        let points_additive = PointPipeline::new(&device, &draw_layout, Blending::Additive);
        let blit = BlitPipeline::new(&device, output_format);

        Self {
            device,
            queue,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            wire,
            points_normal,
            points_additive,
            blit,
            surfaces: HashMap::new(),
            geometries: HashMap::new(),
            materials: HashMap::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a render target of at least 1x1. Sizes past the device limit
    /// and validation failures come back as errors instead of reaching the
    /// uncaptured-error handler.
    fn create_target(&self, width: u32, height: u32) -> Result<OffscreenTarget, RendererError> {
        let max = self.device.limits().max_texture_dimension_2d;
        let (width, height) = checked_surface_size(width, height, max)?;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let blit = self.blit.bind(&self.device, &view);
        if let Some(e) = pollster::block_on(self.device.pop_error_scope()) {
            texture.destroy();
            return Err(RendererError::SurfaceError(e.to_string()));
        }

        Ok(OffscreenTarget {
            texture,
            width,
            height,
            blit,
            view,
        })
    }

    /// Size of a surface in physical pixels.
    pub fn surface_size(&self, surface: SurfaceId) -> Option<(u32, u32)> {
        self.surfaces.get(&surface).map(|t| (t.width, t.height))
    }

    /// Upload the destination rect (physical px) for the next
    /// [`blit`](Self::blit) of `surface`. Returns false for unknown surfaces.
    pub fn prepare_blit(&self, surface: SurfaceId, rect: [f32; 4], resolution: [f32; 2]) -> bool {
        let Some(target) = self.surfaces.get(&surface) else {
            return false;
        };
        let uniforms = BlitUniforms {
            rect,
            resolution,
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&target.blit.uniforms, 0, bytemuck::bytes_of(&uniforms));
        true
    }

    /// Draw `surface` into the current window pass.
    pub fn blit(&self, pass: &mut wgpu::RenderPass<'_>, surface: SurfaceId) {
        if let Some(target) = self.surfaces.get(&surface) {
            self.blit.draw(pass, &target.blit);
        }
    }
}

impl GraphicsBackend for WgpuBackend {
    fn probe(&mut self) -> bool {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("probe"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let error = pollster::block_on(self.device.pop_error_scope());
        texture.destroy();

        match error {
            None => true,
            Some(e) => {
                debug!(error = %e, "offscreen target probe failed");
                false
            }
        }
    }

    fn create_surface(&mut self, desc: SurfaceDesc) -> Result<SurfaceId, RendererError> {
        let target = self.create_target(desc.width, desc.height)?;
        let id = SurfaceId(self.next_id());
        self.surfaces.insert(id, target);
        debug!(?id, width = desc.width, height = desc.height, "surface created");
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, width: u32, height: u32) -> Result<(), RendererError> {
        let (width, height) = (width.max(1), height.max(1));
        match self.surfaces.get(&surface) {
            None => return Err(RendererError::UnknownResource(surface.to_string())),
            Some(t) if t.width == width && t.height == height => return Ok(()),
            Some(_) => {}
        }
        let target = self.create_target(width, height)?;
        if let Some(old) = self.surfaces.insert(surface, target) {
            old.texture.destroy();
        }
        Ok(())
    }

    fn create_geometry(&mut self, data: &GeometryData) -> Result<GeometryId, RendererError> {
        data.validate()?;

        let geometry = match data {
            GeometryData::Lines { positions, indices } => GpuGeometry::Lines {
                vertices: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("line vertices"),
                        contents: bytemuck::cast_slice(positions),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                indices: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("line indices"),
                        contents: bytemuck::cast_slice(indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                index_count: indices.len() as u32,
            },
            GeometryData::Points { positions, colors } => {
                let instances: Vec<PointInstance> = positions
                    .iter()
                    .zip(colors)
                    .map(|(&position, &color)| PointInstance { position, color })
                    .collect();
                GpuGeometry::Points {
                    instances: self
                        .device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("point instances"),
                            contents: bytemuck::cast_slice(&instances),
                            usage: wgpu::BufferUsages::VERTEX,
                        }),
                    count: instances.len() as u32,
                }
            }
        };

        let id = GeometryId(self.next_id());
        self.geometries.insert(id, geometry);
        Ok(id)
    }

    fn create_material(&mut self, material: &Material) -> Result<MaterialId, RendererError> {
        let id = MaterialId(self.next_id());
        self.materials.insert(id, *material);
        Ok(id)
    }

    fn render(&mut self, surface: SurfaceId, frame: &FrameDesc) -> Result<(), RendererError> {
        let target = self
            .surfaces
            .get(&surface)
            .ok_or_else(|| RendererError::UnknownResource(surface.to_string()))?;

        if frame.draws.len() > MAX_DRAWS {
            warn!(draws = frame.draws.len(), max = MAX_DRAWS, "too many draws, extra dropped");
        }

        // Resolve everything before touching the GPU so a bad id draws nothing.
        let mut resolved = Vec::with_capacity(frame.draws.len().min(MAX_DRAWS));
        for draw in frame.draws.iter().take(MAX_DRAWS) {
            let geometry = self
                .geometries
                .get(&draw.geometry)
                .ok_or_else(|| RendererError::UnknownResource(format!("{:?}", draw.geometry)))?;
            let material = self
                .materials
                .get(&draw.material)
                .ok_or_else(|| RendererError::UnknownResource(format!("{:?}", draw.material)))?;
            let uniforms = match (material, geometry) {
                (Material::Wire { color, opacity }, GpuGeometry::Lines { .. }) => DrawUniforms {
                    model: draw.model,
                    view: frame.view,
                    projection: frame.projection,
                    color: [color[0], color[1], color[2], *opacity],
                    params: [0.0; 4],
                },
                (Material::Points { size, opacity, .. }, GpuGeometry::Points { .. }) => {
                    DrawUniforms {
                        model: draw.model,
                        view: frame.view,
                        projection: frame.projection,
                        color: [1.0, 1.0, 1.0, *opacity],
                        params: [*size, 0.0, 0.0, 0.0],
                    }
                }
                _ => {
                    return Err(RendererError::InvalidGeometry(format!(
                        "{:?} cannot be drawn with {:?}",
                        draw.geometry, draw.material
                    )))
                }
            };
            resolved.push((geometry, material, uniforms));
        }

        for (slot, (_, _, uniforms)) in resolved.iter().enumerate() {
            self.queue.write_buffer(
                &self.draw_buffer,
                slot as u64 * self.draw_stride,
                bytemuck::bytes_of(uniforms),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (slot, (geometry, material, _)) in resolved.iter().enumerate() {
                let offset = (slot as u64 * self.draw_stride) as u32;
                match (geometry, material) {
                    (
                        GpuGeometry::Lines {
                            vertices,
                            indices,
                            index_count,
                        },
                        _,
                    ) => {
                        pass.set_pipeline(&self.wire.pipeline);
                        pass.set_bind_group(0, &self.draw_bind_group, &[offset]);
                        pass.set_vertex_buffer(0, vertices.slice(..));
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..*index_count, 0, 0..1);
                    }
                    (GpuGeometry::Points { instances, count }, material) => {
                        let pipeline = match material {
                            Material::Points {
                                blending: Blending::Additive,
                                ..
                            } => &self.points_additive.pipeline,
                            _ => &self.points_normal.pipeline,
                        };
                        pass.set_pipeline(pipeline);
                        pass.set_bind_group(0, &self.draw_bind_group, &[offset]);
                        pass.set_vertex_buffer(0, instances.slice(..));
                        pass.draw(0..6, 0..*count);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn release_geometry(&mut self, geometry: GeometryId) -> Result<(), RendererError> {
        let gpu = self
            .geometries
            .remove(&geometry)
            .ok_or_else(|| RendererError::UnknownResource(format!("geometry-{}", geometry.0)))?;
        gpu.destroy();
        Ok(())
    }

    fn release_material(&mut self, material: MaterialId) -> Result<(), RendererError> {
        self.materials
            .remove(&material)
            .map(|_| ())
            .ok_or_else(|| RendererError::UnknownResource(format!("material-{}", material.0)))
    }

    fn release_surface(&mut self, surface: SurfaceId) -> Result<(), RendererError> {
        let target = self
            .surfaces
            .remove(&surface)
            .ok_or_else(|| RendererError::UnknownResource(surface.to_string()))?;
        target.texture.destroy();
        debug!(?surface, "surface released");
        Ok(())
    }

    fn live_resources(&self) -> ResourceCounts {
        ResourceCounts {
            surfaces: self.surfaces.len(),
            geometries: self.geometries.len(),
            materials: self.materials.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_uniforms_fit_one_slot() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 224);
        assert!(std::mem::size_of::<DrawUniforms>() <= 256);
    }
}
