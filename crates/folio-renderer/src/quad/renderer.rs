use wgpu::util::DeviceExt;

use super::pipeline::create_pipeline;
use super::types::{grown_capacity, QuadInstance, ViewportUniforms, INITIAL_CAPACITY};

/// Draws [`QuadInstance`]s in one instanced call. The instance buffer
/// grows on demand, so no shape is ever dropped.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instances: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("quad instances"),
        size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl QuadRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let (pipeline, viewport_layout) = create_pipeline(device, format);

        let viewport = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad viewport"),
            contents: bytemuck::bytes_of(&ViewportUniforms {
                resolution: [1.0, 1.0],
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad viewport bind group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            viewport,
            bind_group,
            instances: instance_buffer(device, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            count: 0,
        }
    }

    /// Upload this frame's quads (physical px) and the target size.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        quads: &[QuadInstance],
        resolution: [f32; 2],
    ) {
        let capacity = grown_capacity(self.capacity, quads.len());
        if capacity != self.capacity {
            tracing::debug!(from = self.capacity, to = capacity, "growing quad instance buffer");
            self.instances.destroy();
            self.instances = instance_buffer(device, capacity);
            self.capacity = capacity;
        }

        self.count = quads.len() as u32;
        if !quads.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(quads));
        }
        queue.write_buffer(
            &self.viewport,
            0,
            bytemuck::bytes_of(&ViewportUniforms {
                resolution,
                _pad: [0.0; 2],
            }),
        );
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instances.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}
