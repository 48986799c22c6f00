use std::sync::Arc;
use winit::window::Window;

use folio_common::Color;

use super::composition::Composition;
use super::helpers::log_first_frame;
use crate::backend::WgpuBackend;
use crate::gpu::{GpuContext, RendererError};
use crate::quad::{QuadInstance, QuadRenderer};

/// Window rendering: the device, the scene backend that shares it, and the
/// quad renderer for everything drawn over the scenes.
pub struct RenderState {
    pub gpu: GpuContext,
    pub backend: WgpuBackend,
    pub quad: QuadRenderer,
}

impl RenderState {
    /// Create a fully initialized render state from a window.
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let gpu = GpuContext::new(window).await?;
        let backend = WgpuBackend::new(gpu.device.clone(), gpu.queue.clone(), gpu.format());
        let quad = QuadRenderer::new(&gpu.device, gpu.format());

        Ok(Self { gpu, backend, quad })
    }

    /// Handle a window resize by reconfiguring the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Draw one window frame: clear, blit scene surfaces into their
    /// containers, then the quads on top.
    pub fn render(&mut self, composition: &Composition) -> Result<(), RendererError> {
        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Failed to get surface texture: {e}");
                return Err(RendererError::SurfaceError(e.to_string()));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let width = self.gpu.size.width as f32;
        let height = self.gpu.size.height as f32;
        let scale = self.gpu.scale_factor as f32;

        let mut blits = Vec::with_capacity(composition.surfaces.len());
        for (surface, rect) in &composition.surfaces {
            let dest = [
                rect.x as f32 * scale,
                rect.y as f32 * scale,
                rect.width as f32 * scale,
                rect.height as f32 * scale,
            ];
            if self.backend.prepare_blit(*surface, dest, [width, height]) {
                blits.push(*surface);
            }
        }

        let quads: Vec<QuadInstance> = composition.quads.iter().map(|q| q.scaled(scale)).collect();
        self.quad.prepare(&self.gpu.device, &self.gpu.queue, &quads, [width, height]);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("folio frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("folio main pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(composition.clear)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for surface in &blits {
                self.backend.blit(&mut pass, *surface);
            }
            self.quad.render(&mut pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        log_first_frame(self.gpu.size.width, self.gpu.size.height, self.gpu.format());

        Ok(())
    }
}

fn clear_color(color: Color) -> wgpu::Color {
    let [r, g, b] = color.to_rgb_f32();
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}
