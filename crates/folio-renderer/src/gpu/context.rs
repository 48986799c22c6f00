use std::sync::Arc;

use tracing::{info, warn};
use winit::window::Window;

use super::types::{PhysicalSize, RendererError};

/// Window-bound wgpu state. Device and queue are shared with the scene
/// backend, which renders into its own offscreen targets.
pub struct GpuContext {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize,
    pub scale_factor: f64,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let scale_factor = window.scale_factor();
        let inner = window.inner_size();
        let size = PhysicalSize {
            width: inner.width.max(1),
            height: inner.height.max(1),
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;
        let adapter = find_adapter(&instance, &surface).await?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("folio device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: pick_format(&caps.formats),
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: pick_alpha_mode(&caps.alpha_modes),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &surface_config);
        info!(format = ?surface_config.format, width = size.width, height = size.height, "surface configured");

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            surface,
            surface_config,
            size,
            scale_factor,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = PhysicalSize {
            width: width.max(1),
            height: height.max(1),
        };
        self.surface_config.width = self.size.width;
        self.surface_config.height = self.size.height;
        self.reconfigure();
    }

    /// Apply the stored configuration again, e.g. after the surface is lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

/// Any adapter that can present to `surface`, software as a last resort.
async fn find_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<wgpu::Adapter, RendererError> {
    for force_fallback_adapter in [false, true] {
        let options = wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter,
            compatible_surface: Some(surface),
        };
        if let Some(adapter) = instance.request_adapter(&options).await {
            let info = adapter.get_info();
            info!(name = %info.name, backend = ?info.backend, software = force_fallback_adapter, "GPU adapter selected");
            return Ok(adapter);
        }
        if !force_fallback_adapter {
            warn!("no hardware adapter, trying software fallback");
        }
    }
    Err(RendererError::AdapterNotFound)
}

/// Colours are authored as hex and blended in display space, so a plain
/// UNORM target is preferred over its sRGB twin.
pub(crate) fn pick_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8Unorm)
}

pub(crate) fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}
