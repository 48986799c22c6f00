/// Errors that can occur during GPU rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("surface error: {0}")]
    SurfaceError(String),

    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("device error: {0}")]
    DeviceError(String),

    /// The backend cannot produce a 3D context at all.
    #[error("3D rendering is not available")]
    Unavailable,

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error(transparent)]
    Platform(#[from] folio_common::PlatformError),
}

impl From<wgpu::SurfaceError> for RendererError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RendererError::SurfaceError(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RendererError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RendererError::DeviceError(e.to_string())
    }
}

impl From<RendererError> for folio_common::FolioError {
    fn from(e: RendererError) -> Self {
        folio_common::FolioError::Renderer(e.to_string())
    }
}

/// Physical pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    /// Scale a logical size by `ratio`, never going below 1x1.
    pub fn from_logical(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            width: (width * ratio).round().max(1.0) as u32,
            height: (height * ratio).round().max(1.0) as u32,
        }
    }
}
