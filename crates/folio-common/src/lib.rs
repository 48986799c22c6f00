pub mod errors;
pub mod types;

pub use errors::{ConfigError, FolioError, PlatformError};
pub use types::{Color, Point, Rect, Size, SurfaceId};

pub type Result<T> = std::result::Result<T, FolioError>;
