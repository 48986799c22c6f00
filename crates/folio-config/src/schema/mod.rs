//! Configuration schema types for Folio.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod colors;
mod contact;
mod cursor;
mod performance;
mod scene;
mod system;
mod window;

pub use colors::*;
pub use contact::*;
pub use cursor::*;
pub use performance::*;
pub use scene::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Folio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    pub window: WindowConfig,
    pub colors: ColorConfig,
    pub scene: SceneConfig,
    pub cursor: CursorConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
    pub contact: ContactConfig,
}

// =============================================================================
// Tests
// =============================================================================
