//! Hero scene configuration.

use serde::{Deserialize, Serialize};

/// 3D hero scene settings.
///
/// The scene content itself (solids, particle field, camera) is fixed;
/// only whether the renderer is attempted at all is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub enabled: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
