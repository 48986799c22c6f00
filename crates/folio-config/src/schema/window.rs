//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Initial window settings (logical pixels).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Valid range: 320-7680.
    pub width: u32,
    /// Valid range: 240-4320.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Folio".into(),
            width: 1280,
            height: 800,
        }
    }
}
