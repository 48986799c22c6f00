//! Colour palette configuration.

use serde::{Deserialize, Serialize};

/// Page palette as hex strings (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    /// Cursor overlay and link colour.
    pub primary: String,
    /// Secondary neon used by page chrome.
    pub accent: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#0a0a12".into(),
            primary: "#b026ff".into(),
            accent: "#00d4ff".into(),
        }
    }
}
