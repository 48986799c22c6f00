//! Performance configuration types.

use serde::{Deserialize, Serialize};

/// Performance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Upper bound applied to the device pixel ratio when sizing render
    /// surfaces (valid range: 1.0-4.0).
    pub max_pixel_ratio: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
        }
    }
}
