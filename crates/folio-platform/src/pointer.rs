//! Primary pointer capability.

use serde::{Deserialize, Serialize};

/// Whether the primary pointer can hover precisely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerCapability {
    /// Mouse or trackpad.
    #[default]
    Fine,
    /// Touchscreen or similar.
    Coarse,
}

impl PointerCapability {
    /// Best guess for the current host. Desktop windows always report a
    /// fine pointer; touch-first targets report coarse.
    pub fn detect() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            PointerCapability::Coarse
        } else {
            PointerCapability::Fine
        }
    }

    pub fn is_coarse(&self) -> bool {
        matches!(self, PointerCapability::Coarse)
    }
}

impl std::str::FromStr for PointerCapability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fine" => Ok(PointerCapability::Fine),
            "coarse" => Ok(PointerCapability::Coarse),
            other => Err(format!("unknown pointer type '{other}' (expected fine or coarse)")),
        }
    }
}
