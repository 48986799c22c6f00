//! Cursor overlay configuration types.

use serde::{Deserialize, Deserializer, Serialize};

/// How the primary pointer type is determined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointerMode {
    /// Ask the platform (desktop windows report a fine pointer).
    #[default]
    Auto,
    Fine,
    Coarse,
}

/// Spring parameters for one cursor layer. A partial table is merged onto
/// that layer's own preset, see [`CursorConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpringConfig {
    /// Valid range: 1.0-5000.0.
    pub stiffness: f64,
    /// Valid range: 0.0-500.0.
    pub damping: f64,
    /// Valid range: 0.01-10.0.
    pub mass: f64,
}

impl SpringConfig {
    /// Stiff, light spring for the inner dot.
    pub const DOT: Self = Self {
        stiffness: 500.0,
        damping: 28.0,
        mass: 0.5,
    };

    /// Softer spring for the trailing ring.
    pub const RING: Self = Self {
        stiffness: 150.0,
        damping: 15.0,
        mass: 0.1,
    };

    fn merged(self, table: SpringTable) -> Self {
        Self {
            stiffness: table.stiffness.unwrap_or(self.stiffness),
            damping: table.damping.unwrap_or(self.damping),
            mass: table.mass.unwrap_or(self.mass),
        }
    }
}

/// A `[cursor.dot]` / `[cursor.ring]` table as written by the user.
#[derive(Deserialize)]
struct SpringTable {
    stiffness: Option<f64>,
    damping: Option<f64>,
    mass: Option<f64>,
}

fn dot_spring<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpringConfig, D::Error> {
    Ok(SpringConfig::DOT.merged(SpringTable::deserialize(deserializer)?))
}

fn ring_spring<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpringConfig, D::Error> {
    Ok(SpringConfig::RING.merged(SpringTable::deserialize(deserializer)?))
}

/// Custom cursor overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub enabled: bool,
    pub pointer: PointerMode,
    #[serde(deserialize_with = "dot_spring")]
    pub dot: SpringConfig,
    #[serde(deserialize_with = "ring_spring")]
    pub ring: SpringConfig,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pointer: PointerMode::Auto,
            dot: SpringConfig::DOT,
            ring: SpringConfig::RING,
        }
    }
}
