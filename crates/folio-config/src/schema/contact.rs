//! Contact endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the contact-form service listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}
