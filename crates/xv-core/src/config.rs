//! Exploded-view configuration
//!
//! Settings are grouped in sections that can be serialized to and loaded from
//! RON files. Missing sections and fields fall back to their defaults.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEGENERATE_EPSILON, EXPLOSION_SCALE};
use crate::material::MaterialPolicy;

/// Explosion geometry and update settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Displacement of a part at factor 1.0
    pub scale: f32,
    /// Explosion vectors shorter than this get a random direction
    pub degenerate_epsilon: f32,
    /// Point directions are measured from (world space)
    pub reference_point: [f32; 3],
    /// Seed for degenerate directions and palette picks; `None` draws from the OS
    pub seed: Option<u64>,
    /// Skip per-frame updates when the factor has not changed
    pub skip_unchanged: bool,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            scale: EXPLOSION_SCALE,
            degenerate_epsilon: DEGENERATE_EPSILON,
            reference_point: [0.0; 3],
            seed: None,
            skip_unchanged: true,
        }
    }
}

impl ExplosionConfig {
    /// Reference point as a vector
    pub fn reference_point(&self) -> Vec3 {
        Vec3::from(self.reference_point)
    }
}

/// Complete exploded-view configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExplodeConfig {
    /// Explosion settings
    #[serde(default)]
    pub explosion: ExplosionConfig,
    /// Material assigned to parts on extraction
    #[serde(default)]
    pub material: MaterialPolicy,
}

impl ExplodeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used by the product detail pages
    pub fn catalog() -> Self {
        Self {
            material: MaterialPolicy::catalog(),
            ..Self::default()
        }
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to pretty RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// Encoding failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Decoding failed
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
