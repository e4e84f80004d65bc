//! Display materials assigned to parts on extraction

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CATALOG_PALETTE, METALLIC_GRAY};

/// Physically based display material of a part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color (RGBA)
    pub color: [f32; 4],
    /// Metalness in [0, 1]
    pub metalness: f32,
    /// Roughness in [0, 1]
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.7, 0.7, 0.7, 1.0],
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

impl Material {
    /// Create a material from its components
    pub fn new(color: [f32; 4], metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
        }
    }

    /// Polished gray used by the showcase viewer
    pub fn metallic() -> Self {
        Self::new(METALLIC_GRAY, 0.9, 0.2)
    }
}

/// How extraction recolors the parts it finds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialPolicy {
    /// Leave part materials untouched
    Keep,
    /// Give every part the same material
    Uniform(Material),
    /// Give each part a color picked at random from the palette
    Palette {
        /// Candidate colors (RGBA)
        colors: Vec<[f32; 4]>,
        /// Metalness shared by all picks
        metalness: f32,
        /// Roughness shared by all picks
        roughness: f32,
    },
}

impl Default for MaterialPolicy {
    fn default() -> Self {
        Self::Uniform(Material::metallic())
    }
}

impl MaterialPolicy {
    /// Palette used on the product detail pages
    pub fn catalog() -> Self {
        Self::Palette {
            colors: CATALOG_PALETTE.to_vec(),
            metalness: 0.8,
            roughness: 0.3,
        }
    }

    /// Pick the material for the next part, or `None` to keep the current one.
    ///
    /// An empty palette behaves like [`MaterialPolicy::Keep`].
    pub fn pick(&self, rng: &mut impl Rng) -> Option<Material> {
        match self {
            MaterialPolicy::Keep => None,
            MaterialPolicy::Uniform(material) => Some(*material),
            MaterialPolicy::Palette {
                colors,
                metalness,
                roughness,
            } => {
                if colors.is_empty() {
                    return None;
                }
                let color = colors[rng.random_range(0..colors.len())];
                Some(Material::new(color, *metalness, *roughness))
            }
        }
    }
}
