//! Scene description files
//!
//! A RON tree of named nodes that stands in for a parsed 3D asset. Nodes with
//! a `mesh` become parts; all others become groups.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::material::Material;

use super::transform::{Transform, TransformDescription};
use super::types::{NodeId, NodeKind, PartData};
use super::{SceneError, SceneGraph};

/// Serializable scene tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Model name
    pub name: String,
    /// Root nodes
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

/// Serializable scene node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Node name
    pub name: String,
    /// Transform relative to the parent
    #[serde(default)]
    pub transform: TransformDescription,
    /// Mesh identifier; present for parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    /// Material override for parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

impl NodeDescription {
    fn kind(&self) -> NodeKind {
        match &self.mesh {
            Some(mesh) => NodeKind::Part(PartData {
                mesh: mesh.clone(),
                material: self.material.unwrap_or_default(),
            }),
            None => NodeKind::Group,
        }
    }
}

impl SceneDescription {
    /// Load a description from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SceneError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| SceneError::Deserialize(e.to_string()))
    }

    /// Load a description from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, SceneError> {
        let content =
            std::str::from_utf8(data).map_err(|e| SceneError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| SceneError::Deserialize(e.to_string()))
    }

    /// Serialize to pretty RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, SceneError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Save the description to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SceneError::Io(e.to_string()))
    }

    /// Build a fresh scene graph, preserving node order
    pub fn build(&self) -> Result<SceneGraph, SceneError> {
        let mut graph = SceneGraph::new(self.name.clone());
        let mut stack: Vec<(&NodeDescription, Option<NodeId>)> =
            self.nodes.iter().rev().map(|n| (n, None)).collect();

        while let Some((desc, parent)) = stack.pop() {
            let id = graph.insert(
                desc.name.clone(),
                Transform::from(&desc.transform),
                desc.kind(),
                parent,
            )?;
            stack.extend(desc.children.iter().rev().map(|c| (c, Some(id))));
        }

        tracing::debug!(
            "Built scene '{}' with {} nodes ({} parts)",
            graph.name,
            graph.len(),
            graph.part_count()
        );
        Ok(graph)
    }
}
