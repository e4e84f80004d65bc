//! Node handles and node payloads

use std::fmt;

use crate::material::Material;

use super::transform::Transform;

/// Handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// Arena index plus generation: once the node is removed its slot may be
/// reused, but the old handle stays stale instead of aliasing the new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Renderable geometry carried by a part node
#[derive(Debug, Clone, PartialEq)]
pub struct PartData {
    /// Identifier of the mesh in the loaded asset
    pub mesh: String,
    /// Display material
    pub material: Material,
}

impl PartData {
    /// Part data with the default material
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: Material::default(),
        }
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping/transform-only node
    Group,
    /// Node with renderable geometry
    Part(PartData),
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Display name
    pub name: String,
    /// Transform relative to the parent (or world for roots)
    pub local: Transform,
    /// Group or part
    pub kind: NodeKind,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) generation: u32,
    pub(super) alive: bool,
}

impl Node {
    /// Returns true if the node carries renderable geometry
    pub fn is_part(&self) -> bool {
        matches!(self.kind, NodeKind::Part(_))
    }

    /// Part payload, if this is a part node
    pub fn part(&self) -> Option<&PartData> {
        match &self.kind {
            NodeKind::Part(data) => Some(data),
            NodeKind::Group => None,
        }
    }

    /// Parent handle (None for roots)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
