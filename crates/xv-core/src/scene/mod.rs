//! Scene graph the exploded view operates on
//!
//! Nodes live in an arena and are addressed by generational [`NodeId`]s.
//! The asset loader owns the graph; the engine only reads its structure and
//! writes part positions and materials.

mod description;
mod transform;
mod traversal;
mod types;

use glam::{Mat4, Vec3};
use uuid::Uuid;

pub use description::{NodeDescription, SceneDescription};
pub use transform::{Transform, TransformDescription};
pub use traversal::DepthFirst;
pub use types::{Node, NodeId, NodeKind, PartData};

use crate::material::Material;

/// Arena-backed forest of group and part nodes
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// Identity of this loaded scene; part tables are bound to it
    id: Uuid,
    /// Display name of the loaded model
    pub name: String,
    nodes: Vec<Node>,
    /// Free slot indices for reuse
    free_list: Vec<u32>,
    roots: Vec<NodeId>,
    part_count: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new("scene")
    }
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nodes: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            part_count: 0,
        }
    }

    /// Identity of this scene graph
    pub fn id(&self) -> Uuid {
        self.id
    }

    // ============== Arena internals ==============

    fn alloc_slot(&mut self, name: String, local: Transform, kind: NodeKind) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let node = &mut self.nodes[index as usize];
            node.generation += 1;
            node.alive = true;
            node.name = name;
            node.local = local;
            node.kind = kind;
            node.parent = None;
            node.children.clear();
            NodeId {
                index,
                generation: node.generation,
            }
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(Node {
                name,
                local,
                kind,
                parent: None,
                children: Vec::new(),
                generation: 0,
                alive: true,
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    fn insert(
        &mut self,
        name: String,
        local: Transform,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent
            && !self.contains(p)
        {
            return Err(SceneError::InvalidParent(p));
        }

        if matches!(kind, NodeKind::Part(_)) {
            self.part_count += 1;
        }
        let id = self.alloc_slot(name, local, kind);

        match parent {
            Some(p) => {
                self.nodes[id.index as usize].parent = Some(p);
                self.nodes[p.index as usize].children.push(id);
            }
            None => self.roots.push(id),
        }
        Ok(id)
    }

    // ============== Public scene graph API ==============

    /// Add a grouping node under `parent` (or as a root)
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        self.insert(name.into(), local, NodeKind::Group, parent)
    }

    /// Add a part node under `parent` (or as a root)
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        data: PartData,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        self.insert(name.into(), local, NodeKind::Part(data), parent)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns false if the handle was already stale.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }

        match self.nodes[id.index as usize].parent {
            Some(parent) => self.nodes[parent.index as usize]
                .children
                .retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }

        let mut stack = vec![id];
        while let Some(nid) = stack.pop() {
            let node = &mut self.nodes[nid.index as usize];
            stack.append(&mut node.children);
            if node.is_part() {
                self.part_count -= 1;
            }
            node.alive = false;
            node.parent = None;
            node.kind = NodeKind::Group;
            self.free_list.push(nid.index);
        }
        true
    }

    /// Returns true if the handle refers to a live node of this graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index as usize)
            .is_some_and(|node| node.alive && node.generation == id.generation)
    }

    /// Get a node by handle
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if self.contains(id) {
            Some(&self.nodes[id.index as usize])
        } else {
            None
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.contains(id) {
            Some(&mut self.nodes[id.index as usize])
        } else {
            None
        }
    }

    /// Root handles in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Child handles of a node (empty for stale handles)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if the graph has no live nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live part nodes
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    // ============== Transforms ==============

    /// Local transform of a node
    pub fn local_transform(&self, id: NodeId) -> Option<Transform> {
        self.node(id).map(|node| node.local)
    }

    /// Local-space position of a node
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|node| node.local.translation)
    }

    /// Overwrite the local-space position of a node.
    ///
    /// Returns false (and writes nothing) for stale handles.
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.local.translation = position;
                true
            }
            None => false,
        }
    }

    /// World matrix of a node, composed from all ancestor transforms
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.node(id)?;
        let mut world = node.local.to_mat4();
        let mut cur = node.parent;
        while let Some(p) = cur {
            let parent = &self.nodes[p.index as usize];
            world = parent.local.to_mat4() * world;
            cur = parent.parent;
        }
        Some(world)
    }

    /// World-space position of a node
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id)
            .map(|m| m.transform_point3(Vec3::ZERO))
    }

    // ============== Materials ==============

    /// Display material of a part node
    pub fn material(&self, id: NodeId) -> Option<Material> {
        self.node(id).and_then(Node::part).map(|part| part.material)
    }

    /// Replace the display material of a part node.
    ///
    /// Returns false for stale handles and group nodes.
    pub fn set_material(&mut self, id: NodeId, material: Material) -> bool {
        match self.node_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Part(part)) => {
                part.material = material;
                true
            }
            _ => false,
        }
    }

    // ============== Traversal ==============

    /// Pre-order depth-first walk over every root
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(self, self.roots.iter().map(|&r| (r, Mat4::IDENTITY)))
    }

    /// Pre-order depth-first walk over the subtree rooted at `root`.
    ///
    /// World matrices include the transforms of `root`'s ancestors.
    /// A stale `root` yields nothing.
    pub fn depth_first_from(&self, root: NodeId) -> DepthFirst<'_> {
        let parent_world = self
            .node(root)
            .and_then(Node::parent)
            .and_then(|p| self.world_transform(p))
            .unwrap_or(Mat4::IDENTITY);
        let start = self.contains(root).then_some((root, parent_world));
        DepthFirst::new(self, start)
    }
}

/// Scene-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    /// Reading or writing a scene file failed
    #[error("IO error: {0}")]
    Io(String),
    /// Encoding a scene description failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Decoding a scene description failed
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// The requested parent is not a live node
    #[error("Parent node not found: {0}")]
    InvalidParent(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(mesh: &str) -> PartData {
        PartData::new(mesh)
    }

    #[test]
    fn test_add_nodes() {
        let mut scene = SceneGraph::new("test");
        let root = scene.add_group("root", Transform::IDENTITY, None).unwrap();
        let a = scene
            .add_part("a", Transform::IDENTITY, part("a"), Some(root))
            .unwrap();
        let b = scene
            .add_part("b", Transform::IDENTITY, part("b"), Some(root))
            .unwrap();

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.part_count(), 2);
        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.children(root), &[a, b]);
        assert_eq!(scene.node(a).unwrap().parent(), Some(root));
        assert!(scene.node(a).unwrap().is_part());
        assert!(!scene.node(root).unwrap().is_part());
    }

    #[test]
    fn test_invalid_parent_rejected() {
        let mut scene = SceneGraph::new("test");
        let root = scene.add_group("root", Transform::IDENTITY, None).unwrap();
        scene.remove_node(root);

        let result = scene.add_group("orphan", Transform::IDENTITY, Some(root));
        assert!(matches!(result, Err(SceneError::InvalidParent(id)) if id == root));
    }

    #[test]
    fn test_remove_subtree_makes_handles_stale() {
        let mut scene = SceneGraph::new("test");
        let root = scene.add_group("root", Transform::IDENTITY, None).unwrap();
        let group = scene
            .add_group("group", Transform::IDENTITY, Some(root))
            .unwrap();
        let leaf = scene
            .add_part("leaf", Transform::IDENTITY, part("leaf"), Some(group))
            .unwrap();

        assert!(scene.remove_node(group));
        assert!(!scene.contains(group));
        assert!(!scene.contains(leaf));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.part_count(), 0);
        assert!(!scene.remove_node(leaf));
        assert!(!scene.set_position(leaf, Vec3::ONE));
    }

    #[test]
    fn test_reused_slot_does_not_alias() {
        let mut scene = SceneGraph::new("test");
        let old = scene
            .add_part("old", Transform::IDENTITY, part("old"), None)
            .unwrap();
        scene.remove_node(old);
        let new = scene
            .add_part("new", Transform::IDENTITY, part("new"), None)
            .unwrap();

        assert_eq!(old.index, new.index);
        assert_ne!(old, new);
        assert!(scene.node(old).is_none());
        assert_eq!(scene.node(new).unwrap().name, "new");
    }

    #[test]
    fn test_world_transform_composes_ancestors() {
        let mut scene = SceneGraph::new("test");
        let root = scene
            .add_group(
                "root",
                Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)).with_scale(Vec3::splat(2.0)),
                None,
            )
            .unwrap();
        let leaf = scene
            .add_part(
                "leaf",
                Transform::from_translation(Vec3::new(1.0, 1.0, 0.0)),
                part("leaf"),
                Some(root),
            )
            .unwrap();

        let world = scene.world_position(leaf).unwrap();
        assert!(world.abs_diff_eq(Vec3::new(7.0, 2.0, 0.0), 1e-6));
        assert_eq!(scene.position(leaf), Some(Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_set_material_only_on_parts() {
        let mut scene = SceneGraph::new("test");
        let group = scene.add_group("g", Transform::IDENTITY, None).unwrap();
        let leaf = scene
            .add_part("p", Transform::IDENTITY, part("p"), Some(group))
            .unwrap();

        assert!(!scene.set_material(group, Material::metallic()));
        assert!(scene.set_material(leaf, Material::metallic()));
        assert_eq!(scene.material(leaf), Some(Material::metallic()));
        assert_eq!(scene.material(group), None);
    }

    #[test]
    fn test_distinct_scene_ids() {
        assert_ne!(SceneGraph::new("a").id(), SceneGraph::new("b").id());
    }
}
