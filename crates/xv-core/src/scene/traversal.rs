//! Depth-first traversal with accumulated world matrices

use glam::Mat4;

use super::SceneGraph;
use super::types::{Node, NodeId};

/// Pre-order depth-first iterator over a scene graph.
///
/// Yields each node with its world matrix. Uses an explicit stack, so graph
/// depth is bounded by memory rather than the call stack.
pub struct DepthFirst<'a> {
    graph: &'a SceneGraph,
    /// Pending nodes paired with their parent's world matrix
    stack: Vec<(NodeId, Mat4)>,
}

impl<'a> DepthFirst<'a> {
    pub(super) fn new(
        graph: &'a SceneGraph,
        starts: impl IntoIterator<Item = (NodeId, Mat4)>,
    ) -> Self {
        let mut stack: Vec<_> = starts.into_iter().collect();
        stack.reverse();
        Self { graph, stack }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (NodeId, &'a Node, Mat4);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, parent_world) = self.stack.pop()?;
        let node = &self.graph.nodes[id.index as usize];
        let world = parent_world * node.local.to_mat4();
        self.stack
            .extend(node.children.iter().rev().map(|&child| (child, world)));
        Some((id, node, world))
    }
}
