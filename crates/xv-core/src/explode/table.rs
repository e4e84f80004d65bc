//! Per-part explosion data cached at load time

use glam::Vec3;
use uuid::Uuid;

use crate::scene::NodeId;

/// Rest pose and explosion direction of one part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartRecord {
    /// Scene node this record re-poses
    pub handle: NodeId,
    /// Local-space position captured before any displacement
    pub rest_position: Vec3,
    /// Unit vector the part moves along
    pub direction: Vec3,
    /// True if the direction was drawn at random (part sat on the reference point)
    pub randomized: bool,
}

impl PartRecord {
    /// Local-space position of the part for `displacement = factor * scale`
    #[inline]
    pub fn position_at(&self, displacement: f32) -> Vec3 {
        self.rest_position + self.direction * displacement
    }
}

/// Ordered part records of one loaded scene.
///
/// Built once per load and never edited; a reload produces a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct PartTable {
    scene_id: Option<Uuid>,
    records: Vec<PartRecord>,
}

impl Default for PartTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartTable {
    /// Table bound to no scene
    pub fn empty() -> Self {
        Self {
            scene_id: None,
            records: Vec::new(),
        }
    }

    pub(crate) fn new(scene_id: Uuid, records: Vec<PartRecord>) -> Self {
        Self {
            scene_id: Some(scene_id),
            records,
        }
    }

    /// Identity of the scene graph the records point into
    pub fn scene_id(&self) -> Option<Uuid> {
        self.scene_id
    }

    /// Records in discovery order
    pub fn records(&self) -> &[PartRecord] {
        &self.records
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, PartRecord> {
        self.records.iter()
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no parts
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a scene node, if it is a part of this table
    pub fn find(&self, handle: NodeId) -> Option<&PartRecord> {
        self.records.iter().find(|r| r.handle == handle)
    }
}

impl<'a> IntoIterator for &'a PartTable {
    type Item = &'a PartRecord;
    type IntoIter = std::slice::Iter<'a, PartRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
