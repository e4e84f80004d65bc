//! Part extraction
//!
//! Walks a freshly loaded scene once, records every part's rest position and
//! derives the direction it will explode along.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ExplodeConfig;
use crate::material::MaterialPolicy;
use crate::scene::{DepthFirst, NodeId, NodeKind, SceneGraph};

use super::table::{PartRecord, PartTable};

/// Extract every part of `scene` with the default configuration.
///
/// Directions are measured from `reference_point`. Parts sitting on it get a
/// random direction, so two extractions of the same scene may differ.
pub fn extract_parts(scene: &mut SceneGraph, reference_point: Vec3) -> PartTable {
    PartExtractor::new(&ExplodeConfig::default())
        .with_reference_point(reference_point)
        .extract(scene)
}

/// Unit vector from a uniform sample of [-1, 1]^3.
///
/// Samples too short to normalize reliably are redrawn.
pub fn random_direction(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if v.length_squared() > 1e-6 {
            return v.normalize();
        }
    }
}

/// Builds [`PartTable`]s from loaded scenes
#[derive(Debug, Clone)]
pub struct PartExtractor {
    reference_point: Vec3,
    epsilon: f32,
    material: MaterialPolicy,
    rng: StdRng,
}

impl PartExtractor {
    /// Create an extractor from configuration
    pub fn new(config: &ExplodeConfig) -> Self {
        let rng = match config.explosion.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            reference_point: config.explosion.reference_point(),
            epsilon: config.explosion.degenerate_epsilon,
            material: config.material.clone(),
            rng,
        }
    }

    /// Builder: measure directions from `point`
    pub fn with_reference_point(mut self, point: Vec3) -> Self {
        self.reference_point = point;
        self
    }

    /// Reference point directions are measured from
    pub fn reference_point(&self) -> Vec3 {
        self.reference_point
    }

    /// Extract every part reachable from the scene's roots
    pub fn extract(&mut self, scene: &mut SceneGraph) -> PartTable {
        let records = self.collect(scene.depth_first());
        self.finish(scene, records)
    }

    /// Extract the parts in the subtree rooted at `root` (including `root`).
    ///
    /// A stale `root` yields an empty table bound to the scene.
    pub fn extract_subtree(&mut self, scene: &mut SceneGraph, root: NodeId) -> PartTable {
        let records = self.collect(scene.depth_first_from(root));
        self.finish(scene, records)
    }

    fn collect(&mut self, walk: DepthFirst<'_>) -> Vec<PartRecord> {
        walk.filter_map(|(handle, node, world)| match node.kind {
            NodeKind::Part(_) => Some(self.record(handle, node.local.translation, world)),
            NodeKind::Group => None,
        })
        .collect()
    }

    fn record(&mut self, handle: NodeId, rest_position: Vec3, world: Mat4) -> PartRecord {
        let raw = world.transform_point3(Vec3::ZERO) - self.reference_point;

        // NaN lengths fail the comparison and fall through to a random direction
        if raw.length() >= self.epsilon
            && let Some(direction) = raw.try_normalize()
        {
            return PartRecord {
                handle,
                rest_position,
                direction,
                randomized: false,
            };
        }

        let direction = random_direction(&mut self.rng);
        tracing::trace!(
            "Part {} sits on the reference point, exploding along {}",
            handle,
            direction
        );
        PartRecord {
            handle,
            rest_position,
            direction,
            randomized: true,
        }
    }

    fn finish(&mut self, scene: &mut SceneGraph, records: Vec<PartRecord>) -> PartTable {
        for record in &records {
            if let Some(material) = self.material.pick(&mut self.rng) {
                scene.set_material(record.handle, material);
            }
        }

        tracing::debug!(
            "Extracted {} parts ({} randomized) from scene '{}'",
            records.len(),
            records.iter().filter(|r| r.randomized).count(),
            scene.name
        );
        PartTable::new(scene.id(), records)
    }
}
