//! Pose updates
//!
//! Every update recomputes positions from the cached rest pose, so repeated
//! calls never accumulate error and the call order does not matter.

use crate::scene::SceneGraph;

use super::table::PartTable;

/// Move every part of `table` to `rest + direction * factor * scale`.
///
/// `factor` is not clamped. Records whose node no longer exists are skipped;
/// a table extracted from another scene graph writes nothing. Returns the
/// number of nodes written.
pub fn apply_explosion(
    table: &PartTable,
    scene: &mut SceneGraph,
    factor: f32,
    scale: f32,
) -> usize {
    if table.is_empty() {
        return 0;
    }
    if table.scene_id() != Some(scene.id()) {
        tracing::trace!(
            "Part table does not belong to scene '{}', skipping {} records",
            scene.name,
            table.len()
        );
        return 0;
    }

    let displacement = factor * scale;
    let mut written = 0;
    for record in table {
        if scene.set_position(record.handle, record.position_at(displacement)) {
            written += 1;
        } else {
            tracing::trace!("Skipping stale part handle {}", record.handle);
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::explode::extract_parts;
    use crate::scene::{NodeId, PartData, Transform};

    const SCALE: f32 = 30.0;

    fn three_parts() -> (SceneGraph, PartTable, [NodeId; 3]) {
        let mut scene = SceneGraph::new("three");
        let root = scene.add_group("root", Transform::IDENTITY, None).unwrap();
        let mut ids = Vec::new();
        for at in [Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO] {
            ids.push(
                scene
                    .add_part("p", Transform::from_translation(at), PartData::new("p"), Some(root))
                    .unwrap(),
            );
        }
        let table = extract_parts(&mut scene, Vec3::ZERO);
        (scene, table, [ids[0], ids[1], ids[2]])
    }

    #[test]
    fn test_half_factor_scenario() {
        let (mut scene, table, ids) = three_parts();
        assert_eq!(apply_explosion(&table, &mut scene, 0.5, SCALE), 3);

        let p = scene.position(ids[0]).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(25.0, 0.0, 0.0), 1e-4));
        let p = scene.position(ids[1]).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 25.0, 0.0), 1e-4));

        // The origin part moved 15 units along its random direction
        let p = scene.position(ids[2]).unwrap();
        assert!((p.length() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_factor_restores_rest_exactly() {
        let (mut scene, table, _) = three_parts();
        apply_explosion(&table, &mut scene, 0.8, SCALE);
        apply_explosion(&table, &mut scene, 0.0, SCALE);

        for record in &table {
            assert_eq!(scene.position(record.handle), Some(record.rest_position));
        }
    }

    #[test]
    fn test_full_factor() {
        let (mut scene, table, _) = three_parts();
        apply_explosion(&table, &mut scene, 1.0, SCALE);

        for record in &table {
            let expected = record.rest_position + record.direction * SCALE;
            assert!(scene.position(record.handle).unwrap().abs_diff_eq(expected, 1e-4));
        }
    }

    #[test]
    fn test_idempotent() {
        let (mut scene, table, ids) = three_parts();
        apply_explosion(&table, &mut scene, 0.37, SCALE);
        let once: Vec<_> = ids.iter().map(|&id| scene.position(id)).collect();
        apply_explosion(&table, &mut scene, 0.37, SCALE);
        let twice: Vec<_> = ids.iter().map(|&id| scene.position(id)).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_drift_after_many_updates() {
        let (mut scene, table, ids) = three_parts();
        for i in 0..1000 {
            apply_explosion(&table, &mut scene, (i % 100) as f32 * 0.01, SCALE);
        }
        apply_explosion(&table, &mut scene, 0.25, SCALE);
        let mut fresh = scene.clone();
        apply_explosion(&table, &mut fresh, 0.25, SCALE);
        for id in ids {
            assert_eq!(scene.position(id), fresh.position(id));
        }
    }

    #[test]
    fn test_separation_is_monotonic() {
        let (mut scene, table, _) = three_parts();
        let mut last = vec![0.0_f32; table.len()];
        for step in 1..=20 {
            apply_explosion(&table, &mut scene, step as f32 / 20.0, SCALE);
            for (i, record) in table.iter().enumerate() {
                let distance = scene
                    .position(record.handle)
                    .unwrap()
                    .distance(record.rest_position);
                assert!(distance > last[i]);
                last[i] = distance;
            }
        }
    }

    #[test]
    fn test_out_of_range_factor_extrapolates() {
        let (mut scene, table, ids) = three_parts();
        apply_explosion(&table, &mut scene, -0.5, SCALE);
        assert!(scene.position(ids[0]).unwrap().abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), 1e-4));
        apply_explosion(&table, &mut scene, 2.0, SCALE);
        assert!(scene.position(ids[0]).unwrap().abs_diff_eq(Vec3::new(70.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_empty_table_is_noop() {
        let mut scene = SceneGraph::new("empty");
        let table = extract_parts(&mut scene, Vec3::ZERO);
        assert_eq!(apply_explosion(&table, &mut scene, 1.0, SCALE), 0);
        assert_eq!(apply_explosion(&PartTable::empty(), &mut scene, 0.5, SCALE), 0);
    }

    #[test]
    fn test_stale_handles_are_skipped() {
        let (mut scene, table, ids) = three_parts();
        scene.remove_node(ids[1]);

        assert_eq!(apply_explosion(&table, &mut scene, 1.0, SCALE), 2);
        assert!(scene.position(ids[0]).unwrap().abs_diff_eq(Vec3::new(40.0, 0.0, 0.0), 1e-4));
        assert_eq!(scene.position(ids[1]), None);
    }

    #[test]
    fn test_foreign_scene_untouched() {
        let (_, table, _) = three_parts();
        let (mut other, _, other_ids) = three_parts();

        assert_eq!(apply_explosion(&table, &mut other, 1.0, SCALE), 0);
        assert_eq!(other.position(other_ids[0]), Some(Vec3::new(10.0, 0.0, 0.0)));
    }
}
