//! Local transforms of scene nodes

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation, rotation and scale of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent (the field the pose updater writes)
    pub translation: Vec3,
    /// Orientation relative to the parent
    pub rotation: Quat,
    /// Non-uniform scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform moved to `translation`
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Builder: replace the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: replace the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Matrix applying scale, then rotation, then translation
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Serializable transform (position, roll/pitch/yaw in radians, scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDescription {
    /// Translation
    #[serde(default)]
    pub xyz: [f32; 3],
    /// Roll, pitch, yaw in radians
    #[serde(default)]
    pub rpy: [f32; 3],
    /// Scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            xyz: [0.0; 3],
            rpy: [0.0; 3],
            scale: unit_scale(),
        }
    }
}

impl From<&TransformDescription> for Transform {
    fn from(desc: &TransformDescription) -> Self {
        Self {
            translation: Vec3::from(desc.xyz),
            rotation: Quat::from_euler(EulerRot::XYZ, desc.rpy[0], desc.rpy[1], desc.rpy[2]),
            scale: Vec3::from(desc.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)).with_scale(Vec3::splat(2.0));
        let p = t.to_mat4().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-6));
    }

    #[test]
    fn test_description_rotation() {
        let desc = TransformDescription {
            rpy: [0.0, 0.0, std::f32::consts::FRAC_PI_2],
            ..Default::default()
        };
        let t = Transform::from(&desc);
        let p = t.to_mat4().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::Y, 1e-6));
        assert_eq!(t.scale, Vec3::ONE);

        let expected = Transform::IDENTITY.with_rotation(Quat::from_rotation_z(desc.rpy[2]));
        assert!(t.rotation.abs_diff_eq(expected.rotation, 1e-6));
    }
}
