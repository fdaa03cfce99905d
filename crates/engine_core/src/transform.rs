//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Transform a point from local space into the parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (point * self.scale)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate around the world Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Turn so that the local +Z axis, the way models face, points at `target`.
    ///
    /// Leaves the rotation untouched when the target coincides with the
    /// position or lies straight along `up`.
    pub fn face_towards(&mut self, target: Vec3, up: Vec3) {
        let facing = (target - self.position).normalize_or_zero();
        if facing.length_squared() < 0.0001 {
            return;
        }
        let right = up.cross(facing);
        if right.length_squared() < 1e-8 {
            return;
        }
        let right = right.normalize();
        let corrected_up = facing.cross(right).normalize();
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, corrected_up, facing));
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_towards_turns_local_z_at_target() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 1.0));
        t.face_towards(Vec3::new(11.0, 0.0, 1.0), Vec3::Y);
        let facing = t.rotation * Vec3::Z;
        assert!((facing - Vec3::X).length() < 1e-5, "facing was {facing:?}");
        // forward() stays the opposite axis.
        assert!((t.forward() + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn face_towards_keeps_upright() {
        let mut t = Transform::default();
        t.face_towards(Vec3::new(-3.0, 0.0, 4.0), Vec3::Y);
        assert!((t.rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
        assert!((t.rotation * Vec3::Z - Vec3::new(-0.6, 0.0, 0.8)).length() < 1e-5);
    }

    #[test]
    fn face_towards_same_point_keeps_rotation() {
        let rotation = Quat::from_rotation_y(0.7);
        let mut t = Transform::from_position_rotation(Vec3::splat(3.0), rotation);
        t.face_towards(Vec3::splat(3.0), Vec3::Y);
        assert_eq!(t.rotation, rotation);
    }

    #[test]
    fn face_towards_straight_up_keeps_rotation() {
        let mut t = Transform::default();
        t.face_towards(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn transform_point_applies_scale_then_rotation_then_translation() {
        let t = Transform {
            position: Vec3::new(0.0, 5.0, 0.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let p = t.transform_point(Vec3::X);
        assert!((p - Vec3::new(0.0, 5.0, -2.0)).length() < 1e-5, "got {p:?}");
    }

    #[test]
    fn raw_matrix_carries_translation() {
        let raw = TransformRaw::from(Transform::from_position(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(raw.model[3], [4.0, 5.0, 6.0, 1.0]);
    }
}
