//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

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

    /// Create a new transform with position and a rotation about +Y.
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
            ..Default::default()
        }
    }

    /// First-person view orientation: yaw about +Y, then pitch about the local X axis.
    pub fn view_rotation(yaw: f32, pitch: f32) -> Quat {
        Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotation angle about +Y.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }

    /// Map a world-space point into this transform's local space.
    pub fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position) / self.scale
    }

    /// Map a local-space point into world space.
    pub fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (point * self.scale)
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
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
    use std::f32::consts::PI;

    #[test]
    fn transform_view_rotation_yaw_pi_faces_positive_z() {
        let t = Transform {
            rotation: Transform::view_rotation(PI, 0.0),
            ..Default::default()
        };
        let f = t.forward();
        assert!((f - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn transform_negative_pitch_looks_down() {
        let t = Transform {
            rotation: Transform::view_rotation(PI, -0.3),
            ..Default::default()
        };
        assert!(t.forward().y < 0.0);
    }

    #[test]
    fn transform_world_local_roundtrip_with_yaw() {
        let t = Transform::from_position_yaw(Vec3::new(3.0, 0.0, 15.0), PI);
        let world = Vec3::new(2.0, 1.0, 16.0);
        let local = t.world_to_local(world);
        assert!((local - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-5);
        assert!((t.local_to_world(local) - world).length() < 1e-5);
    }
}
