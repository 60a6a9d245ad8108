//! Raycasting for weapon hit detection.

use glam::Vec3;

use crate::{Hitbox, ShapeHit};

/// A ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl AimRay {
    /// Build a ray; `direction` is normalized (a zero vector stays zero and hits nothing).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a raycast query against a set of candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<T> {
    /// Candidate that was hit.
    pub target: T,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// Cast a ray against every candidate `(id, hitbox, position, yaw)` and return the nearest hit.
///
/// Equal distances keep the candidate seen first.
pub fn raycast_nearest<'a, T, I>(ray: &AimRay, candidates: I, max_distance: f32) -> Option<RaycastHit<T>>
where
    I: IntoIterator<Item = (T, &'a Hitbox, Vec3, f32)>,
{
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<RaycastHit<T>> = None;
    for (target, hitbox, position, yaw) in candidates {
        let Some(ShapeHit { distance, point, normal }) = hitbox.cast(ray, position, yaw, max_distance) else {
            continue;
        };
        let is_closer = match &best {
            None => true,
            Some(prev) => distance < prev.distance,
        };
        if is_closer {
            best = Some(RaycastHit { target, distance, point, normal });
        }
    }
    best
}

/// Intersection of a ray with the horizontal plane `y = height`.
///
/// Returns `None` when the ray runs parallel to the plane or points away from it.
pub fn raycast_ground(ray: &AimRay, height: f32) -> Option<(Vec3, Vec3)> {
    let dy = ray.direction.y;
    if dy.abs() < 1e-6 {
        return None;
    }
    let t = (height - ray.origin.y) / dy;
    if t < 0.0 {
        return None;
    }
    Some((ray.point_at(t), Vec3::Y))
}
