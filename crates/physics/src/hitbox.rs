//! Compound bounding geometry for moving targets.

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Point3, Vector3};
use rapier3d::parry::query::{Ray, RayCast};
use rapier3d::parry::shape::{Ball, Capsule, Cuboid};

use crate::AimRay;

/// One primitive volume of a hitbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Axis-aligned box (in the owner's local frame) given by half extents.
    Cuboid { half_extents: Vec3 },
    /// Y-aligned capsule: half height of the cylindrical section plus radius.
    Capsule { half_height: f32, radius: f32 },
    /// Sphere.
    Ball { radius: f32 },
}

impl HitShape {
    /// Box from full width/height/depth.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::new(width, height, depth) * 0.5,
        }
    }

    fn cast(&self, iso: &Isometry3<f32>, ray: &Ray, max_distance: f32) -> Option<(f32, Vector3<f32>)> {
        let hit = match *self {
            HitShape::Cuboid { half_extents } => {
                let shape = Cuboid::new(Vector3::new(half_extents.x, half_extents.y, half_extents.z));
                shape.cast_ray_and_get_normal(iso, ray, max_distance, true)
            }
            HitShape::Capsule { half_height, radius } => {
                let shape = Capsule::new_y(half_height, radius);
                shape.cast_ray_and_get_normal(iso, ray, max_distance, true)
            }
            HitShape::Ball { radius } => {
                let shape = Ball::new(radius);
                shape.cast_ray_and_get_normal(iso, ray, max_distance, true)
            }
        };
        hit.map(|i| (i.time_of_impact, i.normal))
    }
}

/// A shape placed at an offset from its owner's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPart {
    pub shape: HitShape,
    pub offset: Vec3,
}

impl HitPart {
    pub fn new(shape: HitShape, offset: Vec3) -> Self {
        Self { shape, offset }
    }
}

/// Intersection of a ray with one hitbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Distance along the (unit) ray.
    pub distance: f32,
    /// World-space impact point.
    pub point: Vec3,
    /// World-space outward surface normal.
    pub normal: Vec3,
}

/// Union of primitive parts that together bound one target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hitbox {
    pub parts: Vec<HitPart>,
}

impl Hitbox {
    pub fn new(parts: Vec<HitPart>) -> Self {
        Self { parts }
    }

    /// Cast `ray` against this hitbox placed at `position` and rotated by `yaw` about +Y.
    ///
    /// Returns the closest part hit within `max_distance`, or `None`.
    pub fn cast(&self, ray: &AimRay, position: Vec3, yaw: f32, max_distance: f32) -> Option<ShapeHit> {
        let parry_ray = Ray::new(
            Point3::new(ray.origin.x, ray.origin.y, ray.origin.z),
            Vector3::new(ray.direction.x, ray.direction.y, ray.direction.z),
        );
        let rotation = Quat::from_rotation_y(yaw);

        let mut best: Option<ShapeHit> = None;
        for part in &self.parts {
            let center = position + rotation * part.offset;
            let iso = Isometry3::new(
                Vector3::new(center.x, center.y, center.z),
                Vector3::new(0.0, yaw, 0.0),
            );
            let Some((distance, normal)) = part.shape.cast(&iso, &parry_ray, max_distance) else {
                continue;
            };
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(ShapeHit {
                    distance,
                    point: ray.point_at(distance),
                    normal: Vec3::new(normal.x, normal.y, normal.z).normalize_or_zero(),
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn crate_box() -> Hitbox {
        Hitbox::new(vec![HitPart::new(HitShape::cuboid(2.0, 2.0, 2.0), Vec3::new(0.0, 1.0, 0.0))])
    }

    #[test]
    fn hitbox_cast_reports_front_face() {
        let ray = AimRay::new(Vec3::new(0.0, 1.0, -10.0), Vec3::Z);
        let hit = crate_box().cast(&ray, Vec3::ZERO, 0.0, 100.0).expect("box in front of ray");
        assert!((hit.distance - 9.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn hitbox_cast_respects_max_distance() {
        let ray = AimRay::new(Vec3::new(0.0, 1.0, -10.0), Vec3::Z);
        assert!(crate_box().cast(&ray, Vec3::ZERO, 0.0, 5.0).is_none());
    }

    #[test]
    fn hitbox_cast_misses_beside_target() {
        let ray = AimRay::new(Vec3::new(5.0, 1.0, -10.0), Vec3::Z);
        assert!(crate_box().cast(&ray, Vec3::ZERO, 0.0, 100.0).is_none());
    }

    #[test]
    fn hitbox_offset_follows_yaw() {
        // Part sits 3 units along local +X; yawed by PI it ends up at world -X.
        let hb = Hitbox::new(vec![HitPart::new(HitShape::Ball { radius: 0.5 }, Vec3::new(3.0, 0.0, 0.0))]);
        let ray = AimRay::new(Vec3::new(-3.0, 0.0, -10.0), Vec3::Z);
        assert!(hb.cast(&ray, Vec3::ZERO, PI, 100.0).is_some());
        assert!(hb.cast(&ray, Vec3::ZERO, 0.0, 100.0).is_none());
    }

    #[test]
    fn hitbox_picks_nearest_part() {
        let hb = Hitbox::new(vec![
            HitPart::new(HitShape::Ball { radius: 0.5 }, Vec3::new(0.0, 0.0, 4.0)),
            HitPart::new(HitShape::Capsule { half_height: 0.5, radius: 0.5 }, Vec3::new(0.0, 0.0, 0.0)),
        ]);
        let ray = AimRay::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let hit = hb.cast(&ray, Vec3::ZERO, 0.0, 100.0).expect("hit");
        assert!((hit.distance - 9.5).abs() < 1e-4);
    }
}
