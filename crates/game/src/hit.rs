//! Aim ray resolution: nearest live target, else the ground plane.

use engine_core::{Entity, Vec3};
use physics::{raycast_ground, raycast_nearest, AimRay};

use crate::targets::TargetManager;

/// Height of the ground reference plane used for misses.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Where a shot landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Target {
        entity: Entity,
        point: Vec3,
        normal: Vec3,
        distance: f32,
    },
    Ground {
        point: Vec3,
        normal: Vec3,
    },
}

impl HitOutcome {
    pub fn point(&self) -> Vec3 {
        match *self {
            HitOutcome::Target { point, .. } | HitOutcome::Ground { point, .. } => point,
        }
    }

    pub fn normal(&self) -> Vec3 {
        match *self {
            HitOutcome::Target { normal, .. } | HitOutcome::Ground { normal, .. } => normal,
        }
    }
}

/// Nearest target the ray strikes within `max_distance`, falling back to the
/// ground plane. `None` only when the ray misses every target and never
/// reaches the ground (aimed level or upward).
pub fn resolve(ray: &AimRay, targets: &TargetManager, max_distance: f32) -> Option<HitOutcome> {
    if let Some(hit) = raycast_nearest(ray, targets.hit_candidates(), max_distance) {
        return Some(HitOutcome::Target {
            entity: hit.target,
            point: hit.point,
            normal: hit.normal,
            distance: hit.distance,
        });
    }
    raycast_ground(ray, GROUND_HEIGHT).map(|(point, normal)| HitOutcome::Ground { point, normal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::{SpawnPlan, TargetSpawner};
    use crate::targets::{RoadBounds, TargetCatalog};

    fn manager() -> TargetManager {
        TargetManager::new(
            TargetCatalog::builtin(),
            RoadBounds::default(),
            TargetSpawner::new(1.5, Some(0)),
        )
    }

    fn car_at(m: &mut TargetManager, x: f32, z: f32) -> Entity {
        m.spawn(SpawnPlan {
            type_index: 0,
            position: Vec3::new(x, 0.0, z),
            direction: 1.0,
            speed: 5.0,
            color: [1.0; 3],
        })
    }

    #[test]
    fn hit_picks_nearest_of_overlapping_targets() {
        let mut m = manager();
        let far = car_at(&mut m, 0.0, 20.0);
        let near = car_at(&mut m, 0.0, 12.0);
        let ray = AimRay::new(Vec3::new(0.0, 0.8, 0.0), Vec3::Z);
        match resolve(&ray, &m, 1000.0) {
            Some(HitOutcome::Target { entity, point, normal, .. }) => {
                assert_eq!(entity, near);
                assert_ne!(entity, far);
                // Car body is 2 deep, so the near face sits at z = 11.
                assert!((point.z - 11.0).abs() < 1e-3);
                assert!((normal - Vec3::NEG_Z).length() < 1e-3);
            }
            other => panic!("expected target hit, got {other:?}"),
        }
    }

    #[test]
    fn hit_miss_falls_back_to_ground() {
        let mut m = manager();
        car_at(&mut m, 30.0, 15.0);
        let ray = AimRay::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 1.0));
        match resolve(&ray, &m, 1000.0) {
            Some(HitOutcome::Ground { point, normal }) => {
                assert!((point - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
                assert_eq!(normal, Vec3::Y);
            }
            other => panic!("expected ground hit, got {other:?}"),
        }
    }

    #[test]
    fn hit_skyward_miss_resolves_nothing() {
        let m = manager();
        let ray = AimRay::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.5, 1.0));
        assert!(resolve(&ray, &m, 1000.0).is_none());
    }

    #[test]
    fn hit_respects_range() {
        let mut m = manager();
        car_at(&mut m, 0.0, 40.0);
        let ray = AimRay::new(Vec3::new(0.0, 0.8, 0.0), Vec3::Z);
        assert!(matches!(resolve(&ray, &m, 1000.0), Some(HitOutcome::Target { .. })));
        assert!(!matches!(resolve(&ray, &m, 20.0), Some(HitOutcome::Target { .. })));
    }
}
