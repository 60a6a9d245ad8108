//! Colour splashes and target stains.
//!
//! A splash is a fading sphere with a handful of droplets that fall under
//! gravity and settle on the ground. Stains are flat decals stored in a
//! target's local frame so they ride along with it.

use engine_core::{Entity, Quat, Vec3};
use glam::EulerRot;
use rand::prelude::*;
use std::f32::consts::PI;

use crate::character::rgb;
use crate::targets::TargetManager;

pub const HOLI_PALETTE: [u32; 8] = [
    0xff1493, 0xff6b35, 0xffd93d, 0x6bcb77, 0x4d96ff, 0x9b59b6, 0xff4757, 0x00d2d3,
];

const SPLASH_RADIUS: f32 = 0.3;
const SURFACE_OFFSET: f32 = 0.1;
const DROPLET_GRAVITY: f32 = 15.0;
const DROPLET_FLOOR: f32 = 0.1;
/// Shortest splash lifetime accepted, in seconds.
pub const MIN_LIFETIME: f32 = 0.05;

/// Paint decal on a target, in the target's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stain {
    pub local_position: Vec3,
    pub rotation: Quat,
    pub radius: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Droplet {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub opacity: f32,
}

/// One splash: the primary body plus its droplets.
#[derive(Debug, Clone, PartialEq)]
pub struct Splash {
    pub position: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    /// Coordinator clock at creation.
    pub created_at: f32,
    pub opacity: f32,
    pub scale: f32,
    pub droplets: Vec<Droplet>,
}

impl Splash {
    fn animate(&mut self, ratio: f32, dt: f32) {
        self.opacity = 0.9 * (1.0 - ratio * 0.5);
        self.scale = 1.0 + ratio * 0.5;
        for d in &mut self.droplets {
            d.velocity.y -= DROPLET_GRAVITY * dt;
            d.position += d.velocity * dt;
            if d.position.y < DROPLET_FLOOR {
                d.position.y = DROPLET_FLOOR;
                d.velocity = Vec3::ZERO;
            }
            d.opacity = 0.8 * (1.0 - ratio);
        }
    }
}

/// Owns every live splash and paints stains onto targets.
pub struct EffectCoordinator {
    lifetime: f32,
    clock: f32,
    splashes: Vec<Splash>,
    rng: StdRng,
}

impl EffectCoordinator {
    pub fn new(lifetime: f32, seed: Option<u64>) -> Self {
        Self {
            lifetime: if lifetime.is_finite() { lifetime.max(MIN_LIFETIME) } else { MIN_LIFETIME },
            clock: 0.0,
            splashes: Vec::new(),
            rng: match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            },
        }
    }

    fn random_color(&mut self) -> [f32; 3] {
        rgb(HOLI_PALETTE[self.rng.gen_range(0..HOLI_PALETTE.len())])
    }

    /// Burst of colour at `point`, lifted off the surface along `normal`.
    pub fn spawn_splash(&mut self, point: Vec3, normal: Vec3) {
        let color = self.random_color();
        let position = point + normal.normalize_or_zero() * SURFACE_OFFSET;

        let count = 5 + (self.rng.gen::<f32>() * 5.0) as usize;
        let mut droplets = Vec::with_capacity(count);
        for _ in 0..count {
            let r = &mut self.rng;
            let scatter = Vec3::new(
                (r.gen::<f32>() - 0.5) * 1.5,
                r.gen::<f32>(),
                (r.gen::<f32>() - 0.5) * 1.5,
            );
            let velocity = Vec3::new(
                (r.gen::<f32>() - 0.5) * 3.0,
                r.gen::<f32>() * 4.0 + 2.0,
                (r.gen::<f32>() - 0.5) * 3.0,
            );
            droplets.push(Droplet {
                position: point + scatter,
                velocity,
                radius: 0.1 + r.gen::<f32>() * 0.15,
                opacity: 0.8,
            });
        }

        log::trace!("splash at {:?} with {} droplets", position, count);
        self.splashes.push(Splash {
            position,
            radius: SPLASH_RADIUS,
            color,
            created_at: self.clock,
            opacity: 0.9,
            scale: 1.0,
            droplets,
        });
    }

    /// Decal on a live target at world-space `point`. Returns false if the
    /// target is gone.
    pub fn spawn_stain(&mut self, targets: &mut TargetManager, entity: Entity, point: Vec3) -> bool {
        let Some(transform) = targets.transform(entity) else {
            return false;
        };
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rng.gen::<f32>() * PI,
            self.rng.gen::<f32>() * PI,
            self.rng.gen::<f32>() * PI,
        );
        let stain = Stain {
            local_position: transform.world_to_local(point),
            rotation,
            radius: 0.3 + self.rng.gen::<f32>() * 0.2,
            color: self.random_color(),
        };
        targets.attach_stain(entity, stain)
    }

    /// Age, animate and expire splashes.
    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        let now = self.clock;
        let lifetime = self.lifetime;
        self.splashes.retain(|s| now - s.created_at <= lifetime);
        for splash in &mut self.splashes {
            let ratio = ((now - splash.created_at) / lifetime).clamp(0.0, 1.0);
            splash.animate(ratio, dt);
        }
    }

    pub fn clear(&mut self) {
        self.splashes.clear();
    }

    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    pub fn len(&self) -> usize {
        self.splashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splashes.is_empty()
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::{SpawnPlan, TargetSpawner};
    use crate::targets::{RoadBounds, TargetCatalog};

    #[test]
    fn effects_splash_lives_for_lifetime() {
        let mut fx = EffectCoordinator::new(0.8, Some(1));
        fx.update(1.0);
        fx.spawn_splash(Vec3::new(0.0, 1.0, 10.0), Vec3::NEG_Z);
        fx.update(0.01);
        assert_eq!(fx.len(), 1);
        fx.update(0.7);
        assert_eq!(fx.len(), 1);
        fx.update(0.1);
        assert!(fx.is_empty());
    }

    #[test]
    fn effects_splash_shape() {
        let mut fx = EffectCoordinator::new(0.8, Some(2));
        for _ in 0..50 {
            fx.spawn_splash(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        }
        for s in fx.splashes() {
            assert!((s.position - Vec3::new(1.0, 2.1, 3.0)).length() < 1e-5);
            assert!((5..=9).contains(&s.droplets.len()));
            for d in &s.droplets {
                assert!(d.radius >= 0.1 && d.radius <= 0.25);
                assert!(d.velocity.y >= 2.0 && d.velocity.y <= 6.0);
            }
        }
    }

    #[test]
    fn effects_fade_and_droplets_settle() {
        let mut fx = EffectCoordinator::new(0.8, Some(3));
        fx.spawn_splash(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        for _ in 0..45 {
            fx.update(1.0 / 60.0);
        }
        let s = &fx.splashes()[0];
        assert!(s.opacity < 0.9 && s.opacity > 0.45);
        assert!(s.scale > 1.0 && s.scale < 1.5);
        for d in &s.droplets {
            assert!(d.position.y >= DROPLET_FLOOR);
            assert!(d.opacity < 0.8);
        }
    }

    #[test]
    fn effects_splash_outlives_its_target() {
        let mut targets = TargetManager::new(
            TargetCatalog::builtin(),
            RoadBounds::default(),
            TargetSpawner::new(100.0, Some(0)),
        );
        let ped = targets.spawn(SpawnPlan {
            type_index: 1,
            position: Vec3::new(0.0, 0.0, 15.0),
            direction: 1.0,
            speed: 3.0,
            color: [1.0; 3],
        });
        let mut fx = EffectCoordinator::new(0.8, Some(4));
        fx.spawn_splash(Vec3::new(0.0, 1.2, 14.7), Vec3::NEG_Z);
        targets.register_hit(ped);
        targets.register_hit(ped);
        assert!(targets.is_empty());
        fx.update(0.1);
        assert_eq!(fx.len(), 1);
    }

    #[test]
    fn effects_stain_is_stored_in_target_space() {
        let mut targets = TargetManager::new(
            TargetCatalog::builtin(),
            RoadBounds::default(),
            TargetSpawner::new(100.0, Some(0)),
        );
        let car = targets.spawn(SpawnPlan {
            type_index: 0,
            position: Vec3::new(10.0, 0.0, 15.0),
            direction: -1.0,
            speed: 5.0,
            color: [1.0; 3],
        });
        let mut fx = EffectCoordinator::new(0.8, Some(5));
        assert!(fx.spawn_stain(&mut targets, car, Vec3::new(11.0, 1.0, 14.0)));
        let stain = targets.target(car).expect("live").stains[0];
        // Yawed by PI: world +X is local -X.
        assert!((stain.local_position - Vec3::new(-1.0, 1.0, 1.0)).length() < 1e-4);
        assert!(stain.radius >= 0.3 && stain.radius <= 0.5);

        for _ in 0..3 {
            targets.register_hit(car);
        }
        assert!(!fx.spawn_stain(&mut targets, car, Vec3::ZERO));
    }

    #[test]
    fn effects_zero_lifetime_stays_finite() {
        let mut fx = EffectCoordinator::new(0.0, Some(7));
        assert_eq!(fx.lifetime(), MIN_LIFETIME);
        fx.spawn_splash(Vec3::ZERO, Vec3::Y);
        fx.update(0.0);
        let s = &fx.splashes()[0];
        assert!(s.opacity.is_finite() && s.scale.is_finite());
    }

    #[test]
    fn effects_clear_drops_everything() {
        let mut fx = EffectCoordinator::new(0.8, Some(6));
        fx.spawn_splash(Vec3::ZERO, Vec3::Y);
        fx.spawn_splash(Vec3::ONE, Vec3::Y);
        fx.clear();
        assert!(fx.is_empty());
    }
}
