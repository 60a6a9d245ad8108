//! Read-only view of the world for a renderer, taken once per frame after updates.

use engine_core::{Entity, Mat4, Transform, TransformRaw, Vec3};

use crate::game::Game;

/// Camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// World-to-view matrix.
    pub view: Mat4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StainInstance {
    /// World-space decal matrix (scaled by radius).
    pub model: Mat4,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetInstance {
    pub entity: Entity,
    pub type_index: usize,
    pub instance: TransformRaw,
    pub color: [f32; 3],
    pub stains: Vec<StainInstance>,
}

/// One renderable body of a splash (the primary sphere or a droplet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashBody {
    pub position: Vec3,
    pub radius: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub view: ViewSnapshot,
    pub targets: Vec<TargetInstance>,
    pub splashes: Vec<SplashBody>,
}

impl Game {
    pub fn snapshot(&self) -> RenderSnapshot {
        let player = self.player();
        let view = ViewSnapshot {
            position: player.eye_position(),
            yaw: player.yaw(),
            pitch: player.pitch(),
            view: player.transform.to_matrix().inverse(),
        };

        let mut targets = Vec::with_capacity(self.targets().len());
        self.targets().for_each(|entity, transform, target| {
            let model = transform.to_matrix();
            let stains = target
                .stains
                .iter()
                .map(|stain| {
                    let local = Transform {
                        position: stain.local_position,
                        rotation: stain.rotation,
                        scale: Vec3::splat(stain.radius),
                    };
                    StainInstance {
                        model: model * local.to_matrix(),
                        color: stain.color,
                    }
                })
                .collect();
            targets.push(TargetInstance {
                entity,
                type_index: target.type_index,
                instance: TransformRaw::from(transform),
                color: target.color,
                stains,
            });
        });

        let mut splashes = Vec::new();
        for splash in self.effects().splashes() {
            splashes.push(SplashBody {
                position: splash.position,
                radius: splash.radius,
                scale: splash.scale,
                opacity: splash.opacity,
                color: splash.color,
            });
            splashes.extend(splash.droplets.iter().map(|d| SplashBody {
                position: d.position,
                radius: d.radius,
                scale: 1.0,
                opacity: d.opacity,
                color: splash.color,
            }));
        }

        RenderSnapshot { view, targets, splashes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::spawner::SpawnPlan;
    use input::MoveIntents;

    #[test]
    fn snapshot_lists_targets_with_stains() {
        let mut g = Game::new(GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        });
        g.start_round();
        let ray = g.player().aim_ray();
        let t = (1.0 - ray.origin.y) / ray.direction.y;
        let p = ray.point_at(t);
        let car = g.targets_mut().spawn(SpawnPlan {
            type_index: 0,
            position: Vec3::new(p.x, 0.0, p.z),
            direction: 1.0,
            speed: 0.0,
            color: [0.5; 3],
        });
        g.fire();
        g.frame(0.016, &MoveIntents::default(), engine_core::Vec2::ZERO);

        let snap = g.snapshot();
        let inst = snap.targets.iter().find(|t| t.entity == car).expect("car listed");
        assert_eq!(inst.color, [0.5; 3]);
        assert_eq!(inst.stains.len(), 1);
        // Primary body plus 5..=9 droplets.
        assert!(snap.splashes.len() >= 6 && snap.splashes.len() <= 10);
        assert!((snap.view.position - g.player().eye_position()).length() < 1e-6);
    }
}
