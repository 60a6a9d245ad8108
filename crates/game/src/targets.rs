//! Target lifecycle: spawn on a timer, drive along the road, despawn off-screen,
//! count hits up to the destruction threshold.

use engine_core::{Transform, Vec3};
use hecs::{Entity, World};
use physics::{HitPart, HitShape, Hitbox};
use std::f32::consts::PI;

use crate::character::rgb;
use crate::effects::Stain;
use crate::error::CatalogError;
use crate::spawner::{SpawnPlan, TargetSpawner};

/// Cosmetic vertical bob (does not affect hit counting or scoring).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    pub amplitude: f32,
    /// Radians per second.
    pub frequency: f32,
}

/// One entry of the closed target-type set.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetType {
    pub name: String,
    /// Full value, awarded on destruction.
    pub points: u32,
    /// Uniform speed range, units per second.
    pub speed_range: (f32, f32),
    /// Relative spawn chance; the catalog's weights must not sum above 1.
    pub spawn_weight: f32,
    /// Hits needed to destroy.
    pub hits_to_destroy: u32,
    pub bob: Option<Bob>,
    pub hitbox: Hitbox,
    pub palette: Vec<[f32; 3]>,
}

impl TargetType {
    /// Credit for a hit that does not destroy: an equal share per required hit.
    pub fn partial_points(&self) -> u32 {
        self.points / self.hits_to_destroy
    }

    pub fn car() -> Self {
        Self {
            name: "car".to_string(),
            points: 10,
            speed_range: (5.0, 12.0),
            spawn_weight: 0.4,
            hits_to_destroy: 3,
            bob: None,
            hitbox: Hitbox::new(vec![
                HitPart::new(HitShape::cuboid(4.0, 1.2, 2.0), Vec3::new(0.0, 0.8, 0.0)),
                HitPart::new(HitShape::cuboid(2.0, 0.8, 1.6), Vec3::new(-0.3, 1.7, 0.0)),
            ]),
            palette: [0xff4444, 0x4444ff, 0x44ff44, 0xffff44, 0xff44ff, 0x44ffff, 0xffffff, 0x333333]
                .into_iter()
                .map(rgb)
                .collect(),
        }
    }

    pub fn pedestrian() -> Self {
        Self {
            name: "pedestrian".to_string(),
            points: 25,
            speed_range: (2.0, 5.0),
            spawn_weight: 0.6,
            hits_to_destroy: 2,
            bob: Some(Bob {
                amplitude: 0.05,
                frequency: 10.0,
            }),
            hitbox: Hitbox::new(vec![
                HitPart::new(HitShape::Capsule { half_height: 0.4, radius: 0.3 }, Vec3::new(0.0, 1.2, 0.0)),
                HitPart::new(HitShape::Ball { radius: 0.25 }, Vec3::new(0.0, 1.95, 0.0)),
                HitPart::new(HitShape::cuboid(0.34, 0.6, 0.2), Vec3::new(0.0, 0.3, 0.0)),
            ]),
            palette: [0xff6b6b, 0x6bff6b, 0x6b6bff, 0xffff6b, 0xff6bff, 0x6bffff]
                .into_iter()
                .map(rgb)
                .collect(),
        }
    }
}

/// Validated, ordered list of target types.
#[derive(Debug, Clone)]
pub struct TargetCatalog {
    types: Vec<TargetType>,
}

impl TargetCatalog {
    pub fn new(types: Vec<TargetType>) -> Result<Self, CatalogError> {
        if types.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut total = 0.0;
        for ty in &types {
            if !ty.spawn_weight.is_finite() || ty.spawn_weight < 0.0 {
                return Err(CatalogError::BadWeight {
                    name: ty.name.clone(),
                    weight: ty.spawn_weight,
                });
            }
            if ty.hits_to_destroy == 0 {
                return Err(CatalogError::ZeroThreshold(ty.name.clone()));
            }
            let (min, max) = ty.speed_range;
            if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
                return Err(CatalogError::BadSpeedRange {
                    name: ty.name.clone(),
                    min,
                    max,
                });
            }
            total += ty.spawn_weight;
        }
        if total > 1.0 + 1e-5 {
            return Err(CatalogError::WeightsAboveOne(total));
        }
        Ok(Self { types })
    }

    /// Cars and pedestrians.
    pub fn builtin() -> Self {
        Self {
            types: vec![TargetType::car(), TargetType::pedestrian()],
        }
    }

    /// Type at `index`, or the first entry when out of range.
    pub fn get(&self, index: usize) -> &TargetType {
        self.types.get(index).unwrap_or(&self.types[0])
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetType> {
        self.types.iter()
    }
}

impl Default for TargetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The roadway targets cross, along X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub center_z: f32,
    pub width: f32,
    /// Lanes stay this much narrower than the road.
    pub lane_inset: f32,
    /// Spawn distance outside the entry bound.
    pub spawn_margin: f32,
    /// Distance past the exit bound before removal.
    pub despawn_margin: f32,
}

impl Default for RoadBounds {
    fn default() -> Self {
        Self {
            x_min: -50.0,
            x_max: 50.0,
            center_z: 15.0,
            width: 12.0,
            lane_inset: 4.0,
            spawn_margin: 5.0,
            despawn_margin: 10.0,
        }
    }
}

impl RoadBounds {
    /// Past the bound opposite the entry side.
    pub fn is_past_exit(&self, x: f32, direction: f32) -> bool {
        if direction > 0.0 {
            x > self.x_max + self.despawn_margin
        } else {
            x < self.x_min - self.despawn_margin
        }
    }
}

/// Per-target state stored alongside its `Transform`.
#[derive(Debug, Clone)]
pub struct Target {
    pub type_index: usize,
    pub speed: f32,
    /// +1 or -1 along X.
    pub direction: f32,
    pub hits: u32,
    pub color: [f32; 3],
    /// Decals in the target's local space; dropped with the target.
    pub stains: Vec<Stain>,
}

impl Target {
    /// Facing: model front is +X, so leftward travel turns it around.
    pub fn yaw(&self) -> f32 {
        if self.direction < 0.0 {
            PI
        } else {
            0.0
        }
    }
}

/// Outcome of a hit on a live target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    pub destroyed: bool,
    pub points: u32,
    pub type_index: usize,
}

/// Targets spawned and removed during one update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TargetUpdate {
    pub spawned: Vec<Entity>,
    pub despawned: Vec<Entity>,
}

/// Owns the live target set.
pub struct TargetManager {
    catalog: TargetCatalog,
    road: RoadBounds,
    world: World,
    /// Live targets in spawn order.
    live: Vec<Entity>,
    spawner: TargetSpawner,
}

impl TargetManager {
    pub fn new(catalog: TargetCatalog, road: RoadBounds, spawner: TargetSpawner) -> Self {
        Self {
            catalog,
            road,
            world: World::new(),
            live: Vec::new(),
            spawner,
        }
    }

    /// Run the spawn timer, move every target, and drop those past the exit.
    ///
    /// `time` is the simulation clock in seconds; it only drives the cosmetic bob.
    pub fn update(&mut self, dt: f32, time: f32) -> TargetUpdate {
        let mut report = TargetUpdate::default();

        for _ in 0..self.spawner.tick(dt) {
            match self.spawner.roll(&self.catalog, &self.road) {
                Some(plan) => report.spawned.push(self.spawn(plan)),
                None => log::trace!("spawn tick drew no target type"),
            }
        }

        let mut exited = Vec::new();
        for (entity, (transform, target)) in self.world.query_mut::<(&mut Transform, &Target)>() {
            transform.position.x += target.speed * target.direction * dt;
            if let Some(bob) = self.catalog.get(target.type_index).bob {
                transform.position.y = (time * bob.frequency).sin() * bob.amplitude;
            }
            if self.road.is_past_exit(transform.position.x, target.direction) {
                exited.push(entity);
            }
        }

        for entity in exited {
            if self.remove(entity).is_some() {
                log::debug!("target {:?} left the road unhit", entity);
                report.despawned.push(entity);
            }
        }

        report
    }

    /// Place a target according to `plan`.
    pub fn spawn(&mut self, plan: SpawnPlan) -> Entity {
        let target = Target {
            type_index: plan.type_index,
            speed: plan.speed,
            direction: plan.direction,
            hits: 0,
            color: plan.color,
            stains: Vec::new(),
        };
        let transform = Transform::from_position_yaw(plan.position, target.yaw());
        let entity = self.world.spawn((transform, target));
        self.live.push(entity);
        log::debug!(
            "spawned {} at x={:.1} z={:.1} heading {:+} at {:.1} u/s",
            self.catalog.get(plan.type_index).name,
            plan.position.x,
            plan.position.z,
            plan.direction,
            plan.speed
        );
        entity
    }

    /// Count a hit. Destroys the target on reaching its threshold.
    ///
    /// Returns `None` for an entity that is not (or no longer) live.
    pub fn register_hit(&mut self, entity: Entity) -> Option<HitResult> {
        if !self.is_live(entity) {
            return None;
        }
        let (hits, type_index) = {
            let mut target = self.world.get::<&mut Target>(entity).ok()?;
            target.hits += 1;
            (target.hits, target.type_index)
        };
        let ty = self.catalog.get(type_index);
        if hits >= ty.hits_to_destroy {
            let points = ty.points;
            log::debug!("{} destroyed after {} hits", ty.name, hits);
            self.remove(entity);
            Some(HitResult {
                destroyed: true,
                points,
                type_index,
            })
        } else {
            Some(HitResult {
                destroyed: false,
                points: ty.partial_points(),
                type_index,
            })
        }
    }

    /// Release a target and everything attached to it.
    fn remove(&mut self, entity: Entity) -> Option<Target> {
        let index = self.live.iter().position(|&e| e == entity)?;
        self.live.remove(index);
        let target = self.world.get::<&Target>(entity).ok().map(|t| (*t).clone())?;
        if let Err(e) = self.world.despawn(entity) {
            log::warn!("despawn of {:?} failed: {}", entity, e);
        }
        Some(target)
    }

    /// Remove every target and restart the spawn timer.
    pub fn clear(&mut self) {
        self.world.clear();
        self.live.clear();
        self.spawner.reset();
    }

    /// Attach a decal to a live target. Returns false if the target is gone.
    pub fn attach_stain(&mut self, entity: Entity, stain: Stain) -> bool {
        match self.world.get::<&mut Target>(entity) {
            Ok(mut target) => {
                target.stains.push(stain);
                true
            }
            Err(_) => false,
        }
    }

    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    /// Live targets in spawn order.
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Snapshot of a live target's state.
    pub fn target(&self, entity: Entity) -> Option<Target> {
        self.world.get::<&Target>(entity).ok().map(|t| (*t).clone())
    }

    /// `(entity, hitbox, position, yaw)` for every live target, in spawn order.
    pub fn hit_candidates(&self) -> Vec<(Entity, &Hitbox, Vec3, f32)> {
        self.live
            .iter()
            .filter_map(|&entity| {
                let transform = self.world.get::<&Transform>(entity).ok()?;
                let target = self.world.get::<&Target>(entity).ok()?;
                let hitbox = &self.catalog.get(target.type_index).hitbox;
                Some((entity, hitbox, transform.position, target.yaw()))
            })
            .collect()
    }

    /// Visit every live target in spawn order.
    pub fn for_each(&self, mut f: impl FnMut(Entity, &Transform, &Target)) {
        for &entity in &self.live {
            if let (Ok(transform), Ok(target)) =
                (self.world.get::<&Transform>(entity), self.world.get::<&Target>(entity))
            {
                f(entity, &transform, &target);
            }
        }
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.catalog
    }

    pub fn road(&self) -> &RoadBounds {
        &self.road
    }
}
