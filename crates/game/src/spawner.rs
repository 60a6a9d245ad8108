//! Fixed-interval target spawning with a weighted type draw.
//!
//! The timer counts total elapsed time in f64 and derives the number of ticks
//! from it, so with a constant frame step `d` and interval `I` exactly
//! `floor(N * d / I)` spawn ticks have fired after `N` frames. Each tick draws
//! one type by cumulative weight; weights summing below one leave a gap in
//! which the tick produces nothing.

use engine_core::Vec3;
use rand::prelude::*;

use crate::targets::{RoadBounds, TargetCatalog};

/// Shortest spawn interval accepted, in seconds.
pub const MIN_INTERVAL: f32 = 0.05;

/// Everything needed to place one freshly spawned target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub type_index: usize,
    pub position: Vec3,
    /// +1 travels toward +X, -1 toward -X.
    pub direction: f32,
    pub speed: f32,
    pub color: [f32; 3],
}

/// Timer plus random source for target spawns.
pub struct TargetSpawner {
    /// Seconds between spawn ticks.
    interval: f32,
    /// Seconds accumulated since the last reset.
    elapsed: f64,
    /// Ticks already handed out since the last reset.
    fired: u64,
    rng: StdRng,
}

impl TargetSpawner {
    pub fn new(interval: f32, seed: Option<u64>) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            elapsed: 0.0,
            fired: 0,
            rng: match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            },
        }
    }

    /// Advance the timer and return how many spawn ticks fell due.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt as f64;
        }
        let total = (self.elapsed / self.interval as f64).floor() as u64;
        let due = total.saturating_sub(self.fired);
        self.fired = total;
        due.min(u32::MAX as u64) as u32
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fired = 0;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds since the most recent tick.
    pub fn timer(&self) -> f64 {
        self.elapsed - self.fired as f64 * self.interval as f64
    }

    /// Cumulative-weight draw against one uniform sample. `None` when the sample
    /// lands beyond the summed weights.
    pub fn pick_type(&mut self, catalog: &TargetCatalog) -> Option<usize> {
        let roll = self.rng.gen::<f32>();
        let mut cumulative = 0.0;
        for (i, ty) in catalog.iter().enumerate() {
            cumulative += ty.spawn_weight;
            if roll < cumulative {
                return Some(i);
            }
        }
        None
    }

    /// Roll direction, speed, lane and paint for a target of the given type.
    pub fn plan(&mut self, catalog: &TargetCatalog, road: &RoadBounds, type_index: usize) -> SpawnPlan {
        let ty = catalog.get(type_index);
        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let (min, max) = ty.speed_range;
        let speed = min + self.rng.gen::<f32>() * (max - min);

        // Enter just outside the road on the side we travel away from.
        let x = if direction > 0.0 {
            road.x_min - road.spawn_margin
        } else {
            road.x_max + road.spawn_margin
        };
        let z = road.center_z + (self.rng.gen::<f32>() - 0.5) * (road.width - road.lane_inset);

        let color = if ty.palette.is_empty() {
            [1.0, 1.0, 1.0]
        } else {
            ty.palette[self.rng.gen_range(0..ty.palette.len())]
        };

        SpawnPlan {
            type_index,
            position: Vec3::new(x, 0.0, z),
            direction,
            speed,
            color,
        }
    }

    /// Draw a type and, if one was selected, plan its spawn.
    pub fn roll(&mut self, catalog: &TargetCatalog, road: &RoadBounds) -> Option<SpawnPlan> {
        let type_index = self.pick_type(catalog)?;
        Some(self.plan(catalog, road, type_index))
    }
}
