//! Ray queries against target bounding geometry.
//!
//! No rigid-body simulation runs here: targets move kinematically in the game
//! crate and only their collision shapes are consulted, through Rapier's parry
//! shape queries, whenever the player fires.

pub mod hitbox;
pub mod raycast;

pub use hitbox::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;
