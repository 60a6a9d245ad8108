//! Core engine types shared by every crate of the range:
//! - Transform and model-matrix instance data
//! - Frame clock

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
