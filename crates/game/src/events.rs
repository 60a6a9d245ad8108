//! Notifications queued for the presentation layer.
//!
//! Nothing in the simulation reads these back; the HUD drains them once per frame.

use engine_core::Entity;

use crate::ammo::AmmoEvent;
use crate::session::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    TimeChanged(u32),
    AmmoChanged(u32),
    ReloadStarted { duration: f32 },
    ReloadCompleted,
    ShotFired { ammo_left: u32 },
    TargetSpawned { entity: Entity },
    /// Left the road without being destroyed.
    TargetEscaped { entity: Entity },
    TargetHit { entity: Entity, points: u32 },
    TargetDestroyed { entity: Entity, points: u32 },
    CharacterSwitched { index: usize },
    Paused(bool),
    GameOver { score: u32, character: usize },
}

impl From<AmmoEvent> for GameEvent {
    fn from(e: AmmoEvent) -> Self {
        match e {
            AmmoEvent::AmmoChanged(n) => GameEvent::AmmoChanged(n),
            AmmoEvent::ReloadStarted { duration } => GameEvent::ReloadStarted { duration },
            AmmoEvent::ReloadCompleted => GameEvent::ReloadCompleted,
        }
    }
}

impl From<SessionEvent> for GameEvent {
    fn from(e: SessionEvent) -> Self {
        match e {
            SessionEvent::ScoreChanged(s) => GameEvent::ScoreChanged(s),
            SessionEvent::TimeChanged(t) => GameEvent::TimeChanged(t),
            SessionEvent::GameOver { score, character } => GameEvent::GameOver { score, character },
        }
    }
}
