//! Holi Range: a first-person colour-splash shooting gallery.
//!
//! The player stands on a viewing platform and throws colour at cars and
//! pedestrians crossing the road below before the round clock runs out.
//! Everything here is headless; a renderer reads [`RenderSnapshot`] and a HUD
//! drains [`GameEvent`]s once per frame.

pub mod ammo;
pub mod character;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod game;
pub mod highscores;
pub mod hit;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod targets;

pub use ammo::{AmmoEvent, AmmoPhase, AmmoState};
pub use character::{Character, CharacterCatalog};
pub use config::{GameConfig, Smoothing};
pub use effects::{EffectCoordinator, Splash, Stain};
pub use error::{CatalogError, StoreError};
pub use events::GameEvent;
pub use game::{FireResult, Game};
pub use highscores::{HighScoreTable, ScoreSink};
pub use hit::HitOutcome;
pub use player::{PlatformBounds, PlayerController, PlayerTuning};
pub use session::SessionState;
pub use snapshot::RenderSnapshot;
pub use targets::{HitResult, RoadBounds, Target, TargetCatalog, TargetManager, TargetType};
