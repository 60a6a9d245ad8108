//! The game context: owns every component and runs them in frame order.

use engine_core::{Entity, Time, Vec2, Vec3};
use input::{InputState, MoveIntents};

use crate::ammo::AmmoState;
use crate::character::{Character, CharacterCatalog};
use crate::config::GameConfig;
use crate::effects::EffectCoordinator;
use crate::events::GameEvent;
use crate::hit::{self, HitOutcome};
use crate::player::{PlayerController, PlayerTuning};
use crate::session::SessionState;
use crate::spawner::TargetSpawner;
use crate::targets::{RoadBounds, TargetCatalog, TargetManager};

/// What a fire request did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireResult {
    /// Round not live, clip empty, reloading, or too soon after the last shot.
    Rejected,
    /// Struck a target; `points` is what the hit credited.
    Target { entity: Entity, points: u32, destroyed: bool },
    /// Missed every target and splashed on the ground.
    Ground { point: Vec3 },
    /// Shot went over the horizon.
    Nothing,
}

pub struct Game {
    pub config: GameConfig,
    characters: CharacterCatalog,
    character: usize,
    player: PlayerController,
    ammo: AmmoState,
    session: SessionState,
    targets: TargetManager,
    effects: EffectCoordinator,
    /// Simulation clock; timestamps shots and drives the cosmetic bob.
    clock: Time,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_catalogs(config, CharacterCatalog::builtin(), TargetCatalog::builtin())
    }

    pub fn with_catalogs(config: GameConfig, characters: CharacterCatalog, target_types: TargetCatalog) -> Self {
        let config = config.validated();
        let character = characters.resolve_index(config.default_character);
        let active = characters.get(character);
        let player = PlayerController::new(PlayerTuning::from_config(&config), active.eye_height);
        let ammo = AmmoState::new(active);
        let session = SessionState::new(config.session_duration);
        let targets = TargetManager::new(
            target_types,
            RoadBounds::default(),
            TargetSpawner::new(config.spawn_interval, config.seed),
        );
        let effects = EffectCoordinator::new(config.splash_lifetime, config.seed.map(|s| s.wrapping_add(1)));
        log::info!("playing as {}", active.name);

        Self {
            config,
            characters,
            character,
            player,
            ammo,
            session,
            targets,
            effects,
            clock: Time::new(),
            events: Vec::new(),
        }
    }

    fn active(&self) -> &Character {
        self.characters.get(self.character)
    }

    /// Reset every component and start the countdown.
    pub fn start_round(&mut self) {
        let active = self.characters.get(self.character);
        self.clock.reset();
        self.targets.clear();
        self.effects.clear();
        self.player.reset(active.eye_height);
        self.ammo.switch_character(active);
        self.session.start(self.character);
        log::info!("{} takes the range", active.name);
        self.collect_events();
    }

    /// One simulation step in fixed order: player, then (while the round is
    /// live) session clock, targets and reload, then effects.
    pub fn frame(&mut self, dt: f32, intents: &MoveIntents, look_delta: Vec2) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        // Systems step by `dt` itself; the clock's Duration is only for timestamps.
        self.clock.advance(dt);

        if !self.session.is_paused() {
            self.player.look(look_delta.x, look_delta.y);
            self.player.update(intents, dt);
        }

        if self.session.is_active() {
            self.session.update(dt);
            let report = self.targets.update(dt, self.clock.elapsed_seconds());
            if !report.spawned.is_empty() || !report.despawned.is_empty() {
                log::trace!(
                    "{} spawned, {} escaped, {} live",
                    report.spawned.len(),
                    report.despawned.len(),
                    self.targets.len()
                );
            }
            self.events
                .extend(report.spawned.into_iter().map(|entity| GameEvent::TargetSpawned { entity }));
            self.events
                .extend(report.despawned.into_iter().map(|entity| GameEvent::TargetEscaped { entity }));
            let active = self.characters.get(self.character);
            self.ammo.tick_reload(dt, active);
        }

        self.effects.update(dt);
        self.collect_events();
    }

    /// Apply one frame of device input: pause, character keys, reload and
    /// fire, then step the simulation.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        if input.is_pause_pressed() {
            self.toggle_pause();
        }
        if let Some(index) = input.character_selected() {
            self.select_character(index);
        }
        if input.is_reload_pressed() {
            self.reload();
        }
        if input.is_fire_pressed() {
            self.fire();
        }
        self.player.set_captured(input.is_cursor_locked());
        self.frame(dt, &input.move_intents(), input.mouse_delta());
    }

    /// Shoot along the view: ammo gate, ray query, scoring, then paint.
    pub fn fire(&mut self) -> FireResult {
        if !self.session.is_active() {
            return FireResult::Rejected;
        }
        let now = self.clock.elapsed_seconds_f64();
        let active = self.characters.get(self.character);
        if !self.ammo.fire(active, now) {
            return FireResult::Rejected;
        }
        self.events.push(GameEvent::ShotFired {
            ammo_left: self.ammo.ammo(),
        });

        let ray = self.player.aim_ray();
        let result = match hit::resolve(&ray, &self.targets, self.config.aim_range) {
            Some(HitOutcome::Target { entity, point, normal, .. }) => {
                self.effects.spawn_splash(point, normal);
                self.effects.spawn_stain(&mut self.targets, entity, point);
                self.score_hit(entity)
            }
            Some(HitOutcome::Ground { point, normal }) => {
                self.effects.spawn_splash(point, normal);
                FireResult::Ground { point }
            }
            None => FireResult::Nothing,
        };
        self.collect_events();
        result
    }

    /// Credit a struck target, plus the destroy bonus when it goes down.
    fn score_hit(&mut self, entity: Entity) -> FireResult {
        let Some(hit) = self.targets.register_hit(entity) else {
            log::warn!("ray struck {:?} but it was no longer live", entity);
            return FireResult::Target {
                entity,
                points: 0,
                destroyed: false,
            };
        };
        self.session.add_score(hit.points);
        if hit.destroyed {
            // Destroy bonus on top of the hit credit.
            self.session.add_score(hit.points);
            self.events.push(GameEvent::TargetDestroyed {
                entity,
                points: hit.points,
            });
        } else {
            self.events.push(GameEvent::TargetHit {
                entity,
                points: hit.points,
            });
        }
        log::debug!("hit {:?} for {} (destroyed: {})", entity, hit.points, hit.destroyed);
        FireResult::Target {
            entity,
            points: hit.points,
            destroyed: hit.destroyed,
        }
    }

    /// Start a manual reload. Returns false if none was started.
    pub fn reload(&mut self) -> bool {
        if !self.session.is_active() {
            return false;
        }
        let active = self.characters.get(self.character);
        let started = self.ammo.trigger_manual_reload(active);
        self.collect_events();
        started
    }

    /// Switch character; out-of-range indices fall back to the first entry.
    /// The new character gets a fresh clip and their own eye height.
    pub fn select_character(&mut self, index: usize) {
        let index = self.characters.resolve_index(index);
        self.character = index;
        let active = self.characters.get(index);
        self.ammo.switch_character(active);
        self.player.set_ground_height(active.eye_height);
        self.session.set_character(index);
        log::info!("switched to {}", active.name);
        self.events.push(GameEvent::CharacterSwitched { index });
        self.collect_events();
    }

    /// Pause a live round, or resume a paused one. Capture follows.
    pub fn toggle_pause(&mut self) {
        if self.session.is_paused() {
            self.session.resume();
            self.player.set_captured(true);
            self.events.push(GameEvent::Paused(false));
        } else if self.session.is_active() {
            self.session.pause();
            self.player.set_captured(false);
            self.events.push(GameEvent::Paused(true));
        }
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.player.set_captured(captured);
    }

    fn collect_events(&mut self) {
        self.events.extend(self.ammo.drain_events().map(GameEvent::from));
        self.events.extend(self.session.drain_events().map(GameEvent::from));
    }

    /// Take every notification raised since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.collect_events();
        self.events.drain(..)
    }

    pub fn character(&self) -> &Character {
        self.active()
    }

    pub fn character_index(&self) -> usize {
        self.character
    }

    pub fn characters(&self) -> &CharacterCatalog {
        &self.characters
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn ammo(&self) -> &AmmoState {
        &self.ammo
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetManager {
        &mut self.targets
    }

    pub fn effects(&self) -> &EffectCoordinator {
        &self.effects
    }

    pub fn clock(&self) -> &Time {
        &self.clock
    }
}
