//! Clip and reload state machine for the active character.

use crate::character::Character;

/// Coarse state of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoPhase {
    /// Shots left and not reloading.
    Ready,
    /// Clip empty, reload not yet running.
    EmptyPendingReload,
    /// Refilling; ends with a full clip.
    Reloading,
}

/// Point-in-time notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmmoEvent {
    AmmoChanged(u32),
    ReloadStarted { duration: f32 },
    ReloadCompleted,
}

/// Ammo bookkeeping for whichever character is active.
///
/// Timestamps are simulation seconds supplied by the caller, so the fire-rate
/// cap follows the game clock rather than the wall clock.
#[derive(Debug, Clone)]
pub struct AmmoState {
    ammo: u32,
    reloading: bool,
    reload_elapsed: f32,
    last_shot: Option<f64>,
    events: Vec<AmmoEvent>,
}

impl AmmoState {
    /// Full clip for `character`.
    pub fn new(character: &Character) -> Self {
        Self {
            ammo: character.max_ammo,
            reloading: false,
            reload_elapsed: 0.0,
            last_shot: None,
            events: Vec::new(),
        }
    }

    /// Whether a shot at time `now` would be accepted.
    pub fn can_fire(&self, character: &Character, now: f64) -> bool {
        if self.reloading || self.ammo == 0 {
            return false;
        }
        match self.last_shot {
            None => true,
            Some(t) => now - t >= character.shot_interval(),
        }
    }

    /// Spend one shot. Returns false (and changes nothing) if the shot is refused.
    /// Emptying the clip starts a reload straight away.
    pub fn fire(&mut self, character: &Character, now: f64) -> bool {
        if !self.can_fire(character, now) {
            return false;
        }
        self.ammo -= 1;
        self.last_shot = Some(now);
        self.events.push(AmmoEvent::AmmoChanged(self.ammo));
        if self.ammo == 0 {
            self.start_reload(character);
        }
        true
    }

    /// Advance a running reload; completes once the character's reload time has passed.
    pub fn tick_reload(&mut self, dt: f32, character: &Character) {
        if !self.reloading {
            return;
        }
        self.reload_elapsed += dt;
        if self.reload_elapsed >= character.reload_time {
            self.complete_reload(character);
        }
    }

    /// Player-requested reload. Only starts when idle and the clip is not full.
    pub fn trigger_manual_reload(&mut self, character: &Character) -> bool {
        self.start_reload(character)
    }

    /// Fresh clip for a newly selected character; any reload in progress is discarded.
    pub fn switch_character(&mut self, character: &Character) {
        self.ammo = character.max_ammo;
        self.reloading = false;
        self.reload_elapsed = 0.0;
        self.last_shot = None;
        self.events.push(AmmoEvent::AmmoChanged(self.ammo));
    }

    fn start_reload(&mut self, character: &Character) -> bool {
        if self.reloading || self.ammo >= character.max_ammo {
            return false;
        }
        self.reloading = true;
        self.reload_elapsed = 0.0;
        self.events.push(AmmoEvent::ReloadStarted {
            duration: character.reload_time,
        });
        log::debug!("{} reloading ({}s)", character.name, character.reload_time);
        true
    }

    fn complete_reload(&mut self, character: &Character) {
        self.ammo = character.max_ammo;
        self.reloading = false;
        self.reload_elapsed = 0.0;
        self.events.push(AmmoEvent::AmmoChanged(self.ammo));
        self.events.push(AmmoEvent::ReloadCompleted);
        log::debug!("{} reloaded to {}", character.name, self.ammo);
    }

    pub fn phase(&self) -> AmmoPhase {
        if self.reloading {
            AmmoPhase::Reloading
        } else if self.ammo == 0 {
            AmmoPhase::EmptyPendingReload
        } else {
            AmmoPhase::Ready
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn reload_elapsed(&self) -> f32 {
        self.reload_elapsed
    }

    /// Reload completion in 0..=1 (0 when idle).
    pub fn reload_progress(&self, character: &Character) -> f32 {
        if !self.reloading || character.reload_time <= 0.0 {
            return 0.0;
        }
        (self.reload_elapsed / character.reload_time).clamp(0.0, 1.0)
    }

    pub fn last_shot(&self) -> Option<f64> {
        self.last_shot
    }

    /// Take the notifications raised since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, AmmoEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterCatalog;

    fn dhruv() -> Character {
        CharacterCatalog::builtin().get(0).clone()
    }

    #[test]
    fn ammo_full_clip_at_fire_rate_then_reload() {
        let c = dhruv();
        assert_eq!((c.max_ammo, c.fire_rate), (30, 3.0));
        let mut a = AmmoState::new(&c);
        for i in 0..30 {
            assert!(a.fire(&c, i as f64 * 0.5), "shot {i} refused");
        }
        assert_eq!(a.ammo(), 0);
        assert!(a.is_reloading());
        assert!(!a.fire(&c, 14.5));
        assert!(!a.fire(&c, 100.0));
        assert_eq!(a.ammo(), 0);
    }

    #[test]
    fn ammo_rate_cap_blocks_within_interval() {
        let c = dhruv();
        let mut a = AmmoState::new(&c);
        assert!(a.fire(&c, 10.0));
        assert!(!a.can_fire(&c, 10.0));
        assert!(!a.can_fire(&c, 10.2));
        assert!(!a.fire(&c, 10.33));
        assert_eq!(a.ammo(), 29);
        assert!(a.can_fire(&c, 10.34));
        assert!(a.fire(&c, 10.5));
        assert_eq!(a.ammo(), 28);
    }

    #[test]
    fn ammo_reload_restores_exact_max() {
        let c = dhruv();
        let mut a = AmmoState::new(&c);
        for i in 0..30 {
            a.fire(&c, i as f64);
        }
        a.tick_reload(1.0, &c);
        assert!(a.is_reloading());
        assert!((a.reload_progress(&c) - 0.5).abs() < 1e-6);
        a.tick_reload(1.0, &c);
        assert!(!a.is_reloading());
        assert_eq!(a.ammo(), 30);
        assert_eq!(a.phase(), AmmoPhase::Ready);
        // Further ticks while idle do nothing.
        a.tick_reload(5.0, &c);
        assert_eq!(a.ammo(), 30);
    }

    #[test]
    fn ammo_manual_reload_needs_missing_rounds() {
        let c = dhruv();
        let mut a = AmmoState::new(&c);
        assert!(!a.trigger_manual_reload(&c));
        a.fire(&c, 0.0);
        assert!(a.trigger_manual_reload(&c));
        assert!(!a.trigger_manual_reload(&c));
        assert!(!a.can_fire(&c, 50.0));
        a.tick_reload(2.0, &c);
        assert_eq!(a.ammo(), 30);
    }

    #[test]
    fn ammo_switch_discards_reload_and_refills() {
        let catalog = CharacterCatalog::builtin();
        let c = catalog.get(0);
        let puru = catalog.get(3);
        let mut a = AmmoState::new(c);
        a.fire(c, 0.0);
        a.trigger_manual_reload(c);
        a.tick_reload(1.0, c);
        a.switch_character(puru);
        assert_eq!(a.ammo(), 15);
        assert!(!a.is_reloading());
        assert_eq!(a.reload_elapsed(), 0.0);
        assert!(a.can_fire(puru, 0.0));
    }

    #[test]
    fn ammo_events_follow_transitions() {
        let mut c = dhruv();
        c.max_ammo = 1;
        let mut a = AmmoState::new(&c);
        a.fire(&c, 0.0);
        let events: Vec<_> = a.drain_events().collect();
        assert_eq!(
            events,
            vec![AmmoEvent::AmmoChanged(0), AmmoEvent::ReloadStarted { duration: 2.0 }]
        );
        a.tick_reload(2.5, &c);
        let events: Vec<_> = a.drain_events().collect();
        assert_eq!(events, vec![AmmoEvent::AmmoChanged(1), AmmoEvent::ReloadCompleted]);
        assert_eq!(a.drain_events().count(), 0);
    }

    #[test]
    fn ammo_refused_fire_changes_nothing() {
        let c = dhruv();
        let mut a = AmmoState::new(&c);
        a.fire(&c, 1.0);
        a.drain_events().for_each(drop);
        assert!(!a.fire(&c, 1.1));
        assert_eq!(a.ammo(), 29);
        assert_eq!(a.last_shot(), Some(1.0));
        assert_eq!(a.drain_events().count(), 0);
    }
}
