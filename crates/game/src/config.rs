//! Game tuning. Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::effects::MIN_LIFETIME;
use crate::spawner::MIN_INTERVAL;

/// How the player's visual position eases toward its input target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Smoothing {
    /// Fixed fraction of the remaining gap closed per frame (frame-rate dependent).
    PerFrame(f32),
    /// Rate constant `k`; each frame closes `1 - exp(-k * dt)` of the gap.
    TimeConstant(f32),
}

impl Smoothing {
    /// Fraction of the remaining gap to close this frame.
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            Smoothing::PerFrame(f) => f.clamp(0.0, 1.0),
            Smoothing::TimeConstant(k) => (1.0 - (-k.max(0.0) * dt.max(0.0)).exp()).clamp(0.0, 1.0),
        }
    }
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Round length in seconds.
    #[serde(default = "default_session_duration")]
    pub session_duration: f32,
    /// Seconds between target spawns.
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval: f32,
    /// Seconds a splash stays on screen.
    #[serde(default = "default_splash_lifetime")]
    pub splash_lifetime: f32,
    /// Radians of look rotation per pixel of mouse motion.
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
    /// Platform walking speed, units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Position easing mode.
    #[serde(default = "default_smoothing")]
    pub smoothing: Smoothing,
    /// Maximum distance a shot can travel.
    #[serde(default = "default_aim_range")]
    pub aim_range: f32,
    /// Character selected when the game boots.
    #[serde(default)]
    pub default_character: usize,
    /// Fixed random seed; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where best scores are stored.
    #[serde(default = "default_highscore_path")]
    pub highscore_path: PathBuf,
}

fn default_session_duration() -> f32 {
    60.0
}
fn default_spawn_interval() -> f32 {
    1.5
}
fn default_splash_lifetime() -> f32 {
    0.8
}
fn default_look_sensitivity() -> f32 {
    0.002
}
fn default_move_speed() -> f32 {
    10.0
}
fn default_smoothing() -> Smoothing {
    Smoothing::PerFrame(0.15)
}
fn default_aim_range() -> f32 {
    1000.0
}
fn default_highscore_path() -> PathBuf {
    PathBuf::from("highscores.ron")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_duration: default_session_duration(),
            spawn_interval: default_spawn_interval(),
            splash_lifetime: default_splash_lifetime(),
            look_sensitivity: default_look_sensitivity(),
            move_speed: default_move_speed(),
            smoothing: default_smoothing(),
            aim_range: default_aim_range(),
            default_character: 0,
            seed: None,
            highscore_path: default_highscore_path(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load `config.ron`, writing the defaults out first if there is none yet.
    pub fn load_or_init() -> Self {
        let path = config_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path);
            return config;
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str::<GameConfig>(&data) {
                Ok(c) => return c.validated(),
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    /// Save to an explicit path. Logs on error.
    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialise config: {}", e),
        }
    }

    /// Replace out-of-range values with the nearest usable ones.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        self.session_duration = at_least("session_duration", self.session_duration, MIN_SESSION, defaults.session_duration);
        self.spawn_interval = at_least("spawn_interval", self.spawn_interval, MIN_INTERVAL, defaults.spawn_interval);
        self.splash_lifetime = at_least("splash_lifetime", self.splash_lifetime, MIN_LIFETIME, defaults.splash_lifetime);
        self.look_sensitivity = at_least("look_sensitivity", self.look_sensitivity, 0.0, defaults.look_sensitivity);
        self.move_speed = at_least("move_speed", self.move_speed, 0.0, defaults.move_speed);
        self.aim_range = at_least("aim_range", self.aim_range, MIN_AIM_RANGE, defaults.aim_range);
        let smoothing_ok = match self.smoothing {
            Smoothing::PerFrame(f) => f.is_finite() && f > 0.0 && f <= 1.0,
            Smoothing::TimeConstant(k) => k.is_finite() && k > 0.0,
        };
        if !smoothing_ok {
            log::warn!("smoothing {:?} would never settle, using {:?}", self.smoothing, defaults.smoothing);
            self.smoothing = defaults.smoothing;
        }
        self
    }
}

const MIN_SESSION: f32 = 1.0;
const MIN_AIM_RANGE: f32 = 1.0;

fn at_least(name: &str, value: f32, min: f32, default: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("{} = {} is not a number, using {}", name, value, default);
        default
    } else if value < min {
        log::warn!("{} = {} is below {}, clamping", name, value, min);
        min
    } else {
        value
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
