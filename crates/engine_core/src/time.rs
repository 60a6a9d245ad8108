//! Frame clock for the game loop.

use std::time::{Duration, Instant};

/// Tracks frame timing and the simulation clock.
///
/// Real-time drivers call [`Time::update`] once per rendered frame; scripted
/// drivers and tests call [`Time::advance`] with a fixed step instead. Both
/// paths feed the same delta/elapsed bookkeeping, so every system downstream
/// sees one consistent clock.
#[derive(Debug)]
pub struct Time {
    /// Wall-clock instant of the last real-time frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time since the clock was created or reset.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Upper bound applied to a single frame's delta (hitches, debugger pauses).
    max_delta: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new clock at zero.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: Duration::from_millis(250),
        }
    }

    /// Measure a real-time frame from the wall clock.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = (now - self.last_frame).min(self.max_delta);
        self.last_frame = now;
        self.step(delta);
    }

    /// Advance by a fixed step in seconds. Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.step(Duration::from_secs_f32(dt));
    }

    fn step(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Rewind to zero (new round).
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.delta = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.frame_count = 0;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Elapsed seconds at full precision, for timestamp comparisons.
    pub fn elapsed_seconds_f64(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }

    /// Set the largest delta a single real-time frame may report.
    pub fn set_max_delta(&mut self, seconds: f32) {
        self.max_delta = Duration::from_secs_f32(seconds.max(0.0));
    }
}
