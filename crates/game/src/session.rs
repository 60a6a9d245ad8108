//! Round clock: countdown, score and the run/pause/over flags.

/// Notifications raised by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ScoreChanged(u32),
    /// Whole seconds left, rounded up.
    TimeChanged(u32),
    GameOver { score: u32, character: usize },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    duration: f32,
    time_remaining: f32,
    score: u32,
    running: bool,
    paused: bool,
    over: bool,
    character: usize,
    events: Vec<SessionEvent>,
}

impl SessionState {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            time_remaining: duration,
            score: 0,
            running: false,
            paused: false,
            over: false,
            character: 0,
            events: Vec::new(),
        }
    }

    /// Begin a fresh round for `character`.
    pub fn start(&mut self, character: usize) {
        self.reset();
        self.character = character;
        self.running = true;
        self.events.push(SessionEvent::ScoreChanged(0));
        self.events.push(SessionEvent::TimeChanged(self.time_remaining_display()));
        log::info!("round started ({}s)", self.duration);
    }

    /// Back to the pre-round state.
    pub fn reset(&mut self) {
        self.time_remaining = self.duration;
        self.score = 0;
        self.running = false;
        self.paused = false;
        self.over = false;
    }

    pub fn pause(&mut self) {
        if self.running && !self.over {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Count down. Reaching zero ends the round exactly once.
    pub fn update(&mut self, dt: f32) {
        if !self.is_active() {
            return;
        }
        let shown = self.time_remaining_display();
        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
        }
        if self.time_remaining_display() != shown {
            self.events.push(SessionEvent::TimeChanged(self.time_remaining_display()));
        }
        if self.time_remaining <= 0.0 {
            self.end();
        }
    }

    fn end(&mut self) {
        self.running = false;
        self.over = true;
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            character: self.character,
        });
        log::info!("round over: {} points", self.score);
    }

    /// Credit points while the round is live.
    pub fn add_score(&mut self, points: u32) {
        if !self.running || self.over || points == 0 {
            return;
        }
        self.score += points;
        self.events.push(SessionEvent::ScoreChanged(self.score));
    }

    pub fn set_character(&mut self, character: usize) {
        self.character = character;
    }

    /// Running, not paused and not over.
    pub fn is_active(&self) -> bool {
        self.running && !self.paused && !self.over
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn time_remaining_display(&self) -> u32 {
        self.time_remaining.max(0.0).ceil() as u32
    }

    pub fn character(&self) -> usize {
        self.character
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }
}
