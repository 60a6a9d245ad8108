//! Input handling: turns raw key/mouse events into gameplay intents.

use glam::Vec2;
use std::collections::HashSet;

/// Held movement intents, as consumed by the player controller each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntents {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub jump: bool,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (only while the cursor is captured).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse motion. Ignored unless the cursor is captured.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_locked {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state. Releasing the cursor drops any pending look motion.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        if locked != self.cursor_locked {
            log::debug!("cursor capture {}", if locked { "engaged" } else { "released" });
        }
        self.cursor_locked = locked;
        if !locked {
            self.accumulated_delta = Vec2::ZERO;
            self.mouse_delta = Vec2::ZERO;
        }
    }

    /// Held movement keys (WASD + Space). Opposite keys both stay set; the
    /// controller's vector sum cancels them.
    pub fn move_intents(&self) -> MoveIntents {
        MoveIntents {
            left: self.is_key_held(KeyCode::KeyA),
            right: self.is_key_held(KeyCode::KeyD),
            forward: self.is_key_held(KeyCode::KeyW),
            backward: self.is_key_held(KeyCode::KeyS),
            jump: self.is_key_held(KeyCode::Space),
        }
    }

    /// Check if fire was pressed this frame (left mouse button, one shot per click).
    pub fn is_fire_pressed(&self) -> bool {
        self.is_mouse_pressed(MouseButton::Left)
    }

    /// Check if manual reload was pressed (R).
    pub fn is_reload_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyR)
    }

    /// Check if pause toggle was pressed (Escape).
    pub fn is_pause_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Character slot chosen this frame via 1-4 on the main row or numpad.
    pub fn character_selected(&self) -> Option<usize> {
        const SLOTS: [(KeyCode, KeyCode); 4] = [
            (KeyCode::Digit1, KeyCode::Numpad1),
            (KeyCode::Digit2, KeyCode::Numpad2),
            (KeyCode::Digit3, KeyCode::Numpad3),
            (KeyCode::Digit4, KeyCode::Numpad4),
        ];
        SLOTS
            .iter()
            .position(|&(row, pad)| self.is_key_pressed(row) || self.is_key_pressed(pad))
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
