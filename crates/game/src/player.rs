//! Player controller: look, platform movement with easing, and jumping.

use engine_core::{Transform, Vec2, Vec3};
use input::MoveIntents;
use physics::AimRay;
use std::f32::consts::PI;

use crate::config::{GameConfig, Smoothing};

/// Walkable rectangle of the viewing platform (horizontal plane).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Default for PlatformBounds {
    fn default() -> Self {
        Self {
            x_min: -12.0,
            x_max: 12.0,
            z_min: 0.0,
            z_max: 7.5,
        }
    }
}

impl PlatformBounds {
    /// Clamp a horizontal (x, z) position into the platform.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x_min, self.x_max), p.y.clamp(self.z_min, self.z_max))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.z_min && p.y <= self.z_max
    }
}

/// Movement and look constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub look_sensitivity: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub yaw_range: (f32, f32),
    pub pitch_range: (f32, f32),
    pub start_yaw: f32,
    pub start_pitch: f32,
    pub smoothing: Smoothing,
    pub bounds: PlatformBounds,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            look_sensitivity: 0.002,
            jump_force: 12.0,
            gravity: 30.0,
            yaw_range: (PI - 1.2, PI + 1.2),
            pitch_range: (-0.8, 0.2),
            // Facing +Z, toward the road, looking slightly down.
            start_yaw: PI,
            start_pitch: -0.3,
            smoothing: Smoothing::PerFrame(0.15),
            bounds: PlatformBounds::default(),
        }
    }
}

impl PlayerTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            look_sensitivity: config.look_sensitivity,
            smoothing: config.smoothing,
            ..Default::default()
        }
    }
}

/// First-person controller fixed to the platform.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub tuning: PlayerTuning,
    /// Viewpoint handed to the renderer (position + yaw/pitch rotation).
    pub transform: Transform,
    yaw: f32,
    pitch: f32,
    /// Where input wants the player to be (x, z).
    target_position: Vec2,
    /// Where the player is drawn (x, z); eases toward `target_position`.
    current_position: Vec2,
    height: f32,
    velocity_y: f32,
    ground_height: f32,
    is_grounded: bool,
    /// Look input is only applied while the pointer is captured.
    captured: bool,
}

impl PlayerController {
    pub fn new(tuning: PlayerTuning, ground_height: f32) -> Self {
        let mut player = Self {
            tuning,
            transform: Transform::default(),
            yaw: tuning.start_yaw,
            pitch: tuning.start_pitch,
            target_position: Vec2::ZERO,
            current_position: Vec2::ZERO,
            height: ground_height,
            velocity_y: 0.0,
            ground_height,
            is_grounded: true,
            captured: false,
        };
        player.reset(ground_height);
        player
    }

    /// Restore the round-start pose at the given eye height.
    pub fn reset(&mut self, ground_height: f32) {
        let start = Vec2::new(0.0, self.tuning.bounds.z_max);
        self.yaw = self.tuning.start_yaw;
        self.pitch = self.tuning.start_pitch;
        self.target_position = start;
        self.current_position = start;
        self.height = ground_height;
        self.ground_height = ground_height;
        self.velocity_y = 0.0;
        self.is_grounded = true;
        self.apply_view();
    }

    /// Change eye height (character switch). A jump in progress keeps its arc
    /// and lands on the new height.
    pub fn set_ground_height(&mut self, ground_height: f32) {
        self.ground_height = ground_height;
        if self.is_grounded {
            self.height = ground_height;
            self.apply_view();
        }
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Apply pointer motion. Ignored unless captured.
    pub fn look(&mut self, delta_x: f32, delta_y: f32) {
        if !self.captured {
            return;
        }
        let t = &self.tuning;
        self.yaw = (self.yaw - delta_x * t.look_sensitivity).clamp(t.yaw_range.0, t.yaw_range.1);
        self.pitch = (self.pitch - delta_y * t.look_sensitivity).clamp(t.pitch_range.0, t.pitch_range.1);
        self.apply_view();
    }

    /// Advance movement, jump and easing by one frame.
    pub fn update(&mut self, intents: &MoveIntents, dt: f32) {
        // Horizontal basis from yaw only; yaw = PI faces +Z.
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward = Vec2::new(-sin_yaw, -cos_yaw);
        let right = Vec2::new(cos_yaw, -sin_yaw);

        let speed = self.tuning.move_speed * dt;
        let mut displacement = Vec2::ZERO;
        if intents.forward {
            displacement += forward * speed;
        }
        if intents.backward {
            displacement -= forward * speed;
        }
        if intents.right {
            displacement += right * speed;
        }
        if intents.left {
            displacement -= right * speed;
        }

        self.target_position = self.tuning.bounds.clamp(self.target_position + displacement);

        if intents.jump && self.is_grounded {
            self.velocity_y = self.tuning.jump_force;
            self.is_grounded = false;
        }

        if !self.is_grounded {
            self.velocity_y -= self.tuning.gravity * dt;
            self.height += self.velocity_y * dt;
            if self.height <= self.ground_height {
                self.height = self.ground_height;
                self.velocity_y = 0.0;
                self.is_grounded = true;
            }
        }

        let k = self.tuning.smoothing.factor(dt);
        self.current_position += (self.target_position - self.current_position) * k;

        self.apply_view();
    }

    fn apply_view(&mut self) {
        self.transform.position = self.eye_position();
        self.transform.rotation = Transform::view_rotation(self.yaw, self.pitch);
    }

    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(self.current_position.x, self.height, self.current_position.y)
    }

    /// Unit vector the view faces.
    pub fn view_direction(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Center-of-view aim ray.
    pub fn aim_ray(&self) -> AimRay {
        AimRay::new(self.eye_position(), self.view_direction())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn current_position(&self) -> Vec2 {
        self.current_position
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> PlayerController {
        PlayerController::new(PlayerTuning::default(), 5.5)
    }

    fn intents(bits: u8) -> MoveIntents {
        MoveIntents {
            left: bits & 1 != 0,
            right: bits & 2 != 0,
            forward: bits & 4 != 0,
            backward: bits & 8 != 0,
            jump: bits & 16 != 0,
        }
    }

    #[test]
    fn player_target_stays_in_bounds_for_every_input_combo() {
        for bits in 0..32u8 {
            let mut p = player();
            p.set_captured(true);
            for frame in 0..600 {
                // Sweep the view so movement directions rotate over time.
                p.look(if frame % 120 < 60 { 15.0 } else { -15.0 }, 0.0);
                p.update(&intents(bits), DT);
                assert!(p.tuning.bounds.contains(p.target_position()), "combo {bits} escaped");
            }
        }
    }

    #[test]
    fn player_opposite_intents_cancel() {
        let mut p = player();
        let start = p.target_position();
        let both = MoveIntents { left: true, right: true, forward: true, backward: true, jump: false };
        for _ in 0..30 {
            p.update(&both, DT);
        }
        assert!((p.target_position() - start).length() < 1e-4);
    }

    #[test]
    fn player_backward_moves_away_from_road() {
        let mut p = player();
        let back = MoveIntents { backward: true, ..Default::default() };
        p.update(&back, 0.1);
        // Facing +Z, so backward is -Z at move_speed * dt.
        assert!((p.target_position().y - (7.5 - 1.0)).abs() < 1e-4);
        assert!(p.target_position().x.abs() < 1e-4);
    }

    #[test]
    fn player_strafe_right_facing_road_is_negative_x() {
        let mut p = player();
        let right = MoveIntents { right: true, ..Default::default() };
        p.update(&right, 0.1);
        assert!((p.target_position().x + 1.0).abs() < 1e-4);
    }

    #[test]
    fn player_current_position_eases_toward_target() {
        let mut p = player();
        let back = MoveIntents { backward: true, ..Default::default() };
        p.update(&back, 0.1);
        let gap = (p.target_position() - p.current_position()).length();
        assert!(gap > 0.0);
        // First frame closes 15% of the 1.0 gap.
        assert!((gap - 0.85).abs() < 1e-4);
        for _ in 0..200 {
            p.update(&MoveIntents::default(), DT);
        }
        assert!((p.target_position() - p.current_position()).length() < 1e-3);
    }

    #[test]
    fn player_jump_arc_returns_to_ground() {
        let mut p = player();
        let jump = MoveIntents { jump: true, ..Default::default() };
        p.update(&jump, DT);
        assert!(!p.is_grounded());
        let mut peak = p.height();
        for _ in 0..120 {
            p.update(&MoveIntents::default(), DT);
            peak = peak.max(p.height());
            if p.is_grounded() {
                break;
            }
        }
        assert!(p.is_grounded());
        assert_eq!(p.height(), 5.5);
        // v^2 / 2g = 144 / 60 = 2.4 above ground.
        assert!(peak > 5.5 + 2.0 && peak < 5.5 + 2.5);
    }

    #[test]
    fn player_look_clamps_each_axis() {
        let mut p = player();
        p.set_captured(true);
        p.look(-100_000.0, -100_000.0);
        assert_eq!(p.yaw(), PI + 1.2);
        assert_eq!(p.pitch(), 0.2);
        p.look(100_000.0, 100_000.0);
        assert_eq!(p.yaw(), PI - 1.2);
        assert_eq!(p.pitch(), -0.8);
    }

    #[test]
    fn player_look_ignored_without_capture() {
        let mut p = player();
        p.look(300.0, 300.0);
        assert_eq!(p.yaw(), PI);
        assert_eq!(p.pitch(), -0.3);
    }

    #[test]
    fn player_ground_change_mid_jump_keeps_arc() {
        let mut p = player();
        p.update(&MoveIntents { jump: true, ..Default::default() }, DT);
        let airborne_height = p.height();
        p.set_ground_height(6.0);
        assert_eq!(p.height(), airborne_height);
        assert_eq!(p.ground_height(), 6.0);
        for _ in 0..120 {
            p.update(&MoveIntents::default(), DT);
        }
        assert_eq!(p.height(), 6.0);

        p.set_ground_height(5.0);
        assert_eq!(p.height(), 5.0);
    }

    #[test]
    fn player_reset_restores_start_pose() {
        let mut p = player();
        p.set_captured(true);
        p.look(50.0, 50.0);
        p.update(&MoveIntents { left: true, jump: true, ..Default::default() }, 0.2);
        p.reset(6.0);
        assert_eq!(p.yaw(), PI);
        assert_eq!(p.pitch(), -0.3);
        assert_eq!(p.target_position(), Vec2::new(0.0, 7.5));
        assert_eq!(p.current_position(), Vec2::new(0.0, 7.5));
        assert_eq!(p.height(), 6.0);
        assert!(p.is_grounded());
    }

    #[test]
    fn player_aim_ray_starts_at_eye_and_looks_down_toward_road() {
        let p = player();
        let ray = p.aim_ray();
        assert_eq!(ray.origin, Vec3::new(0.0, 5.5, 7.5));
        assert!(ray.direction.z > 0.9 && ray.direction.y < 0.0);
    }
}
