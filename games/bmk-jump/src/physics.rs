use bmk_engine::{ControlState, EntityId};
use glam::Vec2;

use crate::config::JumpConfig;
use crate::geometry::Rect;
use crate::world::Platform;

/// The jumping character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Cosmetic tilt, radians.
    pub rotation: f32,
}

impl Player {
    /// Fresh player near the bottom of the playfield, already launching upward.
    pub fn spawn(cfg: &JumpConfig) -> Self {
        Self {
            pos: Vec2::new(cfg.world_width / 2.0, cfg.world_height - 100.0),
            vel: Vec2::new(0.0, cfg.jump_force),
            size: Vec2::splat(cfg.player_size),
            rotation: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Gravity, steering, friction, speed clamp, integration and horizontal wrap.
    pub fn integrate(&mut self, control: &ControlState, dt_scale: f32, cfg: &JumpConfig) {
        self.vel.y += cfg.gravity * dt_scale;

        let dir = control.direction();
        if dir != 0.0 {
            self.vel.x += dir * cfg.move_speed * dt_scale;
            self.rotation = dir * cfg.tilt_rotation;
        } else {
            self.vel.x *= cfg.friction.powf(dt_scale);
            self.rotation = 0.0;
        }

        self.vel.x = self.vel.x.clamp(-cfg.max_velocity_x, cfg.max_velocity_x);
        self.pos += self.vel * dt_scale;

        // Cylindrical world: leave on one side, enter on the other.
        if self.pos.x + self.size.x < 0.0 {
            self.pos.x = cfg.world_width;
        }
        if self.pos.x > cfg.world_width {
            self.pos.x = -self.size.x;
        }
    }

    /// Bounce off the first platform landed on this tick.
    ///
    /// A landing needs downward motion and feet that were above the platform's
    /// underside before this step. `dt_scale` must match the preceding
    /// `integrate`, so a long frame cannot carry the player through a platform.
    pub fn land(&mut self, platforms: &[Platform], dt_scale: f32, cfg: &JumpConfig) -> Option<EntityId> {
        if self.vel.y <= 0.0 {
            return None;
        }
        let me = self.rect();
        let feet_before = self.pos.y + self.size.y - self.vel.y * dt_scale;
        for platform in platforms {
            let p = platform.rect();
            if me.overlaps(&p) && feet_before < p.max().y {
                self.pos.y = p.min.y - self.size.y;
                self.vel.y = cfg.jump_force;
                return Some(platform.id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> JumpConfig {
        JumpConfig::default()
    }

    fn idle() -> ControlState {
        ControlState::default()
    }

    fn player_at(x: f32, y: f32, vx: f32, vy: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size: Vec2::splat(40.0),
            rotation: 0.0,
        }
    }

    #[test]
    fn gravity_accelerates_downward() {
        let mut p = player_at(100.0, 100.0, 0.0, 0.0);
        p.integrate(&idle(), 1.0, &cfg());
        assert!((p.vel.y - 0.4).abs() < 1e-6);
        assert!((p.pos.y - 100.4).abs() < 1e-4);
    }

    #[test]
    fn dt_scale_is_applied() {
        let mut a = player_at(100.0, 100.0, 0.0, 0.0);
        a.integrate(&idle(), 2.0, &cfg());
        assert!((a.vel.y - 0.8).abs() < 1e-6);
        assert!((a.pos.y - 101.6).abs() < 1e-4);
    }

    #[test]
    fn steering_tilts_and_accelerates() {
        let mut p = player_at(100.0, 100.0, 0.0, 0.0);
        let left = ControlState { left: true, right: false };
        p.integrate(&left, 1.0, &cfg());
        assert!((p.vel.x + 0.8).abs() < 1e-6);
        assert_eq!(p.rotation, -0.2);

        let right = ControlState { left: false, right: true };
        p.integrate(&right, 1.0, &cfg());
        assert_eq!(p.rotation, 0.2);
    }

    #[test]
    fn friction_decays_velocity_when_idle() {
        let mut p = player_at(100.0, 100.0, 5.0, 0.0);
        p.integrate(&idle(), 1.0, &cfg());
        assert!((p.vel.x - 4.6).abs() < 1e-5);
        assert_eq!(p.rotation, 0.0);
    }

    #[test]
    fn horizontal_speed_is_clamped() {
        let mut p = player_at(100.0, 100.0, 7.4, 0.0);
        let right = ControlState { left: false, right: true };
        p.integrate(&right, 1.0, &cfg());
        assert_eq!(p.vel.x, 7.5);
    }

    #[test]
    fn wraps_around_both_edges() {
        let mut p = player_at(-39.0, 100.0, -2.0, 0.0);
        p.integrate(&idle(), 1.0, &cfg());
        assert_eq!(p.pos.x, 400.0);

        let mut p = player_at(399.0, 100.0, 2.0, 0.0);
        p.integrate(&idle(), 1.0, &cfg());
        assert_eq!(p.pos.x, -40.0);
    }

    #[test]
    fn landing_relaunches_with_jump_force() {
        let cfg = cfg();
        let platform = Platform::new(EntityId(9), 180.0, 300.0, &cfg);
        let mut p = player_at(180.0, 255.0, 0.0, 7.0);

        p.integrate(&idle(), 1.0, &cfg);
        let landed = p.land(&[platform], 1.0, &cfg);

        assert_eq!(landed, Some(EntityId(9)));
        assert_eq!(p.vel.y, cfg.jump_force);
        assert_eq!(p.pos.y, 300.0 - 40.0);
    }

    #[test]
    fn fast_fall_on_a_long_frame_still_lands() {
        let cfg = cfg();
        let platform = Platform::new(EntityId(4), 180.0, 300.0, &cfg);
        // Feet one unit above the top, falling hard on a 30 Hz frame.
        let mut p = player_at(180.0, 259.0, 0.0, 19.6);

        p.integrate(&idle(), 2.0, &cfg);
        assert!(p.pos.y + p.size.y > 315.0, "step should cross the whole platform");
        let landed = p.land(&[platform], 2.0, &cfg);

        assert_eq!(landed, Some(EntityId(4)));
        assert_eq!(p.pos.y, 300.0 - 40.0);
        assert_eq!(p.vel.y, cfg.jump_force);
    }

    #[test]
    fn long_frame_does_not_widen_landing_for_players_already_below() {
        let cfg = cfg();
        let platform = Platform::new(EntityId(4), 180.0, 300.0, &cfg);
        // Feet start under the platform's underside.
        let mut p = player_at(180.0, 276.0, 0.0, 0.5);

        p.integrate(&idle(), 2.0, &cfg);
        assert_eq!(p.land(&[platform], 2.0, &cfg), None);
    }

    #[test]
    fn rising_player_passes_through() {
        let cfg = cfg();
        let platform = Platform::new(EntityId(1), 180.0, 300.0, &cfg);
        let mut p = player_at(180.0, 290.0, 0.0, -5.0);
        assert_eq!(p.land(&[platform], 1.0, &cfg), None);
        assert_eq!(p.vel.y, -5.0);
    }

    #[test]
    fn falling_from_below_the_underside_does_not_land() {
        let cfg = cfg();
        let platform = Platform::new(EntityId(1), 180.0, 300.0, &cfg);
        // Feet already well below the platform's underside.
        let mut p = player_at(180.0, 290.0, 0.0, 1.0);
        assert_eq!(p.land(&[platform], 1.0, &cfg), None);
    }
}
