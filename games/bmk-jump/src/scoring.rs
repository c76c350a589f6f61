use crate::config::JumpConfig;
use crate::physics::Player;
use crate::world::PlatformField;

/// Scale the score readout jumps to whenever the score grows.
const POP_SCALE: f32 = 1.2;

/// Presentation-only score readout that chases the real score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDisplay {
    pub current: i64,
    pub target: i64,
    /// "Pop" scale, relaxes back to 1.0.
    pub scale: f32,
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self {
            current: 0,
            target: 0,
            scale: 1.0,
        }
    }
}

impl ScoreDisplay {
    pub fn bump(&mut self, score: u32) {
        self.target = score as i64;
        self.scale = POP_SCALE;
    }

    /// Close 10% of the gap (rounded away from the current value) and relax the pop.
    pub fn tick(&mut self) {
        let diff = (self.target - self.current) as f64;
        if diff > 0.0 {
            self.current += (diff * 0.1).ceil() as i64;
        } else if diff < 0.0 {
            self.current += (diff * 0.1).floor() as i64;
        }
        self.scale = self.scale * 0.95 + 0.05;
    }
}

/// Rubber-band camera plus the score it produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scoreboard {
    /// Net climb distance. Never decreases.
    pub score: u32,
    /// Cumulative world scroll.
    pub camera_offset: f32,
    pub display: ScoreDisplay,
}

impl Scoreboard {
    /// Keep the player from rising past the midline by scrolling the world down.
    /// Returns the scroll distance (0 when the player is at or below the midline).
    pub fn follow(
        &mut self,
        player: &mut Player,
        platforms: &mut PlatformField,
        cfg: &JumpConfig,
    ) -> f32 {
        let midline = cfg.world_height / 2.0;
        if player.pos.y >= midline {
            return 0.0;
        }
        let diff = midline - player.pos.y;
        self.camera_offset += diff;
        player.pos.y += diff;
        platforms.scroll(diff);
        self.score += diff.floor() as u32;
        self.display.bump(self.score);
        diff
    }
}
