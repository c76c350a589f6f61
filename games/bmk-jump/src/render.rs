//! Read-only frame snapshot and its encoding into sprites and HUD slots.

use bmk_engine::{RenderContext, RenderInstance};

use crate::enemy::Enemy;
use crate::jumpscare::JumpScare;
use crate::physics::Player;
use crate::scoring::Scoreboard;
use crate::session::GamePhase;
use crate::world::Platform;

// Sprite kinds
pub const SPRITE_PLAYER: u32 = 1;
pub const SPRITE_PLATFORM: u32 = 2;
pub const SPRITE_ENEMY: u32 = 3;

// HUD slots
pub const HUD_SCORE: usize = 0;
pub const HUD_SCORE_DISPLAY: usize = 1;
pub const HUD_SCORE_SCALE: usize = 2;
pub const HUD_GAME_OVER: usize = 3;
pub const HUD_PHASE: usize = 4;
pub const HUD_SCARE_PHASE: usize = 5;
pub const HUD_SCARE_OPACITY: usize = 6;
pub const HUD_SCARE_SCALE: usize = 7;
pub const HUD_SCARE_TINT: usize = 8;
pub const HUD_MUSIC_VOLUME: usize = 9;
pub const HUD_MUSIC_PLAYING: usize = 10;
pub const HUD_ENEMY_ACTIVE: usize = 11;
pub const HUD_ENEMY_WARNING: usize = 12;
pub const HUD_CAMERA_OFFSET: usize = 13;

/// Everything a renderer may draw for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub enemy: &'a Enemy,
    pub scoreboard: &'a Scoreboard,
    pub scare: &'a JumpScare,
    pub phase: GamePhase,
    pub game_over: bool,
    pub music_volume: f32,
    pub music_playing: bool,
}

impl FrameSnapshot<'_> {
    pub fn draw(&self, ctx: &mut RenderContext) {
        for p in self.platforms {
            ctx.render_buffer.push(RenderInstance::new(
                SPRITE_PLATFORM,
                p.pos.x,
                p.pos.y,
                p.size.x,
                p.size.y,
            ));
        }

        if self.enemy.active {
            let e = self.enemy;
            ctx.render_buffer
                .push(RenderInstance::new(SPRITE_ENEMY, e.pos.x, e.pos.y, e.size.x, e.size.y));
        }

        // Player last so it draws on top.
        let pl = self.player;
        ctx.render_buffer.push_focus(
            RenderInstance::new(SPRITE_PLAYER, pl.pos.x, pl.pos.y, pl.size.x, pl.size.y)
                .with_rotation(pl.rotation),
        );

        let hud = &mut *ctx.hud;
        hud.set(HUD_SCORE, self.scoreboard.score as f32);
        hud.set(HUD_SCORE_DISPLAY, self.scoreboard.display.current as f32);
        hud.set(HUD_SCORE_SCALE, self.scoreboard.display.scale);
        hud.set_flag(HUD_GAME_OVER, self.game_over);
        hud.set(HUD_PHASE, self.phase.as_f32());
        hud.set(HUD_SCARE_PHASE, self.scare.phase.as_f32());
        hud.set(HUD_SCARE_OPACITY, self.scare.opacity);
        hud.set(HUD_SCARE_SCALE, self.scare.scale);
        hud.set(HUD_SCARE_TINT, self.scare.tint());
        hud.set(HUD_MUSIC_VOLUME, self.music_volume);
        hud.set_flag(HUD_MUSIC_PLAYING, self.music_playing);
        hud.set_flag(HUD_ENEMY_ACTIVE, self.enemy.active);
        hud.set(HUD_ENEMY_WARNING, if self.enemy.active { self.enemy.warning_alpha } else { 0.0 });
        hud.set(HUD_CAMERA_OFFSET, self.scoreboard.camera_offset);
    }
}
