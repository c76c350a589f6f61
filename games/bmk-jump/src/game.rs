//! BMK Jump: climb an endless column of platforms, dodge the enemy, survive the scare.

use bmk_engine::{
    ControlState, EngineContext, FrameTime, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    KeyValueStore, MemoryStore, RandomSource, RenderContext, Rng,
};
use bmk_web::LocalStorage;

use crate::audio::Mixer;
use crate::config::JumpConfig;
use crate::enemy::{Enemy, EnemyEvent};
use crate::jumpscare::JumpScare;
use crate::persist::{GameRecord, LeaderboardEntry, PersistError, Persistence, PlayerStats, User};
use crate::physics::Player;
use crate::render::FrameSnapshot;
use crate::scoring::Scoreboard;
use crate::session::{GamePhase, Lifecycle};
use crate::world::PlatformField;

/// Custom event kinds from the host UI
pub mod events {
    pub const NEW_GAME: u32 = 1;
    pub const TOGGLE_MUSIC: u32 = 2;
    /// The music element reported that playback started.
    pub const MUSIC_STARTED: u32 = 3;
    /// The music element rejected `play()`.
    pub const MUSIC_PLAY_FAILED: u32 = 4;
}

/// Game event kinds to the host UI
pub mod game_events {
    /// a = final score, b = 1.0 on a new record, c = leaderboard rank (0 when not signed in)
    pub const GAME_OVER: u32 = 1;
}

pub struct BmkJump {
    cfg: JumpConfig,
    rng: Box<dyn RandomSource>,
    persistence: Persistence,
    wall_clock: fn() -> f64,

    control: ControlState,
    player: Player,
    platforms: PlatformField,
    scoreboard: Scoreboard,
    enemy: Enemy,
    scare: JumpScare,
    mixer: Mixer,
    lifecycle: Lifecycle,
    last_record: Option<GameRecord>,
}

impl BmkJump {
    /// Browser build: bundled tuning, `localStorage` persistence and a
    /// clock-seeded platform layout.
    pub fn new() -> Self {
        let cfg = JumpConfig::bundled();
        let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("bmk-jump: {}; progress will not be saved", e);
                Box::new(MemoryStore::new())
            }
        };
        let seed = if cfg.seed != 0 {
            cfg.seed
        } else {
            bmk_web::epoch_ms() as u64
        };
        log::info!("bmk-jump: platform seed {}", seed);
        Self::with_parts(cfg, Box::new(Rng::new(seed)), store, bmk_web::epoch_ms)
    }

    /// Build from explicit collaborators. `wall_clock` stamps persisted records.
    pub fn with_parts(
        cfg: JumpConfig,
        rng: Box<dyn RandomSource>,
        store: Box<dyn KeyValueStore>,
        wall_clock: fn() -> f64,
    ) -> Self {
        Self {
            player: Player::spawn(&cfg),
            platforms: PlatformField::new(),
            scoreboard: Scoreboard::default(),
            enemy: Enemy::new(&cfg),
            scare: JumpScare::new(&cfg),
            mixer: Mixer::new(&cfg),
            control: ControlState::default(),
            lifecycle: Lifecycle::new(),
            last_record: None,
            persistence: Persistence::new(store),
            rng,
            wall_clock,
            cfg,
        }
    }

    /// Reset everything that belongs to one game and start playing.
    pub fn start_new_game(&mut self, ctx: &mut EngineContext) {
        self.player = Player::spawn(&self.cfg);
        self.platforms.reset(&self.cfg, self.rng.as_mut(), ctx);
        self.scoreboard = Scoreboard::default();
        self.enemy = Enemy::new(&self.cfg);
        self.scare = JumpScare::new(&self.cfg);
        self.control.release();
        self.lifecycle.start();
        self.last_record = None;
        self.mixer.reset_for_new_game();
        log::info!(
            "bmk-jump: new game on a {}x{} playfield",
            self.cfg.world_width,
            self.cfg.world_height
        );
    }

    /// Freeze the game and arm the delayed end-of-game handler. One-shot per game.
    fn game_over(&mut self, cause: &str) {
        if !self.lifecycle.trigger_game_over(self.cfg.game_over_delay_ms) {
            return;
        }
        log::info!("bmk-jump: game over ({}) at score {}", cause, self.scoreboard.score);
        if self.scare.interrupt() {
            self.mixer.stop_scare();
            self.mixer.restore_now();
        }
    }

    /// Record the result and tell the host. Ignored unless a game just ended.
    pub fn end_game(&mut self, ctx: &mut EngineContext) {
        if !self.lifecycle.finish() {
            return;
        }
        let score = self.scoreboard.score;
        let record = match self.persistence.record_game(score, (self.wall_clock)()) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("bmk-jump: could not save score {}: {}", score, e);
                None
            }
        };
        let new_record = record.is_some_and(|r| r.new_record);
        let rank = record.map_or(0.0, |r| r.rank as f32);
        log::info!(
            "bmk-jump: final score {}{}",
            score,
            if new_record { " (new record)" } else { "" }
        );
        ctx.emit_event(GameEvent::new(
            game_events::GAME_OVER,
            score as f32,
            if new_record { 1.0 } else { 0.0 },
            rank,
        ));
        self.last_record = record;
    }

    /// Fold the frame's input in arrival order. A new game starts as soon as it is
    /// requested, so controls queued after it steer the fresh player.
    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if event.is_gesture() {
                self.mixer.on_gesture();
            }
            match *event {
                InputEvent::Custom { kind, .. } => match kind {
                    events::NEW_GAME => {
                        self.mixer.on_gesture();
                        self.start_new_game(ctx);
                    }
                    events::TOGGLE_MUSIC => self.mixer.toggle_music(),
                    events::MUSIC_STARTED => self.mixer.on_music_started(),
                    events::MUSIC_PLAY_FAILED => self.mixer.on_music_failed(),
                    _ => log::debug!("bmk-jump: ignoring custom event {}", kind),
                },
                ref other => self.control.apply(other, self.cfg.world_width),
            }
        }
    }

    /// One frame of play: physics, camera, recycling, enemy, fall check, jump scare.
    fn step(&mut self, ctx: &mut EngineContext, frame: FrameTime) {
        let cfg = &self.cfg;
        let dt = frame.dt_scale;

        self.player.integrate(&self.control, dt, cfg);
        self.player.land(self.platforms.as_slice(), dt, cfg);

        self.scoreboard.follow(&mut self.player, &mut self.platforms, cfg);
        self.scoreboard.display.tick();

        self.platforms.recycle(cfg, self.rng.as_mut(), ctx);

        let hit = self.enemy.update(
            self.scoreboard.score,
            &self.platforms,
            &self.player.rect(),
            frame.now_ms,
            cfg,
        ) == EnemyEvent::Hit;
        if hit {
            self.game_over("enemy");
        }

        if self.player.pos.y > self.cfg.world_height {
            self.game_over("fell");
        }

        if self.lifecycle.is_over() {
            return;
        }
        let cues = self.scare.update(self.scoreboard.score, dt, &self.cfg);
        if cues.began {
            self.mixer.duck();
            self.mixer.play_scare();
        }
        if cues.finished {
            self.mixer.stop_scare();
            self.mixer.restore();
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            player: &self.player,
            platforms: self.platforms.as_slice(),
            enemy: &self.enemy,
            scoreboard: &self.scoreboard,
            scare: &self.scare,
            phase: self.lifecycle.phase(),
            game_over: self.lifecycle.is_over(),
            music_volume: self.mixer.volume(),
            music_playing: self.mixer.is_music_playing(),
        }
    }

    pub fn settings(&self) -> &JumpConfig {
        &self.cfg
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn phase(&self) -> GamePhase {
        self.lifecycle.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.lifecycle.is_over()
    }

    /// Result of the last finished game, if it was recorded for a signed-in user.
    pub fn last_record(&self) -> Option<GameRecord> {
        self.last_record
    }

    // ---- Accounts ----

    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        invited_by: Option<&str>,
    ) -> Result<User, PersistError> {
        let now = (self.wall_clock)();
        self.persistence.register(username, password, invited_by, now)
    }

    pub fn sign_in(&mut self, username: &str, password: &str) -> Result<User, PersistError> {
        let now = (self.wall_clock)();
        self.persistence.sign_in(username, password, now)
    }

    pub fn sign_out(&mut self) -> Result<(), PersistError> {
        self.persistence.sign_out()
    }

    pub fn current_user(&self) -> Option<User> {
        self.persistence.current_user()
    }

    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PersistError> {
        self.persistence.top(limit)
    }

    pub fn profile(&self) -> Result<PlayerStats, PersistError> {
        self.persistence.current_stats()
    }
}

impl Game for BmkJump {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.cfg.world_width,
            world_height: self.cfg.world_height,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        // Lay out a field for the menu backdrop; play starts on NEW_GAME.
        self.platforms.reset(&self.cfg, self.rng.as_mut(), ctx);
        log::info!(
            "bmk-jump: ready, signed in as {}",
            self.current_user()
                .map(|u| u.username)
                .unwrap_or_else(|| "nobody".to_string())
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let frame = ctx.frame;
        self.handle_input(ctx, input);

        if self.lifecycle.is_playing() {
            self.step(ctx, frame);
        }
        if self.lifecycle.tick(frame.delta_ms) {
            self.end_game(ctx);
        }

        self.mixer.tick(frame.delta_ms);
        for sound in self.mixer.take_sounds() {
            ctx.emit_sound(sound);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.snapshot().draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SOUND_PLAY_MUSIC, SOUND_PLAY_SCARE, SOUND_STOP_SCARE};
    use crate::jumpscare::ScarePhase;
    use bmk_engine::input::control::{KEY_LEFT, KEY_RIGHT};
    use bmk_engine::ScriptedRandom;
    use glam::Vec2;

    const STEP_MS: f32 = 1000.0 / 60.0;

    fn fake_clock() -> f64 {
        1_700_000_000_000.0
    }

    fn game_with(rng: Box<dyn RandomSource>) -> (BmkJump, EngineContext) {
        let mut game = BmkJump::with_parts(
            JumpConfig::default(),
            rng,
            Box::new(MemoryStore::new()),
            fake_clock,
        );
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Platforms pinned to the left edge, far from a centred player.
    fn unreachable_platforms() -> (BmkJump, EngineContext) {
        game_with(Box::new(ScriptedRandom::constant(0.0)))
    }

    /// Run one fixed-rate frame and return the frame's game events.
    fn frame(game: &mut BmkJump, ctx: &mut EngineContext, n: u64, input: &InputQueue) -> Vec<GameEvent> {
        ctx.clear_frame_data();
        ctx.frame = FrameTime::fixed(n as f64 * STEP_MS as f64, STEP_MS);
        game.update(ctx, input);
        ctx.events.clone()
    }

    fn custom(kind: u32) -> InputQueue {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 });
        q
    }

    #[test]
    fn waits_in_menu_until_new_game() {
        let (mut game, mut ctx) = unreachable_platforms();
        let y = game.player.pos.y;
        frame(&mut game, &mut ctx, 0, &InputQueue::new());
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.player.pos.y, y);

        frame(&mut game, &mut ctx, 1, &custom(events::NEW_GAME));
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn controls_queued_after_new_game_steer_the_fresh_player() {
        let (mut game, mut ctx) = unreachable_platforms();
        let mut q = custom(events::NEW_GAME);
        q.push(InputEvent::KeyDown { key_code: KEY_RIGHT });
        frame(&mut game, &mut ctx, 0, &q);

        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.control.right);
        assert!(game.player.vel.x > 0.0);
    }

    #[test]
    fn controls_queued_before_new_game_are_released() {
        let (mut game, mut ctx) = unreachable_platforms();
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: KEY_LEFT });
        q.push(InputEvent::Custom { kind: events::NEW_GAME, a: 0.0, b: 0.0, c: 0.0 });
        frame(&mut game, &mut ctx, 0, &q);

        assert!(!game.control.left);
        assert_eq!(game.player.vel.x, 0.0);
    }

    #[test]
    fn falling_through_ends_the_game_once() {
        let (mut game, mut ctx) = unreachable_platforms();
        game.start_new_game(&mut ctx);
        let empty = InputQueue::new();

        let mut n = 0;
        while !game.is_game_over() {
            frame(&mut game, &mut ctx, n, &empty);
            n += 1;
            assert!(n < 600, "player never fell");
        }
        assert!(game.player.pos.y > game.cfg.world_height);
        let frozen = game.player.pos;

        let mut game_over_events = Vec::new();
        for i in 0..90 {
            for e in frame(&mut game, &mut ctx, n + i, &empty) {
                game_over_events.push((i, e));
            }
        }
        assert_eq!(game_over_events.len(), 1);
        let (at, event) = game_over_events[0];
        // ~1000ms at 60 Hz
        assert!((58..=60).contains(&at), "fired after {} frames", at);
        assert_eq!(event.kind, game_events::GAME_OVER as f32);
        assert_eq!(event.a, game.score() as f32);
        assert_eq!(game.player.pos, frozen);
        assert_eq!(game.phase(), GamePhase::Finished);
    }

    #[test]
    fn game_over_and_end_game_are_idempotent() {
        let (mut game, mut ctx) = unreachable_platforms();
        game.register("ana", "pw", None).unwrap();
        game.start_new_game(&mut ctx);
        game.scoreboard.score = 420;

        game.game_over("enemy");
        game.game_over("fell");
        game.end_game(&mut ctx);
        game.end_game(&mut ctx);

        assert_eq!(ctx.events.len(), 1);
        assert_eq!(game.profile().unwrap().total_games, 1);
        let record = game.last_record().unwrap();
        assert!(record.new_record);
        assert_eq!(record.rank, 1);
        assert_eq!(ctx.events[0].b, 1.0);
    }

    #[test]
    fn restart_cancels_pending_end_game() {
        let (mut game, mut ctx) = unreachable_platforms();
        game.start_new_game(&mut ctx);
        game.game_over("fell");
        let empty = InputQueue::new();
        frame(&mut game, &mut ctx, 0, &empty);
        frame(&mut game, &mut ctx, 1, &custom(events::NEW_GAME));
        for n in 2..120 {
            assert!(frame(&mut game, &mut ctx, n, &empty).is_empty());
            if game.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn score_is_monotonic_and_field_stays_full() {
        let (mut game, mut ctx) = game_with(Box::new(Rng::new(1234)));
        game.start_new_game(&mut ctx);
        let mut last = 0;
        for n in 0..1200u64 {
            let mut q = InputQueue::new();
            match n % 90 {
                0 => q.push(InputEvent::KeyDown { key_code: KEY_LEFT }),
                30 => q.push(InputEvent::KeyUp { key_code: KEY_LEFT }),
                45 => q.push(InputEvent::KeyDown { key_code: KEY_RIGHT }),
                75 => q.push(InputEvent::KeyUp { key_code: KEY_RIGHT }),
                _ => {}
            }
            frame(&mut game, &mut ctx, n, &q);
            assert!(game.score() >= last);
            assert_eq!(game.platforms.len(), game.cfg.platform_count);
            last = game.score();
        }
    }

    #[test]
    fn same_seed_same_inputs_same_game() {
        let run = || {
            let (mut game, mut ctx) = game_with(Box::new(Rng::new(99)));
            game.start_new_game(&mut ctx);
            for n in 0..400u64 {
                let mut q = InputQueue::new();
                if n % 50 == 10 {
                    q.push(InputEvent::PointerDown { x: 300.0, y: 300.0 });
                }
                if n % 50 == 30 {
                    q.push(InputEvent::PointerUp { x: 300.0, y: 300.0 });
                }
                frame(&mut game, &mut ctx, n, &q);
            }
            let layout: Vec<Vec2> = game.platforms.iter().map(|p| p.pos).collect();
            (game.player.pos, game.score(), layout)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn enemy_hit_ends_the_game() {
        let (mut game, mut ctx) = unreachable_platforms();
        game.start_new_game(&mut ctx);
        game.enemy.active = true;
        game.enemy.mount = Some(game.platforms.as_slice()[3].id);
        game.player.pos = Vec2::new(0.0, game.platforms.as_slice()[3].pos.y);
        game.player.vel = Vec2::ZERO;
        frame(&mut game, &mut ctx, 0, &InputQueue::new());
        assert!(game.is_game_over());
        assert!(game.enemy.active);
    }

    #[test]
    fn first_gesture_starts_music() {
        let (mut game, mut ctx) = unreachable_platforms();
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: KEY_RIGHT });
        frame(&mut game, &mut ctx, 0, &q);
        assert_eq!(ctx.sounds, vec![SOUND_PLAY_MUSIC]);
        frame(&mut game, &mut ctx, 1, &custom(events::MUSIC_STARTED));
        assert!(game.mixer.is_music_playing());
    }

    #[test]
    fn game_over_interrupts_the_scare() {
        let (mut game, mut ctx) = unreachable_platforms();
        game.start_new_game(&mut ctx);
        game.scoreboard.score = 4800;
        frame(&mut game, &mut ctx, 0, &InputQueue::new());
        assert_eq!(game.scare.phase, ScarePhase::PreWarning);
        assert!(ctx.sounds.contains(&SOUND_PLAY_SCARE));

        game.game_over("fell");
        assert_eq!(game.scare.phase, ScarePhase::Idle);
        assert_eq!(game.mixer.volume(), game.cfg.music_volume);
        frame(&mut game, &mut ctx, 1, &InputQueue::new());
        assert!(ctx.sounds.contains(&SOUND_STOP_SCARE));
        assert_eq!(game.scare.next_trigger_score, 5000);
    }

    #[test]
    fn save_failure_still_reports_game_over() {
        let seeded = crate::persist::test_support::signed_in_ana();
        let mut game = BmkJump::with_parts(
            JumpConfig::default(),
            Box::new(ScriptedRandom::constant(0.0)),
            Box::new(crate::persist::test_support::ReadOnlyStore(seeded)),
            fake_clock,
        );
        assert_eq!(game.current_user().map(|u| u.username), Some("ana".to_string()));
        let mut ctx = EngineContext::new();
        game.start_new_game(&mut ctx);
        game.game_over("fell");
        game.end_game(&mut ctx);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(game.last_record(), None);
    }
}
