use bmk_engine::EntityId;
use glam::Vec2;

use crate::config::JumpConfig;
use crate::geometry::Rect;
use crate::world::PlatformField;

/// What the enemy stage did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyEvent {
    /// Nothing to report.
    None,
    /// Appeared on the given platform for the given band threshold.
    Spawned { threshold: i64, mount: EntityId },
    /// Its platform left the playfield.
    Despawned,
    /// Touched the player.
    Hit,
}

/// The single antagonist. Rides a platform; spawns at most once per score band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub active: bool,
    /// Top-left corner. `y` follows the mount platform every tick.
    pub pos: Vec2,
    pub size: Vec2,
    /// Platform it stands on. Only meaningful while active.
    pub mount: Option<EntityId>,
    /// Earliest score at which the next spawn can happen (informational).
    pub next_spawn_score: i64,
    /// Threshold of the last band that spawned. Spawns require a strictly larger threshold.
    pub last_spawn_score: i64,
    /// Pulsing warning opacity.
    pub warning_alpha: f32,
}

impl Enemy {
    pub fn new(cfg: &JumpConfig) -> Self {
        Self {
            active: false,
            pos: Vec2::ZERO,
            size: Vec2::splat(cfg.enemy_size),
            mount: None,
            next_spawn_score: cfg.enemy_spawn_score as i64,
            last_spawn_score: 0,
            warning_alpha: 0.0,
        }
    }

    /// `(next round mark, spawn threshold)` for a score.
    pub fn band_for(score: u32, cfg: &JumpConfig) -> (i64, i64) {
        let band = cfg.enemy_band.max(1) as i64;
        let score = score as i64;
        let next_mark = (score + band - 1).div_euclid(band) * band;
        (next_mark, next_mark - cfg.enemy_threshold_margin as i64)
    }

    /// Whether a spawn is due at this score (ignores platform availability).
    pub fn spawn_due(&self, score: u32, cfg: &JumpConfig) -> bool {
        let (next_mark, threshold) = Self::band_for(score, cfg);
        let s = score as i64;
        !self.active && s >= threshold && s < next_mark && threshold > self.last_spawn_score
    }

    /// Hit-box used against the player, shrunk on every side.
    pub fn hitbox(&self, cfg: &JumpConfig) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
        .inset(cfg.enemy_hitbox_inset)
    }

    /// Spawn, track the mount platform, pulse the warning and test the player.
    pub fn update(
        &mut self,
        score: u32,
        platforms: &PlatformField,
        player: &Rect,
        now_ms: f64,
        cfg: &JumpConfig,
    ) -> EnemyEvent {
        let mut event = EnemyEvent::None;

        if self.spawn_due(score, cfg) {
            let (_, threshold) = Self::band_for(score, cfg);
            // Without an upper-third platform the band stays open; retried next tick.
            if let Some(platform) = platforms.topmost_above(cfg.world_height / 3.0) {
                self.active = true;
                self.mount = Some(platform.id);
                self.pos = Vec2::new(
                    platform.pos.x + platform.size.x / 2.0 - self.size.x / 2.0,
                    platform.pos.y,
                );
                self.warning_alpha = 0.8;
                self.last_spawn_score = threshold;
                self.next_spawn_score = threshold + cfg.enemy_band as i64;
                log::info!(
                    "enemy: spawned for threshold {} on platform {:?} at score {}",
                    threshold,
                    platform.id,
                    score
                );
                event = EnemyEvent::Spawned {
                    threshold,
                    mount: platform.id,
                };
            }
        }

        if !self.active {
            return event;
        }

        let mount = self.mount.and_then(|id| platforms.get(id));
        match mount {
            Some(platform) => self.pos.y = platform.pos.y,
            None => {
                self.deactivate();
                return EnemyEvent::Despawned;
            }
        }
        if self.pos.y > cfg.world_height {
            self.deactivate();
            return EnemyEvent::Despawned;
        }

        self.warning_alpha = 0.5 + 0.3 * (now_ms / 300.0).sin() as f32;

        if player.overlaps(&self.hitbox(cfg)) {
            log::info!("enemy: hit player at score {}", score);
            return EnemyEvent::Hit;
        }
        event
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.mount = None;
        self.warning_alpha = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmk_engine::{EngineContext, RandomSource, ScriptedRandom};

    fn field(rng: &mut dyn RandomSource) -> PlatformField {
        let mut f = PlatformField::new();
        f.reset(&JumpConfig::default(), rng, &mut EngineContext::new());
        f
    }

    fn far_away() -> Rect {
        Rect::new(0.0, 1000.0, 40.0, 40.0)
    }

    #[test]
    fn band_math() {
        let cfg = JumpConfig::default();
        assert_eq!(Enemy::band_for(800, &cfg), (1000, 600));
        assert_eq!(Enemy::band_for(1000, &cfg), (1000, 600));
        assert_eq!(Enemy::band_for(1001, &cfg), (2000, 1600));
        assert_eq!(Enemy::band_for(0, &cfg), (0, -400));
    }

    #[test]
    fn spawn_window_at_800() {
        let cfg = JumpConfig::default();
        let e = Enemy::new(&cfg);
        assert!(e.spawn_due(800, &cfg));
        assert!(e.spawn_due(600, &cfg));
        assert!(!e.spawn_due(599, &cfg));
        assert!(!e.spawn_due(1000, &cfg));
        assert!(!e.spawn_due(0, &cfg));
    }

    #[test]
    fn spawns_on_topmost_upper_platform() {
        let cfg = JumpConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let platforms = field(&mut rng);
        let mut e = Enemy::new(&cfg);

        let ev = e.update(800, &platforms, &far_away(), 0.0, &cfg);

        let top = platforms.topmost_above(200.0).unwrap();
        assert_eq!(ev, EnemyEvent::Spawned { threshold: 600, mount: top.id });
        assert!(e.active);
        assert_eq!(e.last_spawn_score, 600);
        assert_eq!(e.pos.x, top.pos.x + 30.0 - 20.0);
        assert_eq!(e.pos.y, top.pos.y);
    }

    #[test]
    fn one_spawn_per_band() {
        let cfg = JumpConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let platforms = field(&mut rng);
        let mut e = Enemy::new(&cfg);

        e.update(700, &platforms, &far_away(), 0.0, &cfg);
        e.active = false; // e.g. scrolled away
        let ev = e.update(900, &platforms, &far_away(), 0.0, &cfg);
        assert_eq!(ev, EnemyEvent::None);
        assert!(!e.active);

        let ev = e.update(1700, &platforms, &far_away(), 0.0, &cfg);
        assert!(matches!(ev, EnemyEvent::Spawned { threshold: 1600, .. }));
    }

    #[test]
    fn no_upper_platform_keeps_band_open() {
        let cfg = JumpConfig {
            platform_count: 3, // 600, 540, 480: none in the upper third
            ..JumpConfig::default()
        };
        let mut rng = ScriptedRandom::constant(0.5);
        let mut platforms = PlatformField::new();
        platforms.reset(&cfg, &mut rng, &mut EngineContext::new());
        let mut e = Enemy::new(&cfg);

        assert_eq!(e.update(800, &platforms, &far_away(), 0.0, &cfg), EnemyEvent::None);
        assert_eq!(e.last_spawn_score, 0);
        assert!(e.spawn_due(800, &cfg));
    }

    #[test]
    fn follows_platform_and_despawns_with_it() {
        let cfg = JumpConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let mut platforms = field(&mut rng);
        let mut ctx = EngineContext::new();
        let mut e = Enemy::new(&cfg);
        e.update(800, &platforms, &far_away(), 0.0, &cfg);

        platforms.scroll(25.0);
        e.update(810, &platforms, &far_away(), 0.0, &cfg);
        let mount = platforms.get(e.mount.unwrap()).unwrap();
        assert_eq!(e.pos.y, mount.pos.y);

        platforms.scroll(2000.0);
        platforms.recycle(&cfg, &mut rng, &mut ctx);
        assert_eq!(e.update(820, &platforms, &far_away(), 0.0, &cfg), EnemyEvent::Despawned);
        assert!(!e.active);
    }

    #[test]
    fn hitbox_is_forgiving_at_the_edges() {
        let cfg = JumpConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let platforms = field(&mut rng);
        let mut e = Enemy::new(&cfg);
        e.update(800, &platforms, &far_away(), 0.0, &cfg);

        // Player overlapping only the outer 5px band: no hit.
        let grazing = Rect::new(e.pos.x - 36.0, e.pos.y, 40.0, 40.0);
        assert_eq!(e.update(800, &platforms, &grazing, 0.0, &cfg), EnemyEvent::None);

        let centered = Rect::new(e.pos.x, e.pos.y, 40.0, 40.0);
        assert_eq!(e.update(800, &platforms, &centered, 0.0, &cfg), EnemyEvent::Hit);
    }

    #[test]
    fn warning_pulses_between_bounds() {
        let cfg = JumpConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let platforms = field(&mut rng);
        let mut e = Enemy::new(&cfg);
        for i in 0..50 {
            e.update(800, &platforms, &far_away(), i as f64 * 97.0, &cfg);
            assert!(e.warning_alpha >= 0.2 - 1e-6 && e.warning_alpha <= 0.8 + 1e-6);
        }
    }
}
