use bmk_engine::{EngineContext, EntityId, RandomSource};
use glam::Vec2;

use crate::config::JumpConfig;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub id: EntityId,
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(id: EntityId, x: f32, y: f32, cfg: &JumpConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(cfg.platform_width, cfg.platform_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// The live platforms, in creation order.
///
/// After `reset` and after every `recycle` the field holds exactly
/// `cfg.platform_count` platforms.
#[derive(Debug, Clone, Default)]
pub struct PlatformField {
    platforms: Vec<Platform>,
}

impl PlatformField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a fresh column from the bottom edge upward at fixed spacing.
    pub fn reset(&mut self, cfg: &JumpConfig, rng: &mut dyn RandomSource, ctx: &mut EngineContext) {
        self.platforms.clear();
        for i in 0..cfg.platform_count {
            let x = random_x(cfg, rng);
            let y = cfg.world_height - i as f32 * cfg.initial_spacing;
            self.platforms.push(Platform::new(ctx.next_id(), x, y, cfg));
        }
    }

    /// Shift every platform down by `dy` (camera scroll).
    pub fn scroll(&mut self, dy: f32) {
        for p in &mut self.platforms {
            p.pos.y += dy;
        }
    }

    /// Drop platforms at or below the bottom edge, then top the field back up.
    /// Returns how many platforms were replaced.
    pub fn recycle(
        &mut self,
        cfg: &JumpConfig,
        rng: &mut dyn RandomSource,
        ctx: &mut EngineContext,
    ) -> usize {
        self.platforms.retain(|p| p.pos.y < cfg.world_height);
        let mut added = 0;
        while self.platforms.len() < cfg.platform_count {
            let last_y = self
                .platforms
                .last()
                .map(|p| p.pos.y)
                .unwrap_or(cfg.world_height);
            let x = random_x(cfg, rng);
            let y = last_y - rng.range(cfg.gap_min, cfg.gap_max);
            self.platforms.push(Platform::new(ctx.next_id(), x, y, cfg));
            added += 1;
        }
        added
    }

    pub fn get(&self, id: EntityId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// The highest platform whose top is above `limit_y`. Ties keep the older platform.
    pub fn topmost_above(&self, limit_y: f32) -> Option<&Platform> {
        self.platforms
            .iter()
            .filter(|p| p.pos.y < limit_y)
            .fold(None, |best: Option<&Platform>, p| match best {
                Some(b) if b.pos.y <= p.pos.y => Some(b),
                _ => Some(p),
            })
    }

    pub fn as_slice(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

fn random_x(cfg: &JumpConfig, rng: &mut dyn RandomSource) -> f32 {
    rng.next_f32() * (cfg.world_width - cfg.platform_width)
}
