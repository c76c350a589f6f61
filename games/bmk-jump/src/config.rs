use serde::Deserialize;

/// Every tunable of the game in one place. Loaded once at init; never changed mid-game.
///
/// Distances are playfield units (the 400x600 base viewport), velocities are
/// units per 60 Hz frame, durations in "frames" are 60 Hz frame equivalents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    // Playfield
    pub world_width: f32,
    pub world_height: f32,

    // Player physics
    pub player_size: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub move_speed: f32,
    pub max_velocity_x: f32,
    /// Per-frame horizontal damping factor when no direction is held.
    pub friction: f32,
    /// Cosmetic tilt while steering, in radians.
    pub tilt_rotation: f32,

    // Platforms
    pub platform_count: usize,
    pub platform_width: f32,
    pub platform_height: f32,
    pub initial_spacing: f32,
    pub gap_min: f32,
    pub gap_max: f32,

    // Enemy
    pub enemy_spawn_score: u32,
    pub enemy_threshold_margin: u32,
    pub enemy_band: u32,
    pub enemy_size: f32,
    pub enemy_hitbox_inset: f32,

    // Jump scare
    pub scare_trigger_score: u32,
    pub scare_lead: u32,
    pub scare_pre_frames: f32,
    pub scare_active_frames: f32,
    pub scare_fade_frames: f32,
    pub scare_increment: u32,

    // Lifecycle
    pub game_over_delay_ms: f32,

    // Audio
    pub music_volume: f32,
    pub ducked_volume: f32,
    /// Volume units per millisecond (0.1 per 100ms).
    pub fade_rate_per_ms: f32,
    pub audio_retry_ms: f32,

    /// Seed for platform placement. 0 picks one from the wall clock.
    pub seed: u64,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            world_width: 400.0,
            world_height: 600.0,

            player_size: 40.0,
            jump_force: -15.0,
            gravity: 0.4,
            move_speed: 0.8,
            max_velocity_x: 7.5,
            friction: 0.92,
            tilt_rotation: 0.2,

            platform_count: 15,
            platform_width: 60.0,
            platform_height: 15.0,
            initial_spacing: 60.0,
            gap_min: 40.0,
            gap_max: 80.0,

            enemy_spawn_score: 800,
            enemy_threshold_margin: 400,
            enemy_band: 1000,
            enemy_size: 40.0,
            enemy_hitbox_inset: 5.0,

            scare_trigger_score: 5000,
            scare_lead: 200,
            scare_pre_frames: 180.0,
            scare_active_frames: 120.0,
            scare_fade_frames: 30.0,
            scare_increment: 5000,

            game_over_delay_ms: 1000.0,

            music_volume: 0.5,
            ducked_volume: 0.1,
            fade_rate_per_ms: 0.001,
            audio_retry_ms: 1000.0,

            seed: 0,
        }
    }
}

/// Tuning shipped inside the wasm module.
const BUNDLED: &str = include_str!("../bmk-jump.json");

impl JumpConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The bundled `bmk-jump.json`, or the built-in defaults if it does not parse.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED).unwrap_or_else(|e| {
            log::warn!("bmk-jump: bundled config rejected ({}); using defaults", e);
            Self::default()
        })
    }
}
