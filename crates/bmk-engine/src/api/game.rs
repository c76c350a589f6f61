use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::time::FrameTime;
use crate::input::queue::InputQueue;
use crate::renderer::hud::HudBuffer;
use crate::renderer::instance::RenderBuffer;

/// Frame timing, playfield size and buffer capacities a game asks the runner for.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Target frame interval in milliseconds (default: 1000/60).
    pub fixed_step_ms: f32,
    /// Upper bound for the per-frame physics scale (default: 2.0).
    pub max_frame_scale: f32,
    /// Frame gaps longer than this are treated as a single fixed step (default: 100ms).
    pub stall_ms: f32,
    /// Playfield width in game units.
    pub world_width: f32,
    /// Playfield height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 16).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 16).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_step_ms: 1000.0 / 60.0,
            max_frame_scale: 2.0,
            stall_ms: 100.0,
            world_width: 400.0,
            world_height: 600.0,
            max_instances: 64,
            max_sounds: 16,
            max_events: 16,
        }
    }
}

/// What the runner drives: one `update` and one `render` per host frame.
pub trait Game {
    /// Read once, when the runner is built.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Runs exactly once per host frame; `ctx.frame` carries the timing.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only render pass: describe the current state as sprites and HUD values.
    fn render(&self, ctx: &mut RenderContext);
}

/// Per-frame timing plus the outboxes for host-bound sounds and events.
pub struct EngineContext {
    /// Timing of the frame being processed.
    pub frame: FrameTime,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            frame: FrameTime::default(),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Ids are never reused within a session.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context handed to `Game::render`.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub hud: &'a mut HudBuffer,
}
