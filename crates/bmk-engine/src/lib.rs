pub mod api;
pub mod core;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod storage;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use core::rng::{RandomSource, Rng, ScriptedRandom};
pub use core::time::{FrameClock, FrameTime};
pub use core::timer::Countdown;
pub use renderer::hud::{HudBuffer, HUD_FLOATS};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::traits::{FrameData, RenderMode, Renderer};
pub use renderer::viewport::Viewport;
pub use input::control::ControlState;
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use storage::{KeyValueStore, MemoryStore, StorageError};

// Extensions
pub use extensions::{Fader, Tween, lerp};
