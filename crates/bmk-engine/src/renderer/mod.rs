pub mod hud;
pub mod instance;
pub mod traits;
pub mod viewport;

// Re-export key types for convenient access
pub use hud::{HudBuffer, HUD_FLOATS};
pub use instance::{RenderBuffer, RenderInstance};
pub use traits::{FrameData, RenderMode, Renderer};
pub use viewport::Viewport;
