//! Renderer trait: the boundary between the frame loop and whatever draws it.
//!
//! The game describes a frame as sprites plus HUD values; a `Renderer` decides
//! what part of that description its backend needs. Games never see which
//! renderer is active.

use super::instance::RenderInstance;
use crate::api::types::{GameEvent, SoundEvent};

/// Presentation style, selected once when the runner is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The host draws every sprite on a 2D canvas.
    #[default]
    Flat2d,
    /// The host draws a 3D scene; only the focus pose and HUD values are published.
    Overlay3d,
}

impl RenderMode {
    /// Wire value written into the frame header.
    pub fn as_f32(self) -> f32 {
        match self {
            RenderMode::Flat2d => 0.0,
            RenderMode::Overlay3d => 1.0,
        }
    }

    /// Parse the host's mode flag. Unknown values fall back to `Flat2d`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => RenderMode::Overlay3d,
            _ => RenderMode::Flat2d,
        }
    }
}

/// Renderer trait for frame-output backends.
pub trait Renderer {
    /// Backend identifier (e.g., "shared-2d", "shared-3d").
    fn backend(&self) -> &'static str;

    /// The presentation style this renderer implements.
    fn mode(&self) -> RenderMode;

    /// Publish one complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Handle a viewport change (display size in CSS pixels).
    fn resize(&mut self, width: f32, height: f32);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Frame counter since the runner started.
    pub frame: u64,
    /// Sprite instances in draw order.
    pub instances: &'a [RenderInstance],
    /// The instance a 3D scene should follow, if any.
    pub focus: Option<&'a RenderInstance>,
    /// Game-defined HUD slots.
    pub hud: &'a [f32],
    /// Sounds emitted during this frame.
    pub sounds: &'a [SoundEvent],
    /// Game events emitted during this frame.
    pub events: &'a [GameEvent],
    /// Playfield dimensions.
    pub world_width: f32,
    pub world_height: f32,
}
