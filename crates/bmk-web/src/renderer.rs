//! Renderers that publish frames into the flat f32 buffer the host reads.
//!
//! Both variants share one layout; they differ only in which instances they
//! publish. The host picks its drawing path from `HEADER_RENDER_MODE`.

use bmk_engine::bridge::protocol::*;
use bmk_engine::{FrameData, ProtocolLayout, RenderInstance, RenderMode, Renderer, HUD_FLOATS};

/// Writes frames into an owned `Vec<f32>` laid out per `ProtocolLayout`.
pub struct SharedBufferRenderer {
    mode: RenderMode,
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    view_width: f32,
    view_height: f32,
}

impl SharedBufferRenderer {
    pub fn new(mode: RenderMode, layout: ProtocolLayout, view_width: f32, view_height: f32) -> Self {
        let buffer = vec![0.0; layout.total_floats()];
        Self {
            mode,
            layout,
            buffer,
            view_width,
            view_height,
        }
    }

    /// The whole frame buffer.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer for host-side reads out of wasm memory.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    fn write_instances(&mut self, instances: &[RenderInstance]) -> usize {
        let count = instances.len().min(self.layout.max_instances);
        if count < instances.len() {
            log::debug!(
                "render: dropping {} instances over capacity {}",
                instances.len() - count,
                self.layout.max_instances
            );
        }
        let floats: &[f32] = bytemuck::cast_slice(&instances[..count]);
        let start = self.layout.instances.offset;
        self.buffer[start..start + floats.len()].copy_from_slice(floats);
        count
    }
}

impl Renderer for SharedBufferRenderer {
    fn backend(&self) -> &'static str {
        match self.mode {
            RenderMode::Flat2d => "shared-2d",
            RenderMode::Overlay3d => "shared-3d",
        }
    }

    fn mode(&self) -> RenderMode {
        self.mode
    }

    fn draw(&mut self, frame: &FrameData) {
        self.buffer[HEADER_LOCK] = 1.0;

        // HUD
        let hud_len = frame.hud.len().min(HUD_FLOATS);
        let hud_start = self.layout.hud.offset;
        self.buffer[hud_start..hud_start + hud_len].copy_from_slice(&frame.hud[..hud_len]);

        // Instances
        let (instance_count, has_focus) = match self.mode {
            RenderMode::Flat2d => (self.write_instances(frame.instances), false),
            RenderMode::Overlay3d => match frame.focus {
                Some(focus) => (self.write_instances(std::slice::from_ref(focus)), true),
                None => (0, false),
            },
        };

        // Sounds
        let sound_count = frame.sounds.len().min(self.layout.max_sounds);
        for (i, sound) in frame.sounds[..sound_count].iter().enumerate() {
            self.buffer[self.layout.sounds.offset + i] = sound.0 as f32;
        }

        // Events
        let event_count = frame.events.len().min(self.layout.max_events);
        let event_floats: &[f32] = bytemuck::cast_slice(&frame.events[..event_count]);
        let start = self.layout.events.offset;
        self.buffer[start..start + event_floats.len()].copy_from_slice(event_floats);

        // Header
        self.buffer[HEADER_FRAME_COUNTER] = frame.frame as f32;
        self.buffer[HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        self.buffer[HEADER_INSTANCE_COUNT] = instance_count as f32;
        self.buffer[HEADER_RENDER_MODE] = self.mode.as_f32();
        self.buffer[HEADER_WORLD_WIDTH] = frame.world_width;
        self.buffer[HEADER_WORLD_HEIGHT] = frame.world_height;
        self.buffer[HEADER_MAX_SOUNDS] = self.layout.max_sounds as f32;
        self.buffer[HEADER_SOUND_COUNT] = sound_count as f32;
        self.buffer[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        self.buffer[HEADER_EVENT_COUNT] = event_count as f32;
        self.buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.buffer[HEADER_HUD_FLOATS] = HUD_FLOATS as f32;
        self.buffer[HEADER_VIEW_WIDTH] = self.view_width;
        self.buffer[HEADER_VIEW_HEIGHT] = self.view_height;
        self.buffer[HEADER_HAS_FOCUS] = if has_focus { 1.0 } else { 0.0 };

        self.buffer[HEADER_LOCK] = 0.0;
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.view_width = width;
        self.view_height = height;
        self.buffer[HEADER_VIEW_WIDTH] = width;
        self.buffer[HEADER_VIEW_HEIGHT] = height;
    }
}
