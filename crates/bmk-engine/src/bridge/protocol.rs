//! Wire layout of the frame buffer shared with the host.
//!
//! Every value is an f32. Sections follow each other with no padding:
//!
//! ```text
//! header    16 floats, indexed by the HEADER_* constants
//! hud       HUD_FLOATS game-defined slots
//! instances max_instances x INSTANCE_FLOATS
//! sounds    max_sounds x 1 (sound id)
//! events    max_events x EVENT_FLOATS (kind, a, b, c)
//! ```
//!
//! Capacities are repeated in the header each frame so the host can derive
//! the same offsets without sharing this file.

use std::ops::Range;

use crate::api::game::GameConfig;
use crate::renderer::hud::HUD_FLOATS;

pub const HEADER_FLOATS: usize = 16;

/// 1.0 while Rust is writing the frame.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_RENDER_MODE: usize = 4;
pub const HEADER_WORLD_WIDTH: usize = 5;
pub const HEADER_WORLD_HEIGHT: usize = 6;
pub const HEADER_MAX_SOUNDS: usize = 7;
pub const HEADER_SOUND_COUNT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;
pub const HEADER_HUD_FLOATS: usize = 12;
/// Fitted display size in CSS pixels.
pub const HEADER_VIEW_WIDTH: usize = 13;
pub const HEADER_VIEW_HEIGHT: usize = 14;
/// 1.0 when instance 0 is the focus pose, 0.0 otherwise.
pub const HEADER_HAS_FOCUS: usize = 15;

pub const PROTOCOL_VERSION: f32 = 1.0;

pub const INSTANCE_FLOATS: usize = 8;
pub const EVENT_FLOATS: usize = 4;

/// A contiguous run of floats inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub offset: usize,
    pub len: usize,
}

impl Section {
    fn after(prev: Section, len: usize) -> Self {
        Self {
            offset: prev.end(),
            len,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_sounds: usize,
    pub max_events: usize,
    pub hud: Section,
    pub instances: Section,
    pub sounds: Section,
    pub events: Section,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let header = Section {
            offset: 0,
            len: HEADER_FLOATS,
        };
        let hud = Section::after(header, HUD_FLOATS);
        let instances = Section::after(hud, max_instances * INSTANCE_FLOATS);
        let sounds = Section::after(instances, max_sounds);
        let events = Section::after(sounds, max_events * EVENT_FLOATS);
        Self {
            max_instances,
            max_sounds,
            max_events,
            hud,
            instances,
            sounds,
            events,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }

    pub fn total_floats(&self) -> usize {
        self.events.end()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_floats() * std::mem::size_of::<f32>()
    }
}
