/// Number of game-defined HUD slots carried in every frame.
pub const HUD_FLOATS: usize = 16;

/// Fixed block of scalar presentation values (score, overlay opacity, volume, ...).
/// Slot meanings are defined by the game; the engine only transports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudBuffer {
    slots: [f32; HUD_FLOATS],
}

impl HudBuffer {
    pub fn new() -> Self {
        Self {
            slots: [0.0; HUD_FLOATS],
        }
    }

    /// Write a slot. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value;
        }
    }

    pub fn set_flag(&mut self, index: usize, flag: bool) {
        self.set(index, if flag { 1.0 } else { 0.0 });
    }

    pub fn get(&self, index: usize) -> f32 {
        self.slots.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots = [0.0; HUD_FLOATS];
    }
}

impl Default for HudBuffer {
    fn default() -> Self {
        Self::new()
    }
}
