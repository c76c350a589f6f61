use super::queue::InputEvent;

/// DOM key code for ArrowLeft.
pub const KEY_LEFT: u32 = 37;
/// DOM key code for ArrowRight.
pub const KEY_RIGHT: u32 = 39;

/// Tilt beyond this many degrees steers the player.
pub const TILT_THRESHOLD_DEG: f32 = 10.0;

/// Normalized steering state: the only input the physics stage sees.
///
/// Keyboard, touch halves and device tilt all fold into this pair of booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
}

impl ControlState {
    /// Fold one raw event into the held state.
    /// `playfield_width` decides which half of the screen a touch lands in.
    pub fn apply(&mut self, event: &InputEvent, playfield_width: f32) {
        match *event {
            InputEvent::KeyDown { key_code: KEY_LEFT } => self.left = true,
            InputEvent::KeyDown { key_code: KEY_RIGHT } => self.right = true,
            InputEvent::KeyUp { key_code: KEY_LEFT } => self.left = false,
            InputEvent::KeyUp { key_code: KEY_RIGHT } => self.right = false,
            InputEvent::PointerDown { x, .. } => {
                let left_half = x < playfield_width / 2.0;
                self.left = left_half;
                self.right = !left_half;
            }
            InputEvent::PointerUp { .. } => self.release(),
            InputEvent::Tilt { gamma } => {
                self.left = gamma < -TILT_THRESHOLD_DEG;
                self.right = gamma > TILT_THRESHOLD_DEG;
            }
            _ => {}
        }
    }

    pub fn release(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// -1, 0 or +1. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}
