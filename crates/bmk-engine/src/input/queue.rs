/// Raw host input. Games fold these into `ControlState` before physics reads them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at playfield coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended (or was cancelled) at playfield coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A key was pressed. `key_code` is the DOM `keyCode`.
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Device orientation changed; `gamma` is the left/right tilt in degrees.
    Tilt { gamma: f32 },
    /// Menu buttons and media callbacks. `kind` is game-defined; `a`, `b`, `c` are payload.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Whether this event counts as a user gesture (unlocks audio playback in browsers).
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown { .. } | InputEvent::KeyDown { .. }
        )
    }
}

/// Events received from the host since the last frame.
/// The runner pushes as the host calls in, the game reads once per frame, then the runner clears.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Pending events in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
