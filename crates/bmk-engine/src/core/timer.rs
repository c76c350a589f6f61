/// One-shot countdown advanced from the frame loop.
///
/// Replaces host-side `setTimeout` handles: the countdown lives inside the
/// state it acts on, so resetting that state discards any pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining_ms: Option<f32>,
}

impl Countdown {
    /// An idle countdown.
    pub fn idle() -> Self {
        Self { remaining_ms: None }
    }

    /// Arm (or re-arm) the countdown.
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = Some(duration_ms.max(0.0));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<f32> {
        self.remaining_ms
    }

    /// Advance by `delta_ms`. Returns `true` exactly once, on the tick the deadline passes.
    pub fn tick(&mut self, delta_ms: f32) -> bool {
        match self.remaining_ms {
            Some(remaining) => {
                let left = remaining - delta_ms;
                if left <= 0.0 {
                    self.remaining_ms = None;
                    true
                } else {
                    self.remaining_ms = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}
