/// Timing for a single frame, handed to the game every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Host timestamp of this frame in milliseconds.
    pub now_ms: f64,
    /// Milliseconds since the previous frame (after stall clamping).
    pub delta_ms: f32,
    /// Physics scale: 1.0 at the target frame rate, capped at `max_scale`.
    pub dt_scale: f32,
}

impl FrameTime {
    /// A single frame at exactly the target rate. Handy for tests and replays.
    pub fn fixed(now_ms: f64, fixed_step_ms: f32) -> Self {
        Self {
            now_ms,
            delta_ms: fixed_step_ms,
            dt_scale: 1.0,
        }
    }
}

/// Variable-rate frame clock.
/// Turns monotonically increasing host timestamps into a clamped `dt_scale`
/// so physics behaves the same regardless of the display refresh rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Target frame interval in milliseconds (1000/60 by default).
    fixed_step_ms: f32,
    /// Upper bound for `dt_scale`.
    max_scale: f32,
    /// Gaps longer than this (tab backgrounded, debugger pause) count as one fixed step.
    stall_ms: f32,
    last_ms: Option<f64>,
    frames: u64,
}

impl FrameClock {
    pub fn new(fixed_step_ms: f32, max_scale: f32, stall_ms: f32) -> Self {
        Self {
            fixed_step_ms,
            max_scale,
            stall_ms,
            last_ms: None,
            frames: 0,
        }
    }

    /// Feed the timestamp of a new frame. The first frame reports a zero delta.
    pub fn advance(&mut self, now_ms: f64) -> FrameTime {
        let mut delta_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;

        if delta_ms > self.stall_ms {
            log::debug!("frame stall of {:.0}ms, substituting one fixed step", delta_ms);
            delta_ms = self.fixed_step_ms;
        }

        FrameTime {
            now_ms,
            delta_ms,
            dt_scale: self.scale_for(delta_ms),
        }
    }

    /// `min(delta / fixed_step, max_scale)`.
    pub fn scale_for(&self, delta_ms: f32) -> f32 {
        if self.fixed_step_ms <= 0.0 {
            return 1.0;
        }
        (delta_ms / self.fixed_step_ms).min(self.max_scale)
    }

    /// Forget the previous timestamp so the next frame starts from a zero delta.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Number of frames seen since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fixed_step_ms(&self) -> f32 {
        self.fixed_step_ms
    }
}
