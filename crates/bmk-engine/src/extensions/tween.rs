// extensions/tween.rs
//
// Scalar tweens advanced from the frame loop.
//
// Usage:
//   let mut volume = Fader::new(0.5);
//   volume.fade_to(0.1, 0.001);        // 0.1 per 100ms
//   let v = volume.tick(delta_ms);     // once per frame
//
// A Fader owns at most one tween, so starting a new fade replaces the old one
// instead of racing it.

/// Linear interpolation; `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A single linear scalar animation from `from` to `to` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration in milliseconds.
    pub duration_ms: f32,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, self.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Advance and return the new value.
    pub fn tick(&mut self, delta_ms: f32) -> f32 {
        self.elapsed_ms += delta_ms.max(0.0);
        self.value()
    }
}

/// A value that can be snapped or faded toward a target at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fader {
    value: f32,
    tween: Option<Tween>,
}

impl Fader {
    pub fn new(value: f32) -> Self {
        Self { value, tween: None }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the running fade, or the current value when idle.
    pub fn target(&self) -> f32 {
        self.tween.map(|t| t.to).unwrap_or(self.value)
    }

    pub fn is_fading(&self) -> bool {
        self.tween.is_some()
    }

    /// Start a linear fade toward `to`, moving `rate_per_ms` units per millisecond.
    /// Replaces any fade already in progress.
    pub fn fade_to(&mut self, to: f32, rate_per_ms: f32) {
        let distance = (to - self.value).abs();
        if distance <= f32::EPSILON || rate_per_ms <= 0.0 {
            self.snap(to);
            return;
        }
        self.tween = Some(Tween::new(self.value, to, distance / rate_per_ms));
    }

    /// Jump straight to `value`, cancelling any fade.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.tween = None;
    }

    /// Advance the running fade, if any. Returns the current value.
    pub fn tick(&mut self, delta_ms: f32) -> f32 {
        if let Some(tween) = &mut self.tween {
            self.value = tween.tick(delta_ms);
            if tween.is_complete() {
                self.value = tween.to;
                self.tween = None;
            }
        }
        self.value
    }
}

impl Default for Fader {
    fn default() -> Self {
        Self::new(0.0)
    }
}
