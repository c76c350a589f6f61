/// Fixed-aspect playfield fitted into a host window.
///
/// Game logic always runs in base units (e.g. 400x600); only the displayed size changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Playfield width in game units.
    pub base_width: f32,
    /// Playfield height in game units.
    pub base_height: f32,
    /// Displayed width in CSS pixels.
    pub display_width: f32,
    /// Displayed height in CSS pixels.
    pub display_height: f32,
}

impl Viewport {
    pub fn new(base_width: f32, base_height: f32) -> Self {
        Self {
            base_width,
            base_height,
            display_width: base_width,
            display_height: base_height,
        }
    }

    /// Fit the playfield inside the window, keeping the aspect ratio.
    /// The display never grows past the base size.
    pub fn resize(&mut self, window_width: f32, window_height: f32) {
        if window_width <= 0.0 || window_height <= 0.0 {
            return;
        }
        let horiz_ratio = window_width / self.base_width;
        let vert_ratio = window_height / self.base_height;
        let scale = horiz_ratio.min(vert_ratio).min(1.0);
        self.display_width = self.base_width * scale;
        self.display_height = self.base_height * scale;
    }

    /// Display pixels per game unit.
    pub fn scale(&self) -> f32 {
        self.display_width / self.base_width
    }

    /// Convert a point in display pixels to game units.
    pub fn to_world(&self, x: f32, y: f32) -> (f32, f32) {
        let s = self.scale();
        if s <= 0.0 {
            return (x, y);
        }
        (x / s, y / s)
    }
}
