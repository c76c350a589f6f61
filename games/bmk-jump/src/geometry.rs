use glam::Vec2;

/// Axis-aligned rectangle, top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect {
            min: self.min + Vec2::splat(amount),
            size: (self.size - Vec2::splat(amount * 2.0)).max(Vec2::ZERO),
        }
    }
}
