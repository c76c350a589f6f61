use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to the shared buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Positions are the top-left corner in playfield units (y grows downward).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Game-defined sprite kind (player, platform, enemy, ...).
    pub kind: f32,
    /// X position in playfield space.
    pub x: f32,
    /// Y position in playfield space.
    pub y: f32,
    /// Width in playfield units.
    pub w: f32,
    /// Height in playfield units.
    pub h: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub _pad: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: u32, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: kind as f32,
            x,
            y,
            w,
            h,
            rotation: 0.0,
            alpha: 1.0,
            _pad: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Render buffer containing all sprite instances for one frame.
pub struct RenderBuffer {
    /// Sprite instances in draw order.
    pub instances: Vec<RenderInstance>,
    /// The instance a 3D scene should follow (the player). Also present in `instances`.
    pub focus: Option<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            focus: None,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.focus = None;
    }

    /// Append an instance. Instances past capacity are dropped.
    pub fn push(&mut self, instance: RenderInstance) {
        if self.instances.len() < self.capacity {
            self.instances.push(instance);
        }
    }

    /// Append an instance and mark it as the focus.
    pub fn push_focus(&mut self, instance: RenderInstance) {
        self.focus = Some(instance);
        self.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 32);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push_focus(RenderInstance::new(1, 10.0, 20.0, 40.0, 40.0));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.focus.map(|f| f.x), Some(10.0));
    }

    #[test]
    fn push_past_capacity_is_dropped() {
        let mut buf = RenderBuffer::with_capacity(1);
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 1);
    }

    #[test]
    fn clear_drops_focus() {
        let mut buf = RenderBuffer::new();
        buf.push_focus(RenderInstance::default());
        buf.clear();
        assert!(buf.focus.is_none());
        assert_eq!(buf.instance_count(), 0);
    }
}
