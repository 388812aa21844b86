//! Pointer position → normalized camera offset.

/// Multiplier applied after normalizing by the viewport size.
pub const POINTER_SCALE: f32 = 2.0;

/// Latest pointer-derived offset. Updated on every pointer-move event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSampler {
    x: f32,
    y: f32,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position in surface pixels.
    ///
    /// The offset is `((pos - viewport / 2) / viewport) * POINTER_SCALE` per
    /// axis, clamped to `[-1, 1]`. Degenerate viewports are ignored.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.x = ((x - width * 0.5) / width * POINTER_SCALE).clamp(-1.0, 1.0);
        self.y = ((y - height * 0.5) / height * POINTER_SCALE).clamp(-1.0, 1.0);
    }

    /// Pointer left the surface: drift back to centre.
    pub fn on_pointer_leave(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_zero() {
        let mut p = PointerSampler::new();
        p.on_pointer_move(400.0, 300.0, 800.0, 600.0);
        assert_eq!(p.offset(), (0.0, 0.0));
    }

    #[test]
    fn corners_reach_unit_offset() {
        let mut p = PointerSampler::new();
        p.on_pointer_move(800.0, 0.0, 800.0, 600.0);
        assert_eq!(p.offset(), (1.0, -1.0));
    }

    #[test]
    fn outside_surface_is_clamped() {
        let mut p = PointerSampler::new();
        p.on_pointer_move(-5000.0, 9000.0, 800.0, 600.0);
        assert_eq!(p.offset(), (-1.0, 1.0));
    }

    #[test]
    fn zero_viewport_ignored() {
        let mut p = PointerSampler::new();
        p.on_pointer_move(800.0, 0.0, 800.0, 600.0);
        p.on_pointer_move(10.0, 10.0, 0.0, 0.0);
        assert_eq!(p.offset(), (1.0, -1.0));
        p.on_pointer_leave();
        assert_eq!(p.offset(), (0.0, 0.0));
    }
}
