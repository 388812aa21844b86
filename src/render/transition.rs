//! Book open/close transition driver.
//!
//! A single openness scalar is eased toward its target every frame and
//! mapped onto three sequential visual effects:
//! - Content fade: flowers, bees and lines shrink away first
//! - Hinge: both book halves fold up around the spine
//! - Book scale: the closed book shrinks to nothing
//!
//! One control value drives all three, so no separate timers are needed.

/// Easing rate while closing (target below value).
pub const CLOSE_RATE: f32 = 0.10;
/// Easing rate while opening.
pub const OPEN_RATE: f32 = 0.05;

/// Openness at which content has fully vanished and the hinge starts moving.
pub const CONTENT_THRESHOLD: f32 = 0.6;
/// Openness at which the hinge is fully closed and the book starts shrinking.
pub const HINGE_THRESHOLD: f32 = 0.2;

/// Hinge angle of a fully closed book (radians).
pub const MAX_HINGE_ANGLE: f32 = 1.57;
/// Book scale while the book is on screen.
pub const FULL_BOOK_SCALE: f32 = 1.4;

/// Exponential smoothing step: move `value` a fraction `rate` of the way to `target`.
#[inline]
pub fn approach(value: f32, target: f32, rate: f32) -> f32 {
    value + (target - value) * rate
}

/// Live openness value and the target it is easing toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    value: f32,
    target: f32,
}

impl TransitionState {
    /// Fully open, at rest.
    pub fn new() -> Self {
        Self {
            value: 1.0,
            target: 1.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Set the target instantly. `value` catches up through [`step`](Self::step).
    pub fn set_target(&mut self, open: bool) {
        self.target = if open { 1.0 } else { 0.0 };
    }

    pub fn is_opening(&self) -> bool {
        self.target > self.value
    }

    /// Advance one frame toward the target and return the new value.
    pub fn step(&mut self) -> f32 {
        let rate = if self.target < self.value {
            CLOSE_RATE
        } else {
            OPEN_RATE
        };
        self.value = approach(self.value, self.target, rate);
        self.value
    }

    /// Derived visual parameters for the current value.
    pub fn derived(&self) -> DerivedFrameParams {
        derive(self.value)
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame visual parameters. Recomputed from the openness value, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFrameParams {
    /// Uniform scale of flowers, bees and decorative lines (0..=1)
    pub content_scale: f32,
    /// Rotation of each book half about the spine (0..=1.57 rad)
    pub hinge_angle: f32,
    /// Uniform scale of the whole book (0..=1.4)
    pub book_scale: f32,
}

/// Map an openness value onto the three-phase visual parameters.
///
/// - `(0.6, 1.0]`: content scales `0 → 1`, hinge flat, full book scale
/// - `(0.2, 0.6]`: no content, hinge folds `1.57 → 0`, full book scale
/// - `[0.0, 0.2]`: no content, hinge closed, book scales `0 → 1.4`
pub fn derive(value: f32) -> DerivedFrameParams {
    let v = value.clamp(0.0, 1.0);

    if v > CONTENT_THRESHOLD {
        DerivedFrameParams {
            content_scale: (v - CONTENT_THRESHOLD) / (1.0 - CONTENT_THRESHOLD),
            hinge_angle: 0.0,
            book_scale: FULL_BOOK_SCALE,
        }
    } else if v > HINGE_THRESHOLD {
        let opened = (v - HINGE_THRESHOLD) / (CONTENT_THRESHOLD - HINGE_THRESHOLD);
        DerivedFrameParams {
            content_scale: 0.0,
            hinge_angle: (1.0 - opened) * MAX_HINGE_ANGLE,
            book_scale: FULL_BOOK_SCALE,
        }
    } else {
        DerivedFrameParams {
            content_scale: 0.0,
            hinge_angle: MAX_HINGE_ANGLE,
            book_scale: (v / HINGE_THRESHOLD) * FULL_BOOK_SCALE,
        }
    }
}
