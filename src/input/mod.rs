//! Input sampling and camera parallax.
//!
//! - `pointer`: pointer position → bounded offset
//! - `orientation`: device tilt (with one-time permission) → bounded offset
//!
//! [`InputSampler`] sums both sources; [`ParallaxRig`] blends the sum into
//! a smoothed camera offset once per frame.

pub mod orientation;
pub mod pointer;

use crate::render::transition::approach;

pub use orientation::{NoOrientationSensor, OrientationSampler, OrientationSource, Permission};
pub use pointer::PointerSampler;

/// Viewports narrower than this get a reduced parallax effect.
pub const SMALL_VIEWPORT_WIDTH: f32 = 768.0;
/// Parallax weight on small viewports.
pub const SMALL_VIEWPORT_WEIGHT: f32 = 0.4;
/// Smoothing rate for both the weight and the camera position.
pub const PARALLAX_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraOffset {
    pub x: f32,
    pub y: f32,
}

/// Both input sources feeding one offset accumulator.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    pub pointer: PointerSampler,
    pub orientation: OrientationSampler,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the two independently clamped sources.
    pub fn offset(&self) -> CameraOffset {
        let (px, py) = self.pointer.offset();
        let (ox, oy) = self.orientation.offset();
        CameraOffset {
            x: px + ox,
            y: py + oy,
        }
    }
}

/// Per-frame camera blending.
///
/// The effect weight eases toward its goal instead of switching, so the
/// camera never pops when the viewport or the active page changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxRig {
    weight: f32,
    camera: CameraOffset,
}

impl ParallaxRig {
    pub fn new() -> Self {
        Self {
            weight: 1.0,
            camera: CameraOffset::default(),
        }
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn camera(&self) -> CameraOffset {
        self.camera
    }

    /// Advance one frame. `suppressed` is true while a page that wants a still camera is active.
    pub fn update(&mut self, offset: CameraOffset, viewport_width: f32, suppressed: bool) -> CameraOffset {
        let goal = if suppressed {
            0.0
        } else if viewport_width < SMALL_VIEWPORT_WIDTH {
            SMALL_VIEWPORT_WEIGHT
        } else {
            1.0
        };
        self.weight = approach(self.weight, goal, PARALLAX_RATE);

        self.camera.x = approach(self.camera.x, offset.x * self.weight, PARALLAX_RATE);
        self.camera.y = approach(self.camera.y, offset.y * self.weight, PARALLAX_RATE);
        self.camera
    }
}

impl Default for ParallaxRig {
    fn default() -> Self {
        Self::new()
    }
}
