//! Per-window scene state and the per-frame step.

use std::time::Instant;

use crate::config::AppConfig;
use crate::input::{CameraOffset, InputSampler, ParallaxRig};
use crate::nav::{Navigator, PageId, PageSurface};
use crate::render::transition::{DerivedFrameParams, TransitionState};

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub derived: DerivedFrameParams,
    pub camera: CameraOffset,
    pub auxiliary_visible: bool,
}

/// Receives the frame parameters once per frame.
pub trait FrameSurface {
    fn apply_frame(&mut self, frame: &FrameParams);
}

/// Transition, input, camera and navigation state for one window.
#[derive(Debug, Default)]
pub struct SceneContext {
    pub transition: TransitionState,
    pub input: InputSampler,
    pub parallax: ParallaxRig,
    pub navigator: Navigator,
}

impl SceneContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            transition: TransitionState::new(),
            input: InputSampler::new(),
            parallax: ParallaxRig::new(),
            navigator: Navigator::new(config.page_swap_delay(), config.auxiliary_delay()),
        }
    }

    pub fn active_page(&self) -> PageId {
        self.navigator.active()
    }

    pub fn navigate(&mut self, to: PageId, now: Instant, surface: &mut dyn PageSurface) {
        self.navigator
            .navigate(to, now, &mut self.transition, surface);
    }

    pub fn navigate_to_id(&mut self, id: &str, now: Instant, surface: &mut dyn PageSurface) {
        self.navigator
            .navigate_to_id(id, now, &mut self.transition, surface);
    }

    /// Fire due navigation tasks.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn PageSurface) {
        self.navigator.tick(now, surface);
    }

    /// One frame: advance the transition, blend the camera and hand the result to `surface`.
    pub fn render_step(&mut self, viewport_width: f32, surface: &mut dyn FrameSurface) -> FrameParams {
        self.transition.step();
        let derived = self.transition.derived();
        let camera = self.parallax.update(
            self.input.offset(),
            viewport_width,
            self.navigator.active().stills_camera(),
        );
        let frame = FrameParams {
            derived,
            camera,
            auxiliary_visible: self.navigator.auxiliary_visible(),
        };
        surface.apply_frame(&frame);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct LastFrame {
        frames: Vec<FrameParams>,
    }

    impl FrameSurface for LastFrame {
        fn apply_frame(&mut self, frame: &FrameParams) {
            self.frames.push(*frame);
        }
    }

    #[derive(Default)]
    struct NullPages;

    impl PageSurface for NullPages {
        fn show_page(&mut self, _page: PageId) {}
        fn set_home_chrome(&mut self, _on: bool) {}
        fn set_auxiliary_visible(&mut self, _visible: bool) {}
    }

    #[test]
    fn open_book_frame_at_rest() {
        let mut ctx = SceneContext::default();
        let mut surface = LastFrame::default();
        let frame = ctx.render_step(1280.0, &mut surface);
        assert_eq!(surface.frames.len(), 1);
        assert_eq!(frame.derived.content_scale, 1.0);
        assert_eq!(frame.derived.hinge_angle, 0.0);
        assert_eq!(frame.derived.book_scale, 1.4);
        assert!(!frame.auxiliary_visible);
    }

    #[test]
    fn leaving_home_closes_the_book_over_frames() {
        let mut ctx = SceneContext::default();
        let mut pages = NullPages;
        let mut surface = LastFrame::default();
        let t0 = Instant::now();

        ctx.navigate(PageId::Hive, t0, &mut pages);
        for _ in 0..200 {
            ctx.render_step(1280.0, &mut surface);
        }
        let last = surface.frames.last().unwrap();
        assert!(last.derived.book_scale < 1e-3);

        ctx.tick(t0 + Duration::from_millis(500), &mut pages);
        assert_eq!(ctx.active_page(), PageId::Hive);
    }

    #[test]
    fn pointer_moves_the_camera() {
        let mut ctx = SceneContext::default();
        let mut surface = LastFrame::default();
        ctx.input.pointer.on_pointer_move(1280.0, 400.0, 1280.0, 800.0);
        let first = ctx.render_step(1280.0, &mut surface);
        let mut later = first;
        for _ in 0..100 {
            later = ctx.render_step(1280.0, &mut surface);
        }
        assert!(first.camera.x > 0.0);
        assert!(later.camera.x > first.camera.x);
    }

    #[test]
    fn still_camera_page_suppresses_parallax() {
        let mut ctx = SceneContext::default();
        let mut pages = NullPages;
        let mut surface = LastFrame::default();
        let t0 = Instant::now();
        ctx.input.pointer.on_pointer_move(1280.0, 0.0, 1280.0, 800.0);
        for _ in 0..100 {
            ctx.render_step(1280.0, &mut surface);
        }
        let moving = ctx.parallax.camera().x;

        ctx.navigate(PageId::Species, t0, &mut pages);
        ctx.tick(t0 + Duration::from_secs(1), &mut pages);
        for _ in 0..400 {
            ctx.render_step(1280.0, &mut surface);
        }
        assert!(ctx.parallax.camera().x.abs() < moving.abs() * 0.01);
    }

    #[test]
    fn config_delays_reach_the_navigator() {
        let config = AppConfig {
            page_swap_delay_ms: 100,
            ..AppConfig::default()
        };
        let mut ctx = SceneContext::new(&config);
        let mut pages = NullPages;
        let t0 = Instant::now();
        ctx.navigate_to_id("team", t0, &mut pages);
        ctx.tick(t0 + Duration::from_millis(100), &mut pages);
        assert_eq!(ctx.active_page(), PageId::Team);
    }
}
