//! Book scene and its per-frame animation.
//!
//! - `scene`: static scene description built once at start-up
//! - `transition`: openness value and the three-phase visual parameters
//! - `animator`: applies frame parameters and time to the scene
//! - `projection`: perspective camera for painting onto a 2D surface

pub mod animator;
pub mod projection;
pub mod scene;
pub mod transition;

pub use animator::animate_scene;
pub use projection::{Camera, Projected};
pub use scene::{build_scene, Group, Motion, Primitive, Scene, SceneConfig, SceneNode};
pub use transition::{derive, DerivedFrameParams, TransitionState};
