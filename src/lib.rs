//! Pop-up book scene engine.
//!
//! - `render`: scene graph, open/close transition, animation, projection
//! - `input`: pointer and device-tilt sampling, camera parallax
//! - `nav`: page navigation and its delayed tasks
//! - `net`: remote text service client and stored API key
//! - `assistant`: chat and species-card features on top of `net`
//! - `context`: per-window state and the per-frame step
//! - `config`: application configuration

pub mod assistant;
pub mod config;
pub mod context;
pub mod input;
pub mod nav;
pub mod net;
pub mod render;

pub use config::AppConfig;
pub use context::{FrameParams, FrameSurface, SceneContext};
