//! View: camera motion over a generated terrain and the per-frame matrices.
//!
//! # Invariants
//! - Camera actions never modify the terrain.
//! - Flight mode keeps the eye at a fixed altitude; walk mode keeps it a fixed
//!   number of grid cells above the surface while over the terrain.
//! - Every frame carries `model`, `view` and `projection`; `model_view` is
//!   `view * model`.

mod action;
mod camera;
mod config;
mod frame;
mod scene;

pub use action::CameraAction;
pub use camera::{Camera, CameraConfig, CameraMode};
pub use config::{ConfigError, SceneConfig};
pub use frame::FrameMatrices;
pub use scene::Scene;

pub fn crate_info() -> &'static str {
    "faultscape-view v0.1.0"
}
