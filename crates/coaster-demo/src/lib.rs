//! Rollercoaster demo: a car riding a Hermite-spline track under a skybox.
//!
//! The window and GPU backend stay outside this crate. Each frame the backend
//! feeds an [`InputState`] to [`App::step`] and replays the returned
//! [`FramePlan`](coaster_render::FramePlan).

pub mod app;
pub mod config;
pub mod input;
pub mod ride;

pub use app::{App, AssetLoader, ImportedMeshes, ProceduralAssets, CAR_MESH, TRACK_MESH};
pub use config::{
    AssetConfig, CameraConfig, CubemapFaces, DemoConfig, RideConfig, ShaderPaths, WindowConfig,
    MAX_ARC_SAMPLES_PER_SEGMENT,
};
pub use input::{InputState, Key, SkyboxToggle};
pub use ride::Ride;
