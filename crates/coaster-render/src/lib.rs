pub mod camera;
pub mod frame;
pub mod pipeline;
pub mod scene;

// Re-export main types
pub use camera::{Camera, CameraInput};
pub use frame::{plan_frame, DepthFunc, DrawCall, DrawKind, FrameParams, FramePlan, CLEAR_COLOR};
pub use pipeline::{
    prepare_mesh, skybox_mesh, CameraUniforms, CubemapFace, GpuVertex, RenderMesh, SkyboxUniforms,
};
pub use scene::{Keyframes, Scene, SceneMesh, Skybox};
