//! Per-frame draw planning.
//!
//! A `FramePlan` is the ordered list of GPU work for one frame. The window
//! backend replays it; nothing here touches a graphics API.

use crate::camera::Camera;
use crate::pipeline::{CameraUniforms, SkyboxUniforms, SKYBOX_INDICES};
use crate::scene::Scene;

/// Background colour used when the skybox is hidden.
pub const CLEAR_COLOR: [f32; 4] = [0.07, 0.13, 0.17, 1.0];

/// Inputs to a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Seconds since the demo started.
    pub time: f64,
    pub show_skybox: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Less,
    /// Lets the skybox, drawn at maximum depth, pass the depth test.
    LessEqual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawKind {
    Mesh(CameraUniforms),
    Skybox(SkyboxUniforms),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub name: String,
    pub index_count: usize,
    pub depth: DepthFunc,
    pub kind: DrawKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub time: f64,
    pub clear_color: [f32; 4],
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    pub fn draws_skybox(&self) -> bool {
        self.draws
            .iter()
            .any(|d| matches!(d.kind, DrawKind::Skybox(_)))
    }
}

/// Plan one frame: every scene mesh in insertion order, then the skybox.
pub fn plan_frame(scene: &Scene, camera: &Camera, params: &FrameParams) -> FramePlan {
    let mut draws: Vec<DrawCall> = scene
        .meshes
        .iter()
        .map(|m| DrawCall {
            name: m.name.clone(),
            index_count: m.mesh.indices.len(),
            depth: DepthFunc::Less,
            kind: DrawKind::Mesh(CameraUniforms::new(camera, &m.transform)),
        })
        .collect();

    if params.show_skybox && scene.skybox.is_some() {
        draws.push(DrawCall {
            name: "skybox".to_string(),
            index_count: SKYBOX_INDICES.len(),
            depth: DepthFunc::LessEqual,
            kind: DrawKind::Skybox(SkyboxUniforms::new(camera)),
        });
    }

    FramePlan {
        time: params.time,
        clear_color: CLEAR_COLOR,
        draws,
    }
}
