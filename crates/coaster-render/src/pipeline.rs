use bytemuck::{Pod, Zeroable};
use coaster_math::{DMat4, Point2, Point3, Transform, Vector3};
use coaster_mesh::TriangleMesh;

use crate::camera::Camera;

/// Vertex with f32 data packed for GPU, in the interleaved model layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    /// Create a GPU vertex from mesh vertex data.
    pub fn from_mesh_vertex(pos: Point3, normal: Vector3, uv: Point2) -> Self {
        Self {
            position: pos.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            uv: uv.as_vec2().to_array(),
        }
    }
}

/// Prepared render data ready for GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Convert a TriangleMesh to GPU-ready buffers.
///
/// Missing normals default to +Y and missing texture coordinates to zero.
pub fn prepare_mesh(mesh: &TriangleMesh) -> RenderMesh {
    let vertices = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let normal = mesh.normals.get(i).copied().unwrap_or(Vector3::Y);
            let uv = mesh.uvs.get(i).copied().unwrap_or(Point2::ZERO);
            GpuVertex::from_mesh_vertex(pos, normal, uv)
        })
        .collect();

    RenderMesh {
        vertices,
        indices: mesh.indices.clone(),
    }
}

/// Uniforms for the textured model shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    /// `projection * view`, column-major.
    pub cam_matrix: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
}

impl CameraUniforms {
    pub fn new(camera: &Camera, model: &Transform) -> Self {
        Self {
            cam_matrix: to_f32(camera.matrix()),
            model: to_f32(model.to_mat4()),
            eye_position: camera.position.as_vec3().extend(1.0).to_array(),
        }
    }
}

/// Uniforms for the skybox shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkyboxUniforms {
    /// Camera view with translation removed.
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl SkyboxUniforms {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view: to_f32(camera.skybox_view()),
            projection: to_f32(camera.projection_matrix()),
        }
    }
}

fn to_f32(mat: DMat4) -> [[f32; 4]; 4] {
    mat.as_mat4().to_cols_array_2d()
}

/// Corners of the unit skybox cube.
#[rustfmt::skip]
pub const SKYBOX_VERTICES: [f32; 24] = [
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
];

/// Skybox triangles, counter-clockwise when seen from outside the cube.
#[rustfmt::skip]
pub const SKYBOX_INDICES: [u32; 36] = [
    1, 2, 6,
    6, 5, 1,
    0, 4, 7,
    7, 3, 0,
    4, 5, 6,
    6, 7, 4,
    0, 3, 2,
    2, 1, 0,
    0, 1, 5,
    5, 4, 0,
    3, 7, 6,
    6, 2, 3,
];

/// The skybox cube as a position-only mesh.
pub fn skybox_mesh() -> TriangleMesh {
    TriangleMesh {
        positions: SKYBOX_VERTICES
            .chunks_exact(3)
            .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
            .collect(),
        normals: Vec::new(),
        indices: SKYBOX_INDICES.to_vec(),
        uvs: Vec::new(),
    }
}

/// Cubemap faces in texture upload order (+X, -X, +Y, -Y, +Z, -Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubemapFace {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl CubemapFace {
    pub const ALL: [CubemapFace; 6] = [
        CubemapFace::Right,
        CubemapFace::Left,
        CubemapFace::Top,
        CubemapFace::Bottom,
        CubemapFace::Front,
        CubemapFace::Back,
    ];

    /// Offset from the first cube-map target (positive X).
    pub fn layer(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            CubemapFace::Right => "right",
            CubemapFace::Left => "left",
            CubemapFace::Top => "top",
            CubemapFace::Bottom => "bottom",
            CubemapFace::Front => "front",
            CubemapFace::Back => "back",
        }
    }
}
