use coaster_core::{CoasterError, Result};
use coaster_math::{Aabb3, Point2, Point3, Transform, Vector3};

/// Floats per vertex in the interleaved layout handed over by mesh importers:
/// position (3), normal (3), texture coordinate (2).
pub const FLOATS_PER_VERTEX: usize = 8;

/// Triangle mesh with per-vertex attributes in separate arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    /// Build a mesh from interleaved `[px, py, pz, nx, ny, nz, u, v]` vertices and
    /// triangle-list indices.
    pub fn from_interleaved(vertices: &[f32], indices: &[u32]) -> Result<Self> {
        if vertices.len() % FLOATS_PER_VERTEX != 0 {
            return Err(CoasterError::invalid_input(format!(
                "interleaved vertex data has {} floats, not a multiple of {}",
                vertices.len(),
                FLOATS_PER_VERTEX
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(CoasterError::invalid_input(format!(
                "index count {} is not a whole number of triangles",
                indices.len()
            )));
        }
        let vertex_count = vertices.len() / FLOATS_PER_VERTEX;
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CoasterError::invalid_input(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        let mut mesh = TriangleMesh {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: indices.to_vec(),
            uvs: Vec::with_capacity(vertex_count),
        };
        for v in vertices.chunks_exact(FLOATS_PER_VERTEX) {
            let f = |i: usize| v[i] as f64;
            mesh.positions.push(Point3::new(f(0), f(1), f(2)));
            mesh.normals.push(Vector3::new(f(3), f(4), f(5)));
            mesh.uvs.push(Point2::new(f(6), f(7)));
        }
        Ok(mesh)
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Compute area-weighted vertex normals from the triangles.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for n in &mut self.normals {
            *n = n.normalize_or_zero();
        }
    }

    /// A copy of the mesh with `transform` applied to positions and normals.
    pub fn transformed(&self, transform: &Transform) -> TriangleMesh {
        TriangleMesh {
            positions: self.positions.iter().map(|&p| transform.transform_point(p)).collect(),
            normals: self
                .normals
                .iter()
                .map(|&n| transform.transform_vector(n).normalize_or_zero())
                .collect(),
            indices: self.indices.clone(),
            uvs: self.uvs.clone(),
        }
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}
