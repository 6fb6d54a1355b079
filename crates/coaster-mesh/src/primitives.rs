//! Procedural stand-ins for imported models.

use coaster_math::{Point2, Vector3};

use crate::TriangleMesh;

/// Axis-aligned box centred on the origin, with flat-shaded faces.
pub fn cuboid(half_extents: Vector3) -> TriangleMesh {
    // (normal, u, v) with u x v == normal so each face winds counter-clockwise from outside
    const FACES: [(Vector3, Vector3, Vector3); 6] = [
        (Vector3::X, Vector3::Y, Vector3::Z),
        (Vector3::NEG_X, Vector3::Z, Vector3::Y),
        (Vector3::Y, Vector3::Z, Vector3::X),
        (Vector3::NEG_Y, Vector3::X, Vector3::Z),
        (Vector3::Z, Vector3::X, Vector3::Y),
        (Vector3::NEG_Z, Vector3::Y, Vector3::X),
    ];
    const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = TriangleMesh::default();
    for (normal, u, v) in FACES {
        let base = mesh.positions.len() as u32;
        for (su, sv) in CORNERS {
            mesh.positions.push((normal + u * su + v * sv) * half_extents);
            mesh.normals.push(normal);
            mesh.uvs.push(Point2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_math::DVec3;

    #[test]
    fn test_cuboid_counts() {
        let mesh = cuboid(DVec3::new(1.0, 0.5, 2.0));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, DVec3::new(-1.0, -0.5, -2.0));
        assert_eq!(bb.max, DVec3::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn test_cuboid_winding_faces_outward() {
        let mesh = cuboid(DVec3::ONE);
        for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
            let p0 = mesh.positions[tri[0] as usize];
            let p1 = mesh.positions[tri[1] as usize];
            let p2 = mesh.positions[tri[2] as usize];
            let face_normal = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0, "triangle {} faces inward", i);
        }
    }
}
