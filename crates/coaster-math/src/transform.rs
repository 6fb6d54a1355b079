use crate::{DMat3, DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Place a model so that its local -Z axis points along `forward` and its
    /// local +Y axis along `up`, with its origin at `position`.
    ///
    /// `forward` and `up` must be orthonormal.
    pub fn from_frame(position: Point3, forward: Vector3, up: Vector3) -> Self {
        let right = forward.cross(up);
        let rotation = DMat3::from_cols(right, up, -forward);
        Self::from_mat4(DMat4::from_translation(position) * DMat4::from_mat3(rotation))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Column-major f32 matrix for uniform upload.
    pub fn to_cols_f32(&self) -> [f32; 16] {
        self.matrix.map(|v| v as f32)
    }

    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.matrix[12], self.matrix[13], self.matrix[14])
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(t.transform_point(p), p, epsilon = 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let result = t.transform_point(dvec3(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(result, dvec3(11.0, 22.0, 33.0), epsilon = 1e-12);
        assert_eq!(t.translation(), dvec3(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let inv = t.inverse().unwrap();
        let p = dvec3(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(inv.transform_point(t.transform_point(p)), p, epsilon = 1e-10);
    }

    #[test]
    fn test_from_frame_orients_model() {
        let t = Transform::from_frame(dvec3(1.0, 2.0, 3.0), Vector3::X, Vector3::Y);
        // Local -Z maps to world forward, local +Y stays up.
        assert_abs_diff_eq!(t.transform_vector(-Vector3::Z), Vector3::X, epsilon = 1e-12);
        assert_abs_diff_eq!(t.transform_vector(Vector3::Y), Vector3::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(t.transform_point(Point3::ZERO), dvec3(1.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_to_cols_f32() {
        let t = Transform::from_translation(dvec3(1.0, 2.0, 3.0));
        let cols = t.to_cols_f32();
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(cols[15], 1.0);
    }
}
