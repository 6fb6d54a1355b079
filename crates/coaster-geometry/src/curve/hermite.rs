//! Cubic Hermite interpolation.

use coaster_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// The four cubic Hermite basis weights at a parameter `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteBasis {
    pub h00: f64,
    pub h10: f64,
    pub h01: f64,
    pub h11: f64,
}

impl HermiteBasis {
    /// Basis weights at `t`.
    ///
    /// At `t = 0` the weights are exactly `(1, 0, 0, 0)` and at `t = 1` exactly
    /// `(0, 0, 1, 0)`, so segments interpolate their endpoints bit-for-bit.
    pub fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        Self {
            h00: 2.0 * t3 - 3.0 * t2 + 1.0,
            h10: t3 - 2.0 * t2 + t,
            h01: -2.0 * t3 + 3.0 * t2,
            h11: t3 - t2,
        }
    }

    /// Derivatives of the basis weights with respect to `t`.
    pub fn derivative_at(t: f64) -> Self {
        let t2 = t * t;
        Self {
            h00: 6.0 * t2 - 6.0 * t,
            h10: 3.0 * t2 - 4.0 * t + 1.0,
            h01: -6.0 * t2 + 6.0 * t,
            h11: 3.0 * t2 - 2.0 * t,
        }
    }

    fn combine(self, p0: Point3, p1: Point3, m0: Vector3, m1: Vector3) -> Point3 {
        self.h00 * p0 + self.h10 * m0 + self.h01 * p1 + self.h11 * m1
    }
}

/// Position on the cubic Hermite curve between `p0` and `p1` with end tangents
/// `m0` and `m1`.
///
/// `t` outside `[0, 1]` extrapolates the cubic.
pub fn hermite_point(p0: Point3, p1: Point3, m0: Vector3, m1: Vector3, t: f64) -> Point3 {
    HermiteBasis::at(t).combine(p0, p1, m0, m1)
}

/// First derivative of [`hermite_point`] with respect to `t`.
pub fn hermite_derivative(p0: Point3, p1: Point3, m0: Vector3, m1: Vector3, t: f64) -> Vector3 {
    HermiteBasis::derivative_at(t).combine(p0, p1, m0, m1)
}

/// A single cubic Hermite segment, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HermiteSegment {
    pub p0: Point3,
    pub p1: Point3,
    pub m0: Vector3,
    pub m1: Vector3,
}

impl HermiteSegment {
    pub fn new(p0: Point3, p1: Point3, m0: Vector3, m1: Vector3) -> Self {
        Self { p0, p1, m0, m1 }
    }
}

impl Curve for HermiteSegment {
    fn point_at(&self, t: f64) -> Point3 {
        hermite_point(self.p0, self.p1, self.m0, self.m1, t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        hermite_derivative(self.p0, self.p1, self.m0, self.m1, t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    #[test]
    fn test_basis_values() {
        let b = HermiteBasis::at(0.5);
        assert_abs_diff_eq!(b.h00, 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(b.h10, 0.125, epsilon = 1e-15);
        assert_abs_diff_eq!(b.h01, 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(b.h11, -0.125, epsilon = 1e-15);
    }

    #[test]
    fn test_basis_endpoints_exact() {
        let b0 = HermiteBasis::at(0.0);
        assert_eq!((b0.h00, b0.h10, b0.h01, b0.h11), (1.0, 0.0, 0.0, 0.0));
        let b1 = HermiteBasis::at(1.0);
        assert_eq!((b1.h00, b1.h10, b1.h01, b1.h11), (0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_endpoints_interpolate() {
        let p0 = dvec3(0.3, -1.7, 2.9);
        let p1 = dvec3(4.1, 0.2, -3.3);
        let m0 = dvec3(1.5, 2.5, -0.5);
        let m1 = dvec3(-0.25, 0.75, 3.0);
        assert_eq!(hermite_point(p0, p1, m0, m1, 0.0), p0);
        assert_eq!(hermite_point(p0, p1, m0, m1, 1.0), p1);
    }

    #[test]
    fn test_straight_line_midpoint() {
        let p = hermite_point(
            dvec3(0.0, 0.0, 0.0),
            dvec3(2.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            0.5,
        );
        assert_abs_diff_eq!(p, dvec3(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_tangents_follow_basis() {
        let p0 = dvec3(0.0, 0.0, 0.0);
        let p1 = dvec3(2.0, 4.0, 0.0);
        for &t in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let b = HermiteBasis::at(t);
            let expected = b.h00 * p0 + b.h01 * p1;
            let p = hermite_point(p0, p1, Vector3::ZERO, Vector3::ZERO, t);
            assert_abs_diff_eq!(p, expected, epsilon = 1e-12);
        }
        // Zero tangents ease in and out, so a quarter of the way is not a quarter of the distance.
        let quarter = hermite_point(p0, p1, Vector3::ZERO, Vector3::ZERO, 0.25);
        assert!((quarter - p1 * 0.25).length() > 1e-3);
    }

    #[test]
    fn test_extrapolation_is_defined() {
        let p = hermite_point(Point3::ZERO, Point3::X, Vector3::X, Vector3::X, 1.5);
        assert_abs_diff_eq!(p, dvec3(1.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_matches_end_tangents() {
        let m0 = dvec3(1.0, 2.0, 3.0);
        let m1 = dvec3(-3.0, 0.5, 0.0);
        let seg = HermiteSegment::new(Point3::ZERO, dvec3(1.0, 1.0, 1.0), m0, m1);
        assert_abs_diff_eq!(seg.tangent_at(0.0), m0, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.tangent_at(1.0), m1, epsilon = 1e-12);
        assert_eq!(seg.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let seg = HermiteSegment::new(
            dvec3(0.0, 0.0, 0.0),
            dvec3(3.0, 1.0, -1.0),
            dvec3(0.5, 2.0, 0.0),
            dvec3(1.0, -1.0, 0.5),
        );
        let h = 1e-6;
        let t = 0.37;
        let fd = (seg.point_at(t + h) - seg.point_at(t - h)) / (2.0 * h);
        assert_abs_diff_eq!(seg.tangent_at(t), fd, epsilon = 1e-6);
    }
}
