//! Control point tangents.

use coaster_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::path::PathMode;

/// Finite-difference tangent between the neighbours `p0` (previous) and `p1`
/// (next) of a control point, scaled by one half.
pub fn calculate_tangent(p0: Point3, p1: Point3) -> Vector3 {
    (p1 - p0) * 0.5
}

/// How the first and last control points of an open path get their tangent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointTangent {
    /// Duplicate the endpoint on both sides, giving a zero tangent. The car
    /// starts and stops at rest.
    Zero,
    /// Duplicate the endpoint as its own missing neighbour:
    /// `calculate_tangent(P[0], P[1])` and `calculate_tangent(P[n-2], P[n-1])`.
    #[default]
    OneSided,
}

/// Tangents for every control point.
///
/// For [`PathMode::Closed`] the slice must already contain the seam point
/// (last == first), and the endpoint policy is ignored: the neighbours of the
/// seam wrap around the loop.
pub fn compute_tangents(points: &[Point3], mode: PathMode, endpoint: EndpointTangent) -> Vec<Vector3> {
    let n = points.len();
    if n < 2 {
        return vec![Vector3::ZERO; n];
    }

    (0..n)
        .map(|i| {
            let (prev, next) = match (mode, i) {
                (PathMode::Closed, 0) => (points[n - 2], points[1]),
                (PathMode::Closed, i) if i == n - 1 => (points[n - 2], points[1]),
                (PathMode::Open, 0) => match endpoint {
                    EndpointTangent::Zero => (points[0], points[0]),
                    EndpointTangent::OneSided => (points[0], points[1]),
                },
                (PathMode::Open, i) if i == n - 1 => match endpoint {
                    EndpointTangent::Zero => (points[i], points[i]),
                    EndpointTangent::OneSided => (points[i - 1], points[i]),
                },
                (_, i) => (points[i - 1], points[i + 1]),
            };
            calculate_tangent(prev, next)
        })
        .collect()
}
