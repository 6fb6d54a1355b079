//! Tessellation utilities for converting curves to polylines.

use coaster_math::Point3;
use rayon::prelude::*;

use crate::curve::Curve;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides segments where the midpoint deviation
/// from the chord exceeds the given `tolerance`.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
///
/// # Returns
/// A vector of points approximating the curve.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Minimum depth before the flatness test applies. An S-shaped span can have
/// its midpoint exactly on the chord, so the first splits are unconditional.
const MIN_DEPTH: u32 = 2;

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let p1 = curve.point_at(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p_mid = curve.point_at(t_mid);

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Evaluate `count` points evenly spaced over the curve domain, both ends included.
///
/// Points are evaluated in parallel. A `count` below 2 yields just the start point
/// (or nothing for zero).
pub fn sample_uniform(curve: &dyn Curve, count: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    match count {
        0 => Vec::new(),
        1 => vec![curve.point_at(t_min)],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .into_par_iter()
                .map(|i| curve.point_at(t_min + (t_max - t_min) * i as f64 / last))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::HermiteSegment;
    use crate::path::HermitePath;
    use coaster_math::DVec3;

    #[test]
    fn test_curve_to_polyline_straight() {
        let line = HermiteSegment::new(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
        );
        let points = curve_to_polyline(&line, 0.01);
        // Only the unconditional splits: 2^MIN_DEPTH spans
        assert_eq!(points.len(), 5);
        assert!((points[0] - DVec3::ZERO).length() < 1e-10);
        assert!((points[4] - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_curve_to_polyline_track() {
        let path = HermitePath::open(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.5, 0.0),
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(3.0, 0.5, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ])
        .unwrap();
        let coarse = curve_to_polyline(&path, 0.1);
        let fine = curve_to_polyline(&path, 1e-4);
        assert!(
            fine.len() > coarse.len(),
            "finer tolerance should give more points: {} vs {}",
            fine.len(),
            coarse.len()
        );
        assert_eq!(fine.first().copied(), Some(DVec3::ZERO));
        assert_eq!(fine.last().copied(), Some(DVec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_sample_uniform_counts() {
        let seg = HermiteSegment::new(DVec3::ZERO, DVec3::X, DVec3::X, DVec3::X);
        assert!(sample_uniform(&seg, 0).is_empty());
        assert_eq!(sample_uniform(&seg, 1), vec![DVec3::ZERO]);

        let points = sample_uniform(&seg, 5);
        assert_eq!(points.len(), 5);
        for (i, p) in points.iter().enumerate() {
            assert!((p.x - i as f64 * 0.25).abs() < 1e-12);
        }
    }
}
