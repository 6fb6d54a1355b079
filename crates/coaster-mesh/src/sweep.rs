//! Track geometry swept along a path.
//!
//! A circular cross-section is placed on orientation frames sampled uniformly
//! in the path parameter and consecutive rings are stitched into quads.

use std::f64::consts::TAU;

use coaster_core::{CoasterError, Result, Validate};
use coaster_geometry::{Frame, HermitePath};
use coaster_math::{Point2, Vector3};
use rayon::prelude::*;

use crate::TriangleMesh;

/// Most vertices a single swept tube may have. Keeps every index within `u32`.
pub const MAX_SWEEP_VERTICES: usize = 1 << 22;

/// Parameters for sweeping a single tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    pub radius: f64,
    /// Vertices per ring.
    pub sides: usize,
    pub samples_per_segment: usize,
    /// Offset of the tube centre along each frame's right vector.
    pub lateral_offset: f64,
    /// Offset of the tube centre along each frame's up vector.
    pub vertical_offset: f64,
    /// Preferred up direction for the frames.
    pub up: Vector3,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            radius: 0.05,
            sides: 8,
            samples_per_segment: 16,
            lateral_offset: 0.0,
            vertical_offset: 0.0,
            up: Vector3::Y,
        }
    }
}

impl Validate for SweepOptions {
    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CoasterError::invalid_input(format!(
                "tube radius must be positive, got {}",
                self.radius
            )));
        }
        if self.sides < 3 {
            return Err(CoasterError::invalid_input(format!(
                "a tube needs at least 3 sides, got {}",
                self.sides
            )));
        }
        if self.samples_per_segment == 0 {
            return Err(CoasterError::invalid_input(
                "sweep needs at least 1 sample per segment",
            ));
        }
        Ok(())
    }
}

/// Sweep a tube along `path`.
pub fn sweep_tube(path: &HermitePath, options: &SweepOptions) -> Result<TriangleMesh> {
    options.validate()?;

    let sides = options.sides;
    let rings = path
        .segment_count()
        .checked_mul(options.samples_per_segment)
        .and_then(|n| n.checked_add(1))
        .filter(|&n| n.checked_mul(sides).is_some_and(|v| v <= MAX_SWEEP_VERTICES))
        .ok_or_else(|| {
            CoasterError::invalid_input(format!(
                "{} segments x {} samples x {} sides exceeds the sweep limit of {} vertices",
                path.segment_count(),
                options.samples_per_segment,
                sides,
                MAX_SWEEP_VERTICES
            ))
        })?;
    let (u_min, u_max) = path.domain();
    let frames = (0..rings)
        .into_par_iter()
        .map(|i| {
            let u = u_min + (u_max - u_min) * i as f64 / (rings - 1) as f64;
            path.frame_at(u, options.up)
        })
        .collect::<Result<Vec<Frame>>>()?;

    let mut mesh = TriangleMesh {
        positions: Vec::with_capacity(rings * sides),
        normals: Vec::with_capacity(rings * sides),
        indices: Vec::with_capacity((rings - 1) * sides * 6),
        uvs: Vec::with_capacity(rings * sides),
    };

    for (i, frame) in frames.iter().enumerate() {
        let center = frame.position
            + frame.right * options.lateral_offset
            + frame.up * options.vertical_offset;
        let along = i as f64 / (rings - 1) as f64;
        for j in 0..sides {
            let (sin, cos) = (TAU * j as f64 / sides as f64).sin_cos();
            let outward = frame.right * cos + frame.up * sin;
            mesh.positions.push(center + outward * options.radius);
            mesh.normals.push(outward);
            mesh.uvs.push(Point2::new(along, j as f64 / sides as f64));
        }
    }

    for i in 0..rings - 1 {
        let ring = (i * sides) as u32;
        let next = ((i + 1) * sides) as u32;
        for j in 0..sides as u32 {
            let j1 = (j + 1) % sides as u32;
            let (a, b) = (ring + j, ring + j1);
            let (c, d) = (next + j, next + j1);
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    log::debug!(
        "swept tube: {} rings x {} sides, {} triangles",
        rings,
        sides,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Shape of a two-rail track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    /// Distance between the rail centres.
    pub gauge: f64,
    pub rail_radius: f64,
    pub sides: usize,
    pub samples_per_segment: usize,
    pub up: Vector3,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            gauge: 0.3,
            rail_radius: 0.03,
            sides: 8,
            samples_per_segment: 16,
            up: Vector3::Y,
        }
    }
}

/// Two parallel rails following `path`.
pub fn track_mesh(path: &HermitePath, style: &TrackStyle) -> Result<TriangleMesh> {
    let rail = |lateral_offset: f64| SweepOptions {
        radius: style.rail_radius,
        sides: style.sides,
        samples_per_segment: style.samples_per_segment,
        lateral_offset,
        vertical_offset: 0.0,
        up: style.up,
    };
    let mut mesh = sweep_tube(path, &rail(-style.gauge * 0.5))?;
    mesh.merge(&sweep_tube(path, &rail(style.gauge * 0.5))?);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use coaster_math::{DVec3, Point3};

    fn track() -> HermitePath {
        HermitePath::open(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.5, 0.0),
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(3.0, 0.5, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_sweep_counts() {
        let options = SweepOptions {
            sides: 6,
            samples_per_segment: 4,
            ..SweepOptions::default()
        };
        let mesh = sweep_tube(&track(), &options).unwrap();
        let rings = 4 * 4 + 1;
        assert_eq!(mesh.vertex_count(), rings * 6);
        assert_eq!(mesh.triangle_count(), (rings - 1) * 6 * 2);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_oversized_sweep_rejected() {
        let huge_samples = SweepOptions {
            samples_per_segment: usize::MAX / 2,
            ..SweepOptions::default()
        };
        assert!(sweep_tube(&track(), &huge_samples).unwrap_err().is_invalid_input());

        let huge_sides = SweepOptions {
            sides: usize::MAX / 3,
            ..SweepOptions::default()
        };
        assert!(sweep_tube(&track(), &huge_sides).unwrap_err().is_invalid_input());

        let style = TrackStyle {
            samples_per_segment: MAX_SWEEP_VERTICES,
            ..TrackStyle::default()
        };
        assert!(track_mesh(&track(), &style).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_sweep_radius() {
        let path = track();
        let options = SweepOptions {
            radius: 0.2,
            ..SweepOptions::default()
        };
        let mesh = sweep_tube(&path, &options).unwrap();
        // First ring surrounds the first control point.
        for p in &mesh.positions[..options.sides] {
            assert_abs_diff_eq!(p.distance(Point3::ZERO), 0.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sweep_normals_point_outward() {
        let mesh = sweep_tube(&track(), &SweepOptions::default()).unwrap();
        for tri in mesh.indices.chunks_exact(3).take(64) {
            let p0 = mesh.positions[tri[0] as usize];
            let p1 = mesh.positions[tri[1] as usize];
            let p2 = mesh.positions[tri[2] as usize];
            let face = (p1 - p0).cross(p2 - p0);
            let vertex_normal = mesh.normals[tri[0] as usize];
            assert!(face.dot(vertex_normal) > 0.0);
        }
    }

    #[test]
    fn test_sweep_rejects_bad_options() {
        let options = SweepOptions {
            sides: 2,
            ..SweepOptions::default()
        };
        assert!(sweep_tube(&track(), &options).unwrap_err().is_invalid_input());
        let options = SweepOptions {
            radius: 0.0,
            ..SweepOptions::default()
        };
        assert!(sweep_tube(&track(), &options).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_track_has_two_rails() {
        let style = TrackStyle::default();
        let single = sweep_tube(
            &track(),
            &SweepOptions {
                radius: style.rail_radius,
                ..SweepOptions::default()
            },
        )
        .unwrap();
        let mesh = track_mesh(&track(), &style).unwrap();
        assert_eq!(mesh.vertex_count(), single.vertex_count() * 2);
        // Rails sit either side of the centre line, along the frame's right vector (+Z here).
        let bb = mesh.bounding_box();
        assert!(bb.min.z < -0.1 && bb.max.z > 0.1);
    }
}
