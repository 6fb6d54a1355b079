//! Track path: a piecewise cubic Hermite curve through a sequence of control points.
//!
//! The global parameter `u` runs over `[0, segment_count]`. Segment `i` joins
//! control points `i` and `i + 1`; `u = i` lands exactly on control point `i`.

use coaster_core::{CoasterError, Result, Tolerance};
use coaster_math::{Aabb3, Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve::{hermite_derivative, hermite_point, Curve, HermiteSegment};
use crate::tangent::{compute_tangents, EndpointTangent};
use crate::tessellate::sample_uniform;

/// Samples per segment used when bounding the curve.
const BOUNDS_SAMPLES_PER_SEGMENT: usize = 32;

/// Whether the path ends at its last control point or loops back to the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    #[default]
    Open,
    /// Loops back to the first point. N control points give N segments, or
    /// N - 1 when the last point is within tolerance of the first.
    Closed,
}

/// What an open path does with a parameter outside its domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRange {
    #[default]
    Clamp,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub mode: PathMode,
    pub endpoint_tangent: EndpointTangent,
    pub out_of_range: OutOfRange,
    /// Distance under which the last point of a closed path counts as the first.
    pub tolerance: Tolerance,
}

impl PathOptions {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn closed() -> Self {
        Self {
            mode: PathMode::Closed,
            ..Self::default()
        }
    }

    pub fn with_endpoint_tangent(mut self, endpoint_tangent: EndpointTangent) -> Self {
        self.endpoint_tangent = endpoint_tangent;
        self
    }

    pub fn with_out_of_range(mut self, out_of_range: OutOfRange) -> Self {
        self.out_of_range = out_of_range;
        self
    }
}

/// Orthonormal orientation of something riding the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point3,
    pub forward: Vector3,
    pub up: Vector3,
    pub right: Vector3,
}

impl Frame {
    pub fn to_transform(&self) -> Transform {
        Transform::from_frame(self.position, self.forward, self.up)
    }
}

/// Cubic Hermite path through an ordered list of control points.
///
/// Immutable after construction; evaluation takes `&self` only, so one path
/// can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HermitePath {
    points: Vec<Point3>,
    tangents: Vec<Vector3>,
    options: PathOptions,
}

impl HermitePath {
    /// Build a path, computing and caching the control point tangents.
    ///
    /// A closed path whose last point does not coincide with its first gets the
    /// first point appended, so the loop always has a closing segment.
    pub fn new(points: Vec<Point3>, options: PathOptions) -> Result<Self> {
        if points.len() < 2 {
            return Err(CoasterError::invalid_input(format!(
                "a path needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(CoasterError::invalid_input(format!(
                "control point {i} is not finite: {}",
                points[i]
            )));
        }

        let mut points = points;
        if options.mode == PathMode::Closed {
            let first = points[0];
            let last = points[points.len() - 1];
            if options.tolerance.is_zero(first.distance(last)) {
                let n = points.len();
                points[n - 1] = first;
            } else {
                points.push(first);
            }
        }

        let tangents = compute_tangents(&points, options.mode, options.endpoint_tangent);
        log::debug!(
            "built {:?} path: {} control points, {} segments",
            options.mode,
            points.len(),
            points.len() - 1
        );

        Ok(Self {
            points,
            tangents,
            options,
        })
    }

    /// Open path with default options.
    pub fn open(points: Vec<Point3>) -> Result<Self> {
        Self::new(points, PathOptions::open())
    }

    /// Closed loop with default options.
    pub fn closed(points: Vec<Point3>) -> Result<Self> {
        Self::new(points, PathOptions::closed())
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    pub fn tangents(&self) -> &[Vector3] {
        &self.tangents
    }

    pub fn options(&self) -> &PathOptions {
        &self.options
    }

    pub fn mode(&self) -> PathMode {
        self.options.mode
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Parameter domain `(0, segment_count)`.
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.segment_count() as f64)
    }

    /// The Hermite segment joining control points `index` and `index + 1`.
    pub fn segment(&self, index: usize) -> Option<HermiteSegment> {
        if index >= self.segment_count() {
            return None;
        }
        Some(HermiteSegment::new(
            self.points[index],
            self.points[index + 1],
            self.tangents[index],
            self.tangents[index + 1],
        ))
    }

    /// Map a global parameter to `(segment index, local t)`.
    ///
    /// Open paths clamp or reject `u` outside the domain according to
    /// [`OutOfRange`]; closed paths wrap it. The end of the domain maps to the
    /// last segment at `t = 1`.
    pub fn locate(&self, u: f64) -> Result<(usize, f64)> {
        if !u.is_finite() {
            return Err(CoasterError::invalid_input(format!(
                "path parameter is not finite: {u}"
            )));
        }
        let (_, end) = self.domain();
        if self.options.mode == PathMode::Open
            && self.options.out_of_range == OutOfRange::Reject
            && !(0.0..=end).contains(&u)
        {
            return Err(CoasterError::invalid_input(format!(
                "path parameter {u} outside [0, {end}]"
            )));
        }
        Ok(self.locate_unchecked(u))
    }

    fn locate_unchecked(&self, u: f64) -> (usize, f64) {
        let segments = self.segment_count();
        let end = segments as f64;
        let u = match self.options.mode {
            PathMode::Open => u.clamp(0.0, end),
            PathMode::Closed => {
                let wrapped = u.rem_euclid(end);
                // rem_euclid can round a tiny negative up to `end` itself
                if wrapped >= end {
                    0.0
                } else {
                    wrapped
                }
            }
        };
        let index = (u.floor() as usize).min(segments - 1);
        (index, u - index as f64)
    }

    fn point_in_segment(&self, index: usize, t: f64) -> Point3 {
        hermite_point(
            self.points[index],
            self.points[index + 1],
            self.tangents[index],
            self.tangents[index + 1],
            t,
        )
    }

    fn derivative_in_segment(&self, index: usize, t: f64) -> Vector3 {
        hermite_derivative(
            self.points[index],
            self.points[index + 1],
            self.tangents[index],
            self.tangents[index + 1],
            t,
        )
    }

    /// Position at global parameter `u`.
    pub fn point_at(&self, u: f64) -> Result<Point3> {
        let (index, t) = self.locate(u)?;
        Ok(self.point_in_segment(index, t))
    }

    /// Derivative of the position with respect to `u`.
    pub fn tangent_at(&self, u: f64) -> Result<Vector3> {
        let (index, t) = self.locate(u)?;
        Ok(self.derivative_in_segment(index, t))
    }

    /// Unit direction of travel at `u`.
    ///
    /// Where the derivative vanishes (a zero endpoint tangent) the direction of
    /// the segment chord is used instead; a fully degenerate segment points down -Z.
    pub fn direction_at(&self, u: f64) -> Result<Vector3> {
        let (index, t) = self.locate(u)?;
        let derivative = self.derivative_in_segment(index, t);
        let direction = derivative
            .try_normalize()
            .or_else(|| (self.points[index + 1] - self.points[index]).try_normalize())
            .unwrap_or(-Vector3::Z);
        Ok(direction)
    }

    /// Orientation frame at `u` with `up` as the preferred up direction.
    ///
    /// When the path runs parallel to `up` any perpendicular vector is used.
    pub fn frame_at(&self, u: f64, up: Vector3) -> Result<Frame> {
        let position = self.point_at(u)?;
        let forward = self.direction_at(u)?;
        let right = forward
            .cross(up)
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let up = right.cross(forward);
        Ok(Frame {
            position,
            forward,
            up,
            right,
        })
    }

    /// `count` positions evenly spaced in `u`, from the start to the end of the domain.
    pub fn sample(&self, count: usize) -> Result<Vec<Point3>> {
        if count < 2 {
            return Err(CoasterError::invalid_input(format!(
                "sampling needs at least 2 points, got {count}"
            )));
        }
        Ok(sample_uniform(self, count))
    }

    /// Bounding box of the curve itself, which can bulge past the control points.
    pub fn bounds(&self) -> Aabb3 {
        let samples = sample_uniform(self, self.segment_count() * BOUNDS_SAMPLES_PER_SEGMENT + 1);
        let curve = Aabb3::from_points(&samples).unwrap_or(Aabb3::new(self.points[0], self.points[0]));
        Aabb3::from_points(&self.points)
            .map(|control| control.merge(&curve))
            .unwrap_or(curve)
    }
}

impl Curve for HermitePath {
    fn point_at(&self, t: f64) -> Point3 {
        let (index, local) = self.locate_unchecked(t);
        self.point_in_segment(index, local)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (index, local) = self.locate_unchecked(t);
        self.derivative_in_segment(index, local)
    }

    fn domain(&self) -> (f64, f64) {
        HermitePath::domain(self)
    }

    fn is_closed(&self) -> bool {
        self.options.mode == PathMode::Closed
    }
}
