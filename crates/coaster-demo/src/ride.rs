//! The car's journey along the track.

use coaster_core::{CoasterError, Result};
use coaster_geometry::{ArcLengthTable, Frame, HermitePath, PathMode};
use coaster_math::{Point3, Vector3};

/// Moves a point along a path at constant speed.
///
/// Closed tracks loop forever; on an open track the car stops at the last
/// control point.
#[derive(Debug, Clone)]
pub struct Ride {
    path: HermitePath,
    table: ArcLengthTable,
    speed: f64,
    distance: f64,
}

impl Ride {
    /// A track with no length gives [`CoasterError::Geometry`].
    pub fn new(path: HermitePath, speed: f64, samples_per_segment: usize) -> Result<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(CoasterError::invalid_input(format!(
                "ride speed must be positive, got {speed}"
            )));
        }
        let table = ArcLengthTable::build(&path, samples_per_segment)?;
        if path.options().tolerance.is_zero(table.total_length()) {
            return Err(CoasterError::Geometry(format!(
                "track through {} control points has zero length",
                path.control_points().len()
            )));
        }
        log::debug!(
            "ride over {} segments, {:.3} units long",
            path.segment_count(),
            table.total_length()
        );
        Ok(Self {
            path,
            table,
            speed,
            distance: 0.0,
        })
    }

    pub fn path(&self) -> &HermitePath {
        &self.path
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn length(&self) -> f64 {
        self.table.total_length()
    }

    /// Distance travelled from the start, within `[0, length]`.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Seconds for one pass over the track.
    pub fn lap_time(&self) -> f64 {
        self.length() / self.speed
    }

    pub fn is_finished(&self) -> bool {
        self.path.mode() == PathMode::Open && self.distance >= self.length()
    }

    pub fn reset(&mut self) {
        self.distance = 0.0;
    }

    /// Move on by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(CoasterError::invalid_input(format!(
                "time step must be finite and non-negative, got {dt}"
            )));
        }
        let length = self.length();
        let travelled = self.distance + self.speed * dt;
        self.distance = match self.path.mode() {
            PathMode::Closed => travelled.rem_euclid(length),
            PathMode::Open => travelled.min(length),
        };
        Ok(())
    }

    /// Current path parameter.
    pub fn param(&self) -> f64 {
        self.table.param_at_distance(self.distance)
    }

    pub fn position(&self) -> Result<Point3> {
        self.path.point_at(self.param())
    }

    pub fn frame(&self, up: Vector3) -> Result<Frame> {
        self.path.frame_at(self.param(), up)
    }
}
