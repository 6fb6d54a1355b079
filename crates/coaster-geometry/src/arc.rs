//! Arc-length lookup for moving along a path at constant speed.

use coaster_core::{CoasterError, Result};

use crate::path::{HermitePath, PathMode};

/// Most positions a single table will sample.
pub const MAX_TABLE_SAMPLES: usize = 1 << 20;

/// Cumulative chord lengths sampled uniformly in the path parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    params: Vec<f64>,
    distances: Vec<f64>,
    closed: bool,
}

impl ArcLengthTable {
    pub fn build(path: &HermitePath, samples_per_segment: usize) -> Result<Self> {
        if samples_per_segment == 0 {
            return Err(CoasterError::invalid_input(
                "arc-length table needs at least 1 sample per segment",
            ));
        }
        let segments = path.segment_count();
        let count = segments
            .checked_mul(samples_per_segment)
            .and_then(|n| n.checked_add(1))
            .filter(|&n| n <= MAX_TABLE_SAMPLES)
            .ok_or_else(|| {
                CoasterError::invalid_input(format!(
                    "{segments} segments x {samples_per_segment} samples exceeds the \
                     arc-length table limit of {MAX_TABLE_SAMPLES}"
                ))
            })?;
        let positions = path.sample(count)?;

        let step = segments as f64 / (count - 1) as f64;
        let params = (0..count).map(|i| i as f64 * step).collect();
        let distances = std::iter::once(0.0)
            .chain(positions.windows(2).scan(0.0, |total, pair| {
                *total += pair[0].distance(pair[1]);
                Some(*total)
            }))
            .collect();

        Ok(Self {
            params,
            distances,
            closed: path.mode() == PathMode::Closed,
        })
    }

    /// Approximate length of the whole path.
    pub fn total_length(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    fn end_param(&self) -> f64 {
        self.params.last().copied().unwrap_or(0.0)
    }

    /// Path parameter reached after travelling `distance` from the start.
    ///
    /// Open paths clamp to the ends; closed paths wrap around the loop.
    pub fn param_at_distance(&self, distance: f64) -> f64 {
        let total = self.total_length();
        if total <= 0.0 || !distance.is_finite() {
            return 0.0;
        }
        let s = if self.closed {
            distance.rem_euclid(total)
        } else {
            distance.clamp(0.0, total)
        };

        let upper = self.distances.partition_point(|&d| d < s);
        if upper == 0 {
            return self.params[0];
        }
        if upper >= self.distances.len() {
            return self.end_param();
        }
        let lo = upper - 1;
        let span = self.distances[upper] - self.distances[lo];
        let t = if span > 0.0 {
            (s - self.distances[lo]) / span
        } else {
            0.0
        };
        self.params[lo] + (self.params[upper] - self.params[lo]) * t
    }

    /// Distance travelled from the start when reaching parameter `u`.
    pub fn distance_at_param(&self, u: f64) -> f64 {
        let end = self.end_param();
        if end <= 0.0 || !u.is_finite() {
            return 0.0;
        }
        let u = if self.closed {
            u.rem_euclid(end)
        } else {
            u.clamp(0.0, end)
        };

        let step = end / (self.params.len() - 1) as f64;
        let lo = ((u / step).floor() as usize).min(self.params.len() - 2);
        let t = (u - self.params[lo]) / step;
        self.distances[lo] + (self.distances[lo + 1] - self.distances[lo]) * t
    }
}
