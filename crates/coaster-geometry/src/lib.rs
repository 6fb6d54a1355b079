//! Coaster geometry: Hermite splines and the track path built from them.

pub mod arc;
pub mod curve;
pub mod path;
pub mod tangent;
pub mod tessellate;

pub use arc::{ArcLengthTable, MAX_TABLE_SAMPLES};
pub use curve::{hermite_derivative, hermite_point, Curve, HermiteBasis, HermiteSegment};
pub use path::{Frame, HermitePath, OutOfRange, PathMode, PathOptions};
pub use tangent::{calculate_tangent, compute_tangents, EndpointTangent};
