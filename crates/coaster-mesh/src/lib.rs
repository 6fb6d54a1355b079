pub mod mesh;
pub mod primitives;
pub mod sweep;

pub use mesh::{TriangleMesh, FLOATS_PER_VERTEX};
pub use primitives::cuboid;
pub use sweep::{sweep_tube, track_mesh, SweepOptions, TrackStyle, MAX_SWEEP_VERTICES};
