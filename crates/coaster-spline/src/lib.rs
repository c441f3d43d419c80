//! Spline evaluation over closed control-point loops.

pub mod arclength;
pub mod basis;
mod curve;
mod track_curve;

pub use basis::{BasisMatrix, SplineKind, B_SPLINE_MATRIX, CARDINAL_MATRIX};
pub use curve::Curve;
pub use track_curve::TrackCurve;
