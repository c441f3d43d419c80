//! Editable roller-coaster track: a closed loop of control points.

pub mod io;
pub mod point;
pub mod track;

pub use point::ControlPoint;
pub use track::Track;
