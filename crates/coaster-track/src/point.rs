use coaster_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One editable knot of the track loop.
///
/// The orientation is an "up" hint, not a frame axis: it is stored exactly as
/// given and renormalized every time it is consumed, so editing operations may
/// scale or blend it freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    pub orientation: Vector3,
}

impl ControlPoint {
    /// Control point with the default upright orientation hint.
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            orientation: Vector3::Y,
        }
    }

    pub fn with_orientation(position: Point3, orientation: Vector3) -> Self {
        Self {
            position,
            orientation,
        }
    }
}
