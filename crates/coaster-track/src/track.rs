use coaster_core::error::{CoasterError, Result};
use coaster_core::traits::{BoundingBox, Validate};
use coaster_math::wrap::wrap_index;
use coaster_math::{DMat3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::point::ControlPoint;

/// Closed loop of control points, addressed by index modulo the length.
///
/// Deleting a point renumbers everything after it. Holders of external
/// indices re-clamp through [`Track::clamped_selection`] and holders of
/// in-flight curve parameters re-wrap against the new span count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub points: Vec<ControlPoint>,
}

impl Track {
    /// Editing never shrinks a track below this many points, so the cubic
    /// bases always have a full neighborhood to blend.
    pub const MIN_POINTS: usize = 4;

    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of spans of the closed loop: one per point, the last span
    /// running from the final point back to the first.
    pub fn span_count(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Control point at a signed index, wrapped onto the loop.
    pub fn point_cyclic(&self, index: isize) -> &ControlPoint {
        &self.points[wrap_index(index, self.points.len())]
    }

    /// Insert a point at `index`, shifting later points up.
    pub fn insert_point(&mut self, index: usize, point: ControlPoint) -> Result<()> {
        if index > self.points.len() {
            return Err(CoasterError::InvalidOperation(format!(
                "insert index {} past end of {}-point track",
                index,
                self.points.len()
            )));
        }
        self.points.insert(index, point);
        Ok(())
    }

    pub fn push_point(&mut self, point: ControlPoint) {
        self.points.push(point);
    }

    /// Delete the point at `index`, renumbering later points down.
    ///
    /// Refused when the track is already at [`Track::MIN_POINTS`].
    pub fn remove_point(&mut self, index: usize) -> Result<ControlPoint> {
        if index >= self.points.len() {
            return Err(CoasterError::InvalidOperation(format!(
                "remove index {} out of range for {}-point track",
                index,
                self.points.len()
            )));
        }
        if self.points.len() <= Self::MIN_POINTS {
            return Err(CoasterError::InvalidOperation(format!(
                "track keeps at least {} control points",
                Self::MIN_POINTS
            )));
        }
        Ok(self.points.remove(index))
    }

    pub fn set_position(&mut self, index: usize, position: Point3) -> Result<()> {
        self.point_mut(index)?.position = position;
        Ok(())
    }

    pub fn set_orientation(&mut self, index: usize, orientation: Vector3) -> Result<()> {
        self.point_mut(index)?.orientation = orientation;
        Ok(())
    }

    /// Insert the midpoint of the span starting at `index`, returning the new
    /// point's index.
    ///
    /// Position and orientation are averaged with the cyclic successor. An
    /// averaged orientation that cancels out (opposite hints) falls back to
    /// the span start's orientation.
    pub fn split_span(&mut self, index: usize) -> Result<usize> {
        if index >= self.points.len() {
            return Err(CoasterError::InvalidOperation(format!(
                "split index {} out of range for {}-point track",
                index,
                self.points.len()
            )));
        }
        let a = self.points[index];
        let b = *self.point_cyclic(index as isize + 1);
        let mut orientation = (a.orientation + b.orientation) * 0.5;
        if orientation.length_squared() < 1e-24 {
            orientation = a.orientation;
        }
        let mid = ControlPoint::with_orientation((a.position + b.position) * 0.5, orientation);
        self.points.insert(index + 1, mid);
        Ok(index + 1)
    }

    /// Rotate the orientation hint of one point about a world axis.
    pub fn roll_orientation(&mut self, index: usize, axis: Vector3, radians: f64) -> Result<()> {
        let axis = axis.try_normalize().ok_or_else(|| {
            CoasterError::InvalidOperation("roll axis must be non-zero".into())
        })?;
        let rotation = DMat3::from_axis_angle(axis, radians);
        let point = self.point_mut(index)?;
        point.orientation = rotation * point.orientation;
        Ok(())
    }

    /// Re-clamp an externally held selected index after an edit. Any index
    /// outside the current range collapses to 0.
    pub fn clamped_selection(&self, selected: usize) -> usize {
        if selected >= self.points.len() {
            0
        } else {
            selected
        }
    }

    fn point_mut(&mut self, index: usize) -> Result<&mut ControlPoint> {
        let len = self.points.len();
        self.points.get_mut(index).ok_or_else(|| {
            CoasterError::InvalidOperation(format!(
                "point index {} out of range for {}-point track",
                index, len
            ))
        })
    }
}

/// The starter loop: a flat diamond 50 units across, 5 units off the ground.
impl Default for Track {
    fn default() -> Self {
        Self::new(vec![
            ControlPoint::new(Point3::new(50.0, 5.0, 0.0)),
            ControlPoint::new(Point3::new(0.0, 5.0, 50.0)),
            ControlPoint::new(Point3::new(-50.0, 5.0, 0.0)),
            ControlPoint::new(Point3::new(0.0, 5.0, -50.0)),
        ])
    }
}

impl Validate for Track {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(CoasterError::InvalidOperation(
                "track needs at least 2 control points".into(),
            ));
        }
        for (index, point) in self.points.iter().enumerate() {
            if !point.position.is_finite() {
                return Err(CoasterError::InvalidOperation(format!(
                    "point {} has a non-finite position",
                    index
                )));
            }
            if !point.orientation.is_finite() {
                return Err(CoasterError::InvalidOperation(format!(
                    "point {} has a non-finite orientation",
                    index
                )));
            }
            if point.orientation.length_squared() < 1e-24 {
                return Err(CoasterError::InvalidOperation(format!(
                    "point {} has a zero orientation hint",
                    index
                )));
            }
        }
        Ok(())
    }
}

impl BoundingBox for Track {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        if self.points.is_empty() {
            return (Point3::ZERO, Point3::ZERO);
        }
        let mut min = Point3::splat(f64::INFINITY);
        let mut max = Point3::splat(f64::NEG_INFINITY);
        for point in &self.points {
            min = min.min(point.position);
            max = max.max(point.position);
        }
        (min, max)
    }
}
