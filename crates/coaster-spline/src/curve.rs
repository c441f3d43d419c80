use coaster_math::{Point3, Vector3};

/// Trait for parametric track curves in 3D space.
///
/// Implementations wrap or clamp out-of-domain parameters themselves, so
/// samplers and the motion controller can walk freely across the seam of a
/// closed loop.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Unit tangent at parameter `t`; zero when the derivative vanishes.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Unit up vector at parameter `t`.
    fn up_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }
}
