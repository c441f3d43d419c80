use coaster_core::error::{CoasterError, Result};
use coaster_math::wrap::wrap_param;
use coaster_math::{Point3, Vector3};
use coaster_track::{ControlPoint, Track};

use crate::basis::{blend_weights, blend_weights_derivative, SplineKind};
use crate::curve::Curve;

/// A track viewed as a closed parametric curve under one basis.
///
/// The parameter domain is `[0, n)` for n control points: the integer part
/// selects the span, the fraction is the local blend parameter. Everything is
/// evaluated straight off the borrowed control points on every call, so edits
/// between frames are always picked up; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct TrackCurve<'a> {
    track: &'a Track,
    kind: SplineKind,
}

impl<'a> TrackCurve<'a> {
    /// View `track` under `kind`.
    ///
    /// Fails when the track is shorter than the basis minimum. Callers that
    /// want the editor's silent degradation pick the basis with
    /// [`SplineKind::for_point_count`] first.
    pub fn new(track: &'a Track, kind: SplineKind) -> Result<Self> {
        if track.len() < kind.min_points() {
            return Err(CoasterError::Spline(format!(
                "{:?} basis needs at least {} control points, track has {}",
                kind,
                kind.min_points(),
                track.len()
            )));
        }
        Ok(Self { track, kind })
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Number of spans; equals the control point count on a closed loop.
    pub fn span_count(&self) -> usize {
        self.track.span_count()
    }

    /// Wrap a parameter into this curve's domain.
    pub fn wrap(&self, t: f64) -> f64 {
        wrap_param(t, self.track.span_count())
    }

    /// Span index and local parameter of a wrapped `t`.
    pub fn split(&self, t: f64) -> (usize, f64) {
        let t = self.wrap(t);
        let span = t as usize;
        (span, t - span as f64)
    }

    fn neighborhood(&self, span: usize) -> [ControlPoint; 4] {
        let i = span as isize;
        [
            *self.track.point_cyclic(i - 1),
            *self.track.point_cyclic(i),
            *self.track.point_cyclic(i + 1),
            *self.track.point_cyclic(i + 2),
        ]
    }
}

impl Curve for TrackCurve<'_> {
    fn point_at(&self, t: f64) -> Point3 {
        let (span, u) = self.split(t);
        match self.kind.matrix() {
            None => {
                let a = self.track.point_cyclic(span as isize).position;
                let b = self.track.point_cyclic(span as isize + 1).position;
                a.lerp(b, u)
            }
            Some(matrix) => {
                let weights = blend_weights(matrix, u);
                let points = self.neighborhood(span);
                let mut position = Point3::ZERO;
                for (weight, point) in weights.iter().zip(&points) {
                    position += *weight * point.position;
                }
                position
            }
        }
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (span, u) = self.split(t);
        let derivative = match self.kind.matrix() {
            // Constant chord direction across a linear span.
            None => {
                self.track.point_cyclic(span as isize + 1).position
                    - self.track.point_cyclic(span as isize).position
            }
            Some(matrix) => {
                let weights = blend_weights_derivative(matrix, u);
                let points = self.neighborhood(span);
                let mut derivative = Vector3::ZERO;
                for (weight, point) in weights.iter().zip(&points) {
                    derivative += *weight * point.position;
                }
                derivative
            }
        };
        // Coincident control points leave no direction to report.
        let len = derivative.length();
        if len < 1e-12 {
            return Vector3::ZERO;
        }
        derivative / len
    }

    fn up_at(&self, t: f64) -> Vector3 {
        let (span, u) = self.split(t);
        let blended = match self.kind.matrix() {
            None => {
                let a = self.track.point_cyclic(span as isize).orientation;
                let b = self.track.point_cyclic(span as isize + 1).orientation;
                a.lerp(b, u)
            }
            Some(matrix) => {
                let weights = blend_weights(matrix, u);
                let points = self.neighborhood(span);
                let mut up = Vector3::ZERO;
                for (weight, point) in weights.iter().zip(&points) {
                    up += *weight * point.orientation;
                }
                up
            }
        };
        // Orientation hints are stored unnormalized and may cancel out.
        let len = blended.length();
        if len < 1e-12 {
            return Vector3::Y;
        }
        blended / len
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.track.span_count() as f64)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coaster_math::DVec3;

    fn flat_square() -> Track {
        Track::new(vec![
            ControlPoint::new(DVec3::new(0.0, 0.0, 0.0)),
            ControlPoint::new(DVec3::new(10.0, 0.0, 0.0)),
            ControlPoint::new(DVec3::new(10.0, 0.0, 10.0)),
            ControlPoint::new(DVec3::new(0.0, 0.0, 10.0)),
        ])
    }

    fn hilly_loop() -> Track {
        Track::new(vec![
            ControlPoint::with_orientation(DVec3::new(50.0, 5.0, 0.0), DVec3::Y),
            ControlPoint::with_orientation(DVec3::new(10.0, 25.0, 45.0), DVec3::new(0.2, 1.0, 0.0)),
            ControlPoint::with_orientation(DVec3::new(-40.0, 8.0, 20.0), DVec3::new(0.0, 2.0, 0.4)),
            ControlPoint::with_orientation(DVec3::new(-35.0, 18.0, -30.0), DVec3::Y),
            ControlPoint::with_orientation(DVec3::new(15.0, 2.0, -40.0), DVec3::new(-0.3, 1.0, 0.1)),
        ])
    }

    const ALL_KINDS: [SplineKind; 3] =
        [SplineKind::Linear, SplineKind::Cardinal, SplineKind::BSpline];

    #[test]
    fn test_linear_square_midpoints() {
        let track = flat_square();
        let curve = TrackCurve::new(&track, SplineKind::Linear).unwrap();
        let p = curve.point_at(0.5);
        assert!((p - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-12, "got {:?}", p);
        let p = curve.point_at(2.5);
        assert!((p - DVec3::new(5.0, 0.0, 10.0)).length() < 1e-12, "got {:?}", p);
    }

    #[test]
    fn test_linear_wrapping_span_returns_home() {
        let track = flat_square();
        let curve = TrackCurve::new(&track, SplineKind::Linear).unwrap();
        // Span 3 runs from the last point back to the first.
        let p = curve.point_at(3.5);
        assert!((p - DVec3::new(0.0, 0.0, 5.0)).length() < 1e-12, "got {:?}", p);
    }

    #[test]
    fn test_wrap_invariance_is_exact() {
        let track = hilly_loop();
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            // Offsets by whole laps of 5 are exactly representable here, so
            // the wrapped parameter is bit-identical and so is the position.
            assert_eq!(curve.point_at(2.5), curve.point_at(7.5), "{:?}", kind);
            assert_eq!(curve.point_at(2.5), curve.point_at(-2.5), "{:?}", kind);
            assert_eq!(curve.point_at(0.25), curve.point_at(10.25), "{:?}", kind);
            assert_eq!(curve.point_at(5.0), curve.point_at(0.0), "{:?}", kind);
        }
    }

    #[test]
    fn test_wrap_invariance_many_laps() {
        let track = hilly_loop();
        let curve = TrackCurve::new(&track, SplineKind::Cardinal).unwrap();
        let base = curve.point_at(1.3);
        let far = curve.point_at(1.3 + 5.0 * 2000.0);
        assert!((base - far).length() < 1e-6, "{:?} vs {:?}", base, far);
    }

    #[test]
    fn test_continuity_across_span_boundaries() {
        let track = hilly_loop();
        let eps = 1e-9;
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            for span in 0..curve.span_count() {
                let boundary = (span + 1) as f64;
                let before = curve.point_at(boundary - eps);
                let at = curve.point_at(boundary);
                assert!(
                    (before - at).length() < 1e-5,
                    "{:?} jumps at span boundary {}: {:?} vs {:?}",
                    kind,
                    boundary,
                    before,
                    at
                );
            }
        }
    }

    #[test]
    fn test_tangent_matches_position_derivative() {
        let track = hilly_loop();
        let h = 1e-6;
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            // Stay off the integers: the linear basis has corner tangents.
            for i in 0..40 {
                let t = 0.13 + i as f64 * 0.121;
                let fd = (curve.point_at(t + h) - curve.point_at(t - h)) / (2.0 * h);
                let fd = fd.normalize_or_zero();
                let tangent = curve.tangent_at(t);
                assert!(
                    (fd - tangent).length() < 1e-5,
                    "{:?} tangent at t={} is {:?}, finite difference {:?}",
                    kind,
                    t,
                    tangent,
                    fd
                );
            }
        }
    }

    #[test]
    fn test_tangent_is_unit_length() {
        let track = hilly_loop();
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            for i in 0..20 {
                let t = i as f64 * 0.26;
                let len = curve.tangent_at(t).length();
                assert!((len - 1.0).abs() < 1e-12, "{:?} tangent length {}", kind, len);
            }
        }
    }

    #[test]
    fn test_cardinal_interpolates_control_points() {
        let track = hilly_loop();
        let curve = TrackCurve::new(&track, SplineKind::Cardinal).unwrap();
        for (i, point) in track.points.iter().enumerate() {
            let p = curve.point_at(i as f64);
            assert!(
                (p - point.position).length() < 1e-12,
                "point {} not interpolated: {:?} vs {:?}",
                i,
                p,
                point.position
            );
        }
    }

    #[test]
    fn test_bspline_span_start_average() {
        let track = hilly_loop();
        let curve = TrackCurve::new(&track, SplineKind::BSpline).unwrap();
        for i in 0..track.len() as isize {
            let expected = (track.point_cyclic(i - 1).position
                + 4.0 * track.point_cyclic(i).position
                + track.point_cyclic(i + 1).position)
                / 6.0;
            let p = curve.point_at(i as f64);
            assert!(
                (p - expected).length() < 1e-12,
                "span {} start {:?}, expected {:?}",
                i,
                p,
                expected
            );
        }
    }

    #[test]
    fn test_up_is_unit_and_blends_magnitudes_away() {
        let mut track = flat_square();
        track.set_orientation(0, DVec3::new(0.0, 5.0, 0.0)).unwrap();
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            for i in 0..16 {
                let t = i as f64 * 0.25;
                let up = curve.up_at(t);
                assert!((up.length() - 1.0).abs() < 1e-12, "{:?} up at {}", kind, t);
            }
        }
    }

    #[test]
    fn test_up_cancellation_falls_back() {
        let mut track = flat_square();
        track.set_orientation(0, DVec3::Y).unwrap();
        track.set_orientation(1, -DVec3::Y).unwrap();
        let curve = TrackCurve::new(&track, SplineKind::Linear).unwrap();
        // Halfway along span 0 the lerped hints cancel exactly.
        assert_eq!(curve.up_at(0.5), DVec3::Y);
    }

    #[test]
    fn test_coincident_points_give_zero_tangent() {
        let track = Track::new(vec![ControlPoint::new(DVec3::ONE); 4]);
        for kind in ALL_KINDS {
            let curve = TrackCurve::new(&track, kind).unwrap();
            let tangent = curve.tangent_at(0.5);
            assert_eq!(tangent, DVec3::ZERO, "{:?}", kind);
            assert!(curve.point_at(0.5).is_finite());
        }
    }

    #[test]
    fn test_short_track_rejected_for_cubics() {
        let track = Track::new(vec![
            ControlPoint::new(DVec3::ZERO),
            ControlPoint::new(DVec3::X),
            ControlPoint::new(DVec3::Z),
        ]);
        assert!(TrackCurve::new(&track, SplineKind::Cardinal).is_err());
        assert!(TrackCurve::new(&track, SplineKind::BSpline).is_err());
        assert!(TrackCurve::new(&track, SplineKind::Linear).is_ok());

        // The editor's degradation path.
        let kind = SplineKind::Cardinal.for_point_count(track.len()).unwrap();
        assert_eq!(kind, SplineKind::Linear);
        assert!(TrackCurve::new(&track, kind).is_ok());
    }

    #[test]
    fn test_domain_and_closure() {
        let track = hilly_loop();
        let curve = TrackCurve::new(&track, SplineKind::Cardinal).unwrap();
        assert_eq!(curve.domain(), (0.0, 5.0));
        assert!(curve.is_closed());
        assert_eq!(curve.split(4.25), (4, 0.25));
        assert_eq!(curve.split(5.25).0, 0);
    }
}
