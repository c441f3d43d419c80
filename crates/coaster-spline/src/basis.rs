//! The three track bases and their cubic blend matrices.

use serde::{Deserialize, Serialize};

/// Row-major cubic blend matrix: row `r` carries the coefficients of
/// `u^(3-r)`, column `j` distributes to neighborhood point `j`.
pub type BasisMatrix = [[f64; 4]; 4];

/// Cardinal cubic blend matrix (tension 1/2).
pub const CARDINAL_MATRIX: BasisMatrix = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

/// Uniform cubic B-spline blend matrix.
pub const B_SPLINE_MATRIX: BasisMatrix = [
    [-1.0 / 6.0, 0.5, -0.5, 1.0 / 6.0],
    [0.5, -1.0, 0.5, 0.0],
    [-0.5, 0.0, 0.5, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
];

/// The closed set of evaluation bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplineKind {
    /// Straight chords between successive control points.
    Linear,
    /// Cardinal cubic (Catmull-Rom at tension 1/2); interpolates the points.
    #[default]
    Cardinal,
    /// Uniform cubic B-spline; approximates the points with C2 continuity.
    BSpline,
}

impl SplineKind {
    /// Fewest control points this basis can evaluate.
    pub fn min_points(self) -> usize {
        match self {
            SplineKind::Linear => 2,
            SplineKind::Cardinal | SplineKind::BSpline => 4,
        }
    }

    /// Blend matrix of the basis, `None` for `Linear`.
    pub fn matrix(self) -> Option<&'static BasisMatrix> {
        match self {
            SplineKind::Linear => None,
            SplineKind::Cardinal => Some(&CARDINAL_MATRIX),
            SplineKind::BSpline => Some(&B_SPLINE_MATRIX),
        }
    }

    /// Degrade to a basis the given point count supports.
    ///
    /// A cubic over a track that has shrunk below 4 points falls back to
    /// `Linear`; below 2 points nothing can be evaluated.
    pub fn for_point_count(self, count: usize) -> Option<SplineKind> {
        if count >= self.min_points() {
            Some(self)
        } else if count >= SplineKind::Linear.min_points() {
            Some(SplineKind::Linear)
        } else {
            None
        }
    }
}

/// Neighborhood point weights of a cubic basis at local parameter `u`.
pub fn blend_weights(matrix: &BasisMatrix, u: f64) -> [f64; 4] {
    weights_for(matrix, [u * u * u, u * u, u, 1.0])
}

/// Neighborhood point weights of the analytic derivative at `u`.
///
/// This is the derivative of the position polynomial itself, not a finite
/// difference, so tangents stay consistent with positions.
pub fn blend_weights_derivative(matrix: &BasisMatrix, u: f64) -> [f64; 4] {
    weights_for(matrix, [3.0 * u * u, 2.0 * u, 1.0, 0.0])
}

fn weights_for(matrix: &BasisMatrix, powers: [f64; 4]) -> [f64; 4] {
    let mut weights = [0.0; 4];
    for (row, power) in matrix.iter().zip(powers) {
        for (weight, coefficient) in weights.iter_mut().zip(row) {
            *weight += power * coefficient;
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cardinal() {
        assert_eq!(SplineKind::default(), SplineKind::Cardinal);
    }

    #[test]
    fn test_min_points() {
        assert_eq!(SplineKind::Linear.min_points(), 2);
        assert_eq!(SplineKind::Cardinal.min_points(), 4);
        assert_eq!(SplineKind::BSpline.min_points(), 4);
    }

    #[test]
    fn test_degrade_for_point_count() {
        assert_eq!(
            SplineKind::Cardinal.for_point_count(4),
            Some(SplineKind::Cardinal)
        );
        assert_eq!(
            SplineKind::BSpline.for_point_count(3),
            Some(SplineKind::Linear)
        );
        assert_eq!(SplineKind::Linear.for_point_count(2), Some(SplineKind::Linear));
        assert_eq!(SplineKind::Cardinal.for_point_count(1), None);
    }

    #[test]
    fn test_weights_partition_of_unity() {
        for matrix in [&CARDINAL_MATRIX, &B_SPLINE_MATRIX] {
            for i in 0..=10 {
                let u = i as f64 / 10.0;
                let sum: f64 = blend_weights(matrix, u).iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-12,
                    "weights at u={} sum to {}",
                    u,
                    sum
                );
            }
        }
    }

    #[test]
    fn test_derivative_weights_sum_to_zero() {
        for matrix in [&CARDINAL_MATRIX, &B_SPLINE_MATRIX] {
            for i in 0..=10 {
                let u = i as f64 / 10.0;
                let sum: f64 = blend_weights_derivative(matrix, u).iter().sum();
                assert!(sum.abs() < 1e-12, "derivative weights at u={} sum to {}", u, sum);
            }
        }
    }

    #[test]
    fn test_cardinal_endpoint_weights() {
        let start = blend_weights(&CARDINAL_MATRIX, 0.0);
        assert_eq!(start, [0.0, 1.0, 0.0, 0.0]);
        let end = blend_weights(&CARDINAL_MATRIX, 1.0);
        for (got, want) in end.iter().zip([0.0, 0.0, 1.0, 0.0]) {
            assert!((got - want).abs() < 1e-12, "end weights {:?}", end);
        }
    }

    #[test]
    fn test_bspline_endpoint_weights() {
        let start = blend_weights(&B_SPLINE_MATRIX, 0.0);
        let want = [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0];
        for (got, want) in start.iter().zip(want) {
            assert!((got - want).abs() < 1e-12, "start weights {:?}", start);
        }
    }

    #[test]
    fn test_cardinal_tangent_at_start_is_half_chord() {
        // Classic Catmull-Rom property: derivative at u=0 is (P2 - P0) / 2.
        let w = blend_weights_derivative(&CARDINAL_MATRIX, 0.0);
        assert_eq!(w, [-0.5, 0.0, 0.5, 0.0]);
    }
}
