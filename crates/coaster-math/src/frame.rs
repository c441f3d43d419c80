//! Rail frame helpers.

use crate::Vector3;

/// Lateral half-gauge vector for a rail pair.
///
/// The two rails of the track render at `position ± offset` where the offset
/// is `normalize(direction × up) × half_width`. When the direction runs
/// parallel to the up hint the cross product collapses; the offset then falls
/// back to a fixed perpendicular axis so the rails stay finite.
///
/// Returns zero only when `direction` itself is zero.
pub fn lateral_offset(direction: Vector3, up: Vector3, half_width: f64) -> Vector3 {
    let side = direction.cross(up);
    let side = if side.length() > 1e-12 {
        side
    } else {
        // Threshold on the normalized direction, so a short vertical step
        // still switches to the Z reference.
        let reference = if direction.normalize_or_zero().y.abs() < 0.9 {
            Vector3::Y
        } else {
            Vector3::Z
        };
        direction.cross(reference)
    };
    side.normalize_or_zero() * half_width
}
