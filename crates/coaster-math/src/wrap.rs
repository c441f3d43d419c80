//! Cyclic wrapping of curve parameters and point indices.
//!
//! Every crate that walks the closed track goes through these two helpers so
//! the whole engine shares one wrapping convention: the parameter domain is
//! half-open `[0, n)`, so `wrap_param(n as f64, n) == 0.0` and an exact
//! integer parameter belongs to the span that starts there.

/// Wrap a curve parameter into `[0, n)` where `n` is the span count.
///
/// Adds or subtracts whole laps, which preserves the fractional part exactly
/// for negative deltas and small overshoots (no truncating modulo). Inputs
/// many laps out of range are first reduced with a euclidean remainder.
///
/// # Arguments
/// * `t` - Curve parameter, any finite value
/// * `n` - Number of spans (equals the control point count on a closed loop)
pub fn wrap_param(t: f64, n: usize) -> f64 {
    debug_assert!(n > 0, "wrap_param on an empty loop");
    let span = n as f64;
    let mut t = if t.abs() >= 2.0 * span {
        // rem_euclid can round up to exactly `span` for tiny negative inputs;
        // the loops below fix that case.
        t.rem_euclid(span)
    } else {
        t
    };
    // Negatives first: adding a lap to a tiny negative t rounds to exactly
    // `span`, which the second loop then folds back to zero.
    while t < 0.0 {
        t += span;
    }
    while t >= span {
        t -= span;
    }
    t
}

/// Wrap a signed point index into `[0, len)`.
///
/// Cubic evaluation reaches one point behind and two ahead of the current
/// segment, so callers routinely pass -1 and `len + 1`.
pub fn wrap_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0, "wrap_index on an empty list");
    index.rem_euclid(len as isize) as usize
}
