//! Arc-length walking with fixed micro-steps.
//!
//! The track has no closed-form arc length under any of its bases, so
//! physical distances are accumulated by stepping the curve parameter in
//! fixed micro-increments and summing chord lengths. Overshoot of up to one
//! micro-step is accepted; there is no interpolation correction.

use coaster_math::wrap::wrap_param;

use crate::curve::Curve;

/// Micro-steps per parameter unit (one control-point span).
pub const WALK_RESOLUTION: usize = 1000;

/// Result of an arc-length walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walk {
    /// Final curve parameter, wrapped into the domain for closed curves.
    pub t: f64,
    /// Signed physical distance actually covered. Magnitude may exceed the
    /// request by up to one micro-step, or fall short when the walk caps.
    pub traveled: f64,
}

/// Advance from `start` until `|distance|` of track has passed underneath.
///
/// Steps `t` by `±1/resolution`, accumulating the chord length between
/// successive positions, and stops as soon as the accumulated length reaches
/// `|distance|`. A negative `distance` walks backward. The walk gives up
/// after one full lap of micro-steps so a degenerate track (for instance all
/// control points coincident) still terminates.
pub fn advance(curve: &dyn Curve, start: f64, distance: f64, resolution: usize) -> Walk {
    debug_assert!(resolution > 0, "walk needs a positive resolution");
    let target = distance.abs();
    let step = (1.0 / resolution as f64).copysign(distance);
    let (t_min, t_max) = curve.domain();
    let max_steps = ((t_max - t_min) * resolution as f64).ceil() as usize;

    let mut t = start;
    let mut prev = curve.point_at(t);
    let mut accumulated = 0.0;
    let mut steps = 0;
    while accumulated < target {
        if steps >= max_steps {
            log::warn!(
                "arc-length walk capped after {} micro-steps ({:.3} of {:.3} units)",
                steps,
                accumulated,
                target
            );
            break;
        }
        t += step;
        let next = curve.point_at(t);
        accumulated += (next - prev).length();
        prev = next;
        steps += 1;
    }

    let t = if curve.is_closed() {
        debug_assert!(t_min == 0.0, "closed track curves start their domain at 0");
        wrap_param(t, t_max as usize)
    } else {
        t.clamp(t_min, t_max)
    };
    Walk {
        t,
        traveled: accumulated.copysign(distance),
    }
}

/// Physical distance covered across the parameter interval
/// `[start, start + span]`, walked at the same micro-step scheme.
pub fn length_over(curve: &dyn Curve, start: f64, span: f64, resolution: usize) -> f64 {
    debug_assert!(resolution > 0, "walk needs a positive resolution");
    let steps = (span.abs() * resolution as f64).ceil() as usize;
    if steps == 0 {
        return 0.0;
    }
    let step = span / steps as f64;
    let mut prev = curve.point_at(start);
    let mut length = 0.0;
    for i in 1..=steps {
        let next = curve.point_at(start + step * i as f64);
        length += (next - prev).length();
        prev = next;
    }
    length
}
