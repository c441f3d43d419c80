//! Tick-by-tick train state and advancement.

use coaster_math::wrap::wrap_param;
use coaster_spline::arclength::{self, WALK_RESOLUTION};
use coaster_spline::Curve;
use serde::{Deserialize, Serialize};

use crate::config::{MotionConfig, Pacing};

/// Physical speed of a fresh train, track units per second at unit scale.
pub const DEFAULT_SPEED: f64 = 75.0;
/// Floor of the gravity speed model.
pub const MIN_SPEED: f64 = DEFAULT_SPEED / 2.0;
/// Ceiling of the gravity speed model.
pub const MAX_SPEED: f64 = DEFAULT_SPEED * 4.0;
/// Per-tick speed change per unit of vertical tangent.
pub const GRAVITY_FACTOR: f64 = 9.8 / 2.0;
/// Wheel radius used to convert distance into rotation.
pub const WHEEL_RADIUS: f64 = 1.0;
/// Seconds per tick.
pub const TICK: f64 = 0.02;

/// Wheel degrees per parameter unit under constant-parameter pacing, where
/// no physical distance is available.
const PARAMETER_WHEEL_RATE: f64 = 720.0;

/// Where the train is and how fast it is going.
///
/// The parameter `t` tracks the lead cart. Trailing carts are derived on
/// demand with [`TrainMotion::cart_parameters`] rather than stored, so a
/// track edit can never strand them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainMotion {
    /// Curve parameter of the lead cart.
    pub t: f64,
    /// Physical speed under the gravity model, track units per second.
    pub speed: f64,
    /// Accumulated wheel rotation in degrees. Negative while running in
    /// reverse.
    pub wheel_degrees: f64,
}

impl TrainMotion {
    pub fn new() -> Self {
        Self {
            t: 0.0,
            speed: DEFAULT_SPEED,
            wheel_degrees: 0.0,
        }
    }

    /// Advance the train by one tick along `curve`.
    pub fn advance(&mut self, curve: &dyn Curve, config: &MotionConfig) {
        match config.pacing {
            Pacing::Parameter => {
                let delta = config.direction * config.speed_scale * TICK;
                self.t = confine(self.t + delta, curve);
                self.wheel_degrees += PARAMETER_WHEEL_RATE * delta;
            }
            Pacing::ArcLength => {
                let speed = if config.physics {
                    let slope = curve.tangent_at(self.t).y;
                    self.speed =
                        (self.speed - slope * GRAVITY_FACTOR).clamp(MIN_SPEED, MAX_SPEED);
                    self.speed
                } else {
                    DEFAULT_SPEED
                };
                let target = speed * config.speed_scale * TICK * config.direction;
                let walk = arclength::advance(curve, self.t, target, WALK_RESOLUTION);
                self.t = walk.t;
                self.wheel_degrees +=
                    360.0 * walk.traveled / (std::f64::consts::TAU * WHEEL_RADIUS);
            }
        }
    }

    /// Re-wrap the parameter after the track's span count changed, so a
    /// deleted control point cannot leave the train off the end of the loop.
    pub fn rewrap(&mut self, span_count: usize) {
        self.t = wrap_param(self.t, span_count);
    }

    /// Put the train back at the loop seam at default speed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Parameters of every cart, lead cart first. Each successive cart sits
    /// `cart_spacing` of physical track behind the one ahead of it, walked
    /// against the direction of travel.
    pub fn cart_parameters(&self, curve: &dyn Curve, config: &MotionConfig) -> Vec<f64> {
        let mut parameters = Vec::with_capacity(config.cart_count);
        let mut t = self.t;
        let back = -config.direction.signum() * config.cart_spacing;
        for cart in 0..config.cart_count {
            if cart > 0 {
                t = arclength::advance(curve, t, back, WALK_RESOLUTION).t;
            }
            parameters.push(t);
        }
        parameters
    }
}

impl Default for TrainMotion {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep `t` inside the curve's domain, wrapping on closed curves and
/// clamping on open ones.
fn confine(t: f64, curve: &dyn Curve) -> f64 {
    let (t_min, t_max) = curve.domain();
    if curve.is_closed() {
        debug_assert!(t_min == 0.0, "closed track curves start their domain at 0");
        wrap_param(t, t_max as usize)
    } else {
        t.clamp(t_min, t_max)
    }
}
