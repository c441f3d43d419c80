//! Per-tick motion settings.

use coaster_spline::SplineKind;
use serde::{Deserialize, Serialize};

/// How the train is paced along the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pacing {
    /// Constant parameter rate. The train covers equal parameter per tick,
    /// so its physical speed varies with control point spacing.
    Parameter,
    /// Constant physical rate. The train covers equal track distance per
    /// tick, found by walking the curve by arc length.
    #[default]
    ArcLength,
}

/// Settings the caller rebuilds from its widgets every tick. The motion
/// state itself keeps none of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Spline basis the track is evaluated with.
    pub kind: SplineKind,
    pub pacing: Pacing,
    /// Apply the gravity speed model on top of arc-length pacing.
    pub physics: bool,
    /// Speed multiplier from the UI slider.
    pub speed_scale: f64,
    /// +1.0 to run forward, -1.0 to run in reverse.
    pub direction: f64,
    /// Carts in the train, including the lead cart.
    pub cart_count: usize,
    /// Track distance between successive carts.
    pub cart_spacing: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            kind: SplineKind::default(),
            pacing: Pacing::default(),
            physics: true,
            speed_scale: 2.0,
            direction: 1.0,
            cart_count: 5,
            cart_spacing: 17.0,
        }
    }
}
