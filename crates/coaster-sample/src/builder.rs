//! Sample building, one control-point span at a time.

use std::sync::Mutex;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use coaster_math::frame::lateral_offset;
use coaster_spline::arclength::WALK_RESOLUTION;
use coaster_spline::Curve;

use crate::sample::{RailSample, TieSample, TrackSamples};

/// How cross-tie bars are spread along a span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TieSpacing {
    /// One tie at every rail subdivision step.
    PerSubdivision,
    /// Ties at a fixed physical interval, walked along each span. Each span
    /// restarts at its own control point so spans stay independent.
    ArcLength { spacing: f64 },
}

/// Per-frame sampling knobs, supplied by the UI layer each build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Rail polyline steps per span, independent of arc length.
    pub subdivisions_per_span: usize,
    pub tie_spacing: TieSpacing,
    /// Half the rail gauge; rails render this far either side of the center.
    pub rail_half_width: f64,
    /// Fork-join across spans instead of walking them in order.
    pub parallel: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            subdivisions_per_span: 1000,
            tie_spacing: TieSpacing::ArcLength { spacing: 7.5 },
            rail_half_width: 2.5,
            parallel: true,
        }
    }
}

/// Build one frame of rail and tie samples for the whole loop.
///
/// The parallel path forks one task per span; every task fills private
/// buffers and appends them into the shared output under a single mutex, once
/// per span. Merged span order then depends on scheduling, but the sample
/// set is identical to a sequential build, since per-span arithmetic does not
/// change.
pub fn build_samples(curve: &dyn Curve, config: &SampleConfig) -> TrackSamples {
    let (t_min, t_max) = curve.domain();
    debug_assert!(t_min == 0.0, "track curve domains start at 0");
    let spans = (t_max - t_min) as usize;

    if config.parallel {
        let merged = Mutex::new(TrackSamples::default());
        (0..spans).into_par_iter().for_each(|span| {
            let (rails, ties) = build_span(curve, config, span);
            let mut out = merged.lock().expect("sample merge mutex poisoned");
            out.rails.extend(rails);
            out.ties.extend(ties);
        });
        merged.into_inner().expect("sample merge mutex poisoned")
    } else {
        let mut out = TrackSamples::default();
        for span in 0..spans {
            let (rails, ties) = build_span(curve, config, span);
            out.rails.extend(rails);
            out.ties.extend(ties);
        }
        out
    }
}

fn build_span(
    curve: &dyn Curve,
    config: &SampleConfig,
    span: usize,
) -> (Vec<RailSample>, Vec<TieSample>) {
    let subdivisions = config.subdivisions_per_span.max(1);
    let step = 1.0 / subdivisions as f64;
    let start = span as f64;

    let mut rails = Vec::with_capacity(subdivisions);
    let mut prev = curve.point_at(start);
    for i in 1..=subdivisions {
        let t = start + i as f64 * step;
        let position = curve.point_at(t);
        // Offset from the step chord and the up hint at the step start, so a
        // step never reaches across the span seam.
        let up = curve.up_at(t - step);
        let offset = lateral_offset(position - prev, up, config.rail_half_width);
        rails.push(RailSample {
            span,
            t,
            prev,
            position,
            offset,
        });
        prev = position;
    }

    let mut ties = Vec::new();
    match config.tie_spacing {
        TieSpacing::PerSubdivision => {
            for i in 0..subdivisions {
                ties.push(tie_at(curve, span, start + i as f64 * step));
            }
        }
        TieSpacing::ArcLength { spacing } => {
            ties.push(tie_at(curve, span, start));
            let micro = 1.0 / WALK_RESOLUTION as f64;
            let mut prev = curve.point_at(start);
            let mut since_last = 0.0;
            for i in 1..=WALK_RESOLUTION {
                let t = start + i as f64 * micro;
                let next = curve.point_at(t);
                since_last += (next - prev).length();
                prev = next;
                if since_last >= spacing {
                    ties.push(tie_at(curve, span, t));
                    since_last = 0.0;
                }
            }
        }
    }

    (rails, ties)
}

fn tie_at(curve: &dyn Curve, span: usize, t: f64) -> TieSample {
    TieSample {
        span,
        t,
        position: curve.point_at(t),
        direction: curve.tangent_at(t),
        up: curve.up_at(t),
    }
}
