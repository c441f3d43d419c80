use coaster_math::{Point3, Vector3};

/// One rail polyline step across a span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailSample {
    /// Span this step belongs to.
    pub span: usize,
    /// Curve parameter at the end of the step.
    pub t: f64,
    /// Centerline position at the start of the step.
    pub prev: Point3,
    /// Centerline position at the end of the step.
    pub position: Point3,
    /// Lateral half-gauge vector; the rail pair renders at `position ± offset`.
    pub offset: Vector3,
}

/// One cross-tie bar placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieSample {
    pub span: usize,
    pub t: f64,
    pub position: Point3,
    pub direction: Vector3,
    pub up: Vector3,
}

/// One frame's renderable track geometry.
///
/// Rebuilt from the control points every frame and never cached; control
/// points may have moved since the last build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSamples {
    pub rails: Vec<RailSample>,
    pub ties: Vec<TieSample>,
}

impl TrackSamples {
    pub fn rail_count(&self) -> usize {
        self.rails.len()
    }

    pub fn tie_count(&self) -> usize {
        self.ties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rails.is_empty() && self.ties.is_empty()
    }

    /// Order samples by span, then parameter. The parallel builder merges
    /// spans in completion order, so consumers that want a deterministic
    /// traversal sort first.
    pub fn sort(&mut self) {
        self.rails
            .sort_by(|a, b| a.span.cmp(&b.span).then(a.t.total_cmp(&b.t)));
        self.ties
            .sort_by(|a, b| a.span.cmp(&b.span).then(a.t.total_cmp(&b.t)));
    }
}
