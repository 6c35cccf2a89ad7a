use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::foundation::{
    core::{BezPath, Point},
    error::{SwoopError, SwoopResult},
};

/// Accuracy (in SVG user units) of arc-length computations.
const ARCLEN_ACCURACY: f64 = 1e-4;

/// SVG path data prepared for sampling by arc length.
#[derive(Clone, Debug)]
pub struct Trajectory {
    segments: Vec<PathSeg>,
    // Length from the path start to the end of each segment.
    cumulative: Vec<f64>,
}

impl Trajectory {
    /// Parse SVG path data (`d` attribute syntax).
    pub fn parse(d: &str) -> SwoopResult<Self> {
        let path = BezPath::from_svg(d.trim())
            .map_err(|e| SwoopError::validation(format!("invalid path data: {e}")))?;
        Self::from_path(&path)
    }

    /// Prepare an existing path. Fails when the path has no drawable segment.
    pub fn from_path(path: &BezPath) -> SwoopResult<Self> {
        let segments: Vec<PathSeg> = path.segments().collect();
        if segments.is_empty() {
            return Err(SwoopError::validation("path has no segments"));
        }
        let mut total = 0.0;
        let cumulative = segments
            .iter()
            .map(|seg| {
                total += seg.arclen(ARCLEN_ACCURACY);
                total
            })
            .collect();
        Ok(Self {
            segments,
            cumulative,
        })
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// First point of the path.
    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    /// Last point of the path.
    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Point at arc length `s` from the start, clamped to the path.
    pub fn point_at_length(&self, s: f64) -> Point {
        if !(s > 0.0) {
            return self.start();
        }
        if s >= self.length() {
            return self.end();
        }
        let idx = self
            .cumulative
            .partition_point(|&c| c < s)
            .min(self.segments.len() - 1);
        let seg_start = if idx == 0 { 0.0 } else { self.cumulative[idx - 1] };
        let seg = &self.segments[idx];
        let seg_len = self.cumulative[idx] - seg_start;
        if seg_len <= 0.0 {
            return seg.start();
        }
        let t = seg.inv_arclen(s - seg_start, ARCLEN_ACCURACY);
        seg.eval(t)
    }

    /// Point at `fraction` of the total length.
    pub fn point_at(&self, fraction: f64) -> Point {
        self.point_at_length(fraction * self.length())
    }
}
