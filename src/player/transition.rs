//! Planning of one frame-to-frame move.
//!
//! A plan freezes everything a move needs when it starts: the live cameras it leaves
//! from, the frame cameras it heads to and, per layer, the resolved transition
//! parameters. Moving backward replays the move into the frame being left in reverse,
//! so a backward plan reads its parameters from that frame and flips the timing
//! function and the path direction.

use crate::{
    animation::timing::TimingFunction,
    camera::{
        interpolate::{InterpolationParams, interpolate},
        state::CameraState,
        trajectory::Trajectory,
    },
    foundation::core::Size,
    presentation::model::Presentation,
};

/// Resolved move of one layer.
#[derive(Clone, Debug)]
pub(crate) struct LayerPlan {
    pub(crate) from: CameraState,
    pub(crate) to: CameraState,
    pub(crate) duration_ms: f64,
    pub(crate) timing: TimingFunction,
    pub(crate) relative_zoom: f64,
    pub(crate) trajectory: Option<Trajectory>,
    pub(crate) reverse_path: bool,
}

impl LayerPlan {
    /// Camera at eased progress `p`.
    pub(crate) fn camera_at(&self, p: f64) -> CameraState {
        let params = InterpolationParams {
            relative_zoom: self.relative_zoom,
            trajectory: self.trajectory.as_ref(),
            reverse_path: self.reverse_path,
            allow_overshoot: self.timing.may_overshoot(),
        };
        interpolate(&self.from, &self.to, p, &params)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TransitionPlan {
    pub(crate) from_frame: usize,
    pub(crate) to_frame: usize,
    pub(crate) backward: bool,
    pub(crate) layers: Vec<LayerPlan>,
}

impl TransitionPlan {
    /// Plan the move from the `live` cameras (shown while at `from`) to frame `to`.
    ///
    /// Both indices must be in range. Target cameras that track a reference element are
    /// re-fitted to `viewport` first.
    pub(crate) fn new(
        presentation: &Presentation,
        live: &[CameraState],
        from: usize,
        to: usize,
        viewport: Size,
        fallback_duration_ms: f64,
    ) -> Self {
        let backward = to < from;
        let source = &presentation.frames[if backward { from } else { to }];
        let target = &presentation.frames[to];

        let layers = target
            .layers
            .iter()
            .zip(&source.layers)
            .zip(live)
            .map(|((dest, src), cam)| {
                let params = &src.transition;
                let duration_ms = if params.duration_ms.is_finite() && params.duration_ms > 0.0 {
                    params.duration_ms
                } else {
                    tracing::warn!(
                        frame = %source.id,
                        duration_ms = params.duration_ms,
                        fallback_duration_ms,
                        "invalid transition duration"
                    );
                    fallback_duration_ms
                };
                let trajectory = params.trajectory().unwrap_or_else(|e| {
                    tracing::warn!(frame = %source.id, error = %e, "ignoring transition path");
                    None
                });
                let mut to = dest.camera.clone();
                to.refit(viewport);
                LayerPlan {
                    from: cam.clone(),
                    to,
                    duration_ms,
                    timing: params.timing(backward),
                    relative_zoom: params.relative_zoom,
                    trajectory,
                    reverse_path: backward,
                }
            })
            .collect();

        tracing::debug!(from, to, backward, "planned transition");
        Self {
            from_frame: from,
            to_frame: to,
            backward,
            layers,
        }
    }

    /// The common duration when every layer moves for the same time.
    pub(crate) fn shared_duration_ms(&self) -> Option<f64> {
        let first = self.layers.first()?.duration_ms;
        self.layers
            .iter()
            .all(|l| l.duration_ms == first)
            .then_some(first)
    }

    /// Cameras at per-layer eased progress.
    pub(crate) fn cameras_at(&self, progress: impl Fn(&LayerPlan) -> f64) -> Vec<CameraState> {
        self.layers.iter().map(|l| l.camera_at(progress(l))).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/transition.rs"]
mod tests;
