use std::{collections::HashSet, fs, path::Path};

use anyhow::Context;

use crate::{
    animation::{animator::DEFAULT_DURATION_MS, timing::TimingFunction},
    camera::{state::CameraState, trajectory::Trajectory},
    foundation::{
        core::Size,
        error::{SwoopError, SwoopResult},
    },
    presentation::svg::SvgDocument,
};

/// A frame-based presentation over one SVG drawing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Presentation {
    /// Layers, in drawing order.
    pub layers: Vec<LayerInfo>,
    /// Frames, in presentation order.
    pub frames: Vec<Frame>,
}

/// One independently animated group of the drawing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerInfo {
    /// Unique layer id.
    pub id: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One stop of the presentation: a camera per layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Unique frame id.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Auto-advance delay while playing; `None` holds the frame until navigated away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<f64>,
    /// One entry per presentation layer, in layer order.
    pub layers: Vec<LayerFrame>,
}

/// Camera and incoming transition of one layer in one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerFrame {
    /// Camera shown when the frame is reached.
    pub camera: CameraState,
    /// SVG element id the camera is fitted to when a document is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_to: Option<String>,
    /// Transition used when moving into this frame.
    #[serde(default)]
    pub transition: TransitionParams,
}

impl LayerFrame {
    /// Entry showing `camera`, entered with the default transition.
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            fit_to: None,
            transition: TransitionParams::default(),
        }
    }

    /// Fit the camera to an SVG element when references are resolved.
    pub fn fit_to(mut self, element_id: impl Into<String>) -> Self {
        self.fit_to = Some(element_id.into());
        self
    }

    /// Replace the incoming transition.
    pub fn transition(mut self, transition: TransitionParams) -> Self {
        self.transition = transition;
        self
    }
}

/// How a layer moves into a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionParams {
    /// Duration in milliseconds. Invalid values fall back to 500 ms at playback time.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Registry name or CSS-style expression, see [`TimingFunction::parse`].
    #[serde(default = "default_timing_function")]
    pub timing_function: String,
    /// Signed zoom overshoot in percent at the middle of the move.
    #[serde(default)]
    pub relative_zoom: f64,
    /// SVG path data the camera center follows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn default_duration_ms() -> f64 {
    DEFAULT_DURATION_MS
}

fn default_timing_function() -> String {
    "linear".to_string()
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            timing_function: default_timing_function(),
            relative_zoom: 0.0,
            path: None,
        }
    }
}

impl TransitionParams {
    /// Timing function for this move, reversed when playing backward.
    pub fn timing(&self, reverse: bool) -> TimingFunction {
        TimingFunction::resolve(Some(&self.timing_function)).directed(reverse)
    }

    /// Parsed path, if any.
    pub fn trajectory(&self) -> SwoopResult<Option<Trajectory>> {
        self.path.as_deref().map(Trajectory::parse).transpose()
    }
}

impl Presentation {
    /// Parse and validate a presentation document.
    pub fn from_json(json: &str) -> SwoopResult<Self> {
        let p: Self = serde_json::from_str(json)?;
        p.validate()?;
        Ok(p)
    }

    /// Parse and validate a presentation document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> SwoopResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("read presentation '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> SwoopResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Index of the frame with `id`.
    pub fn frame_index(&self, id: &str) -> Option<usize> {
        self.frames.iter().position(|f| f.id == id)
    }

    /// Check structural consistency. Unknown timing function names are not errors.
    pub fn validate(&self) -> SwoopResult<()> {
        if self.layers.is_empty() {
            return Err(SwoopError::validation("presentation has no layers"));
        }
        if self.frames.is_empty() {
            return Err(SwoopError::validation("presentation has no frames"));
        }

        let mut layer_ids = HashSet::new();
        for layer in &self.layers {
            if !layer_ids.insert(layer.id.as_str()) {
                return Err(SwoopError::validation(format!(
                    "duplicate layer id '{}'",
                    layer.id
                )));
            }
        }

        let mut frame_ids = HashSet::new();
        for frame in &self.frames {
            if !frame_ids.insert(frame.id.as_str()) {
                return Err(SwoopError::validation(format!(
                    "duplicate frame id '{}'",
                    frame.id
                )));
            }
            if frame.layers.len() != self.layers.len() {
                return Err(SwoopError::validation(format!(
                    "frame '{}' has {} layers, presentation has {}",
                    frame.id,
                    frame.layers.len(),
                    self.layers.len()
                )));
            }
            if let Some(t) = frame.timeout_ms
                && !(t.is_finite() && t >= 0.0)
            {
                return Err(SwoopError::validation(format!(
                    "frame '{}' has invalid timeout {t}",
                    frame.id
                )));
            }
            for (lf, layer) in frame.layers.iter().zip(&self.layers) {
                lf.validate().map_err(|e| {
                    SwoopError::validation(format!(
                        "frame '{}', layer '{}': {}",
                        frame.id,
                        layer.id,
                        strip_prefix(&e)
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Fit every camera with a `fit_to` element to that element's bounds in `svg`.
    ///
    /// Returns the number of cameras fitted.
    pub fn fit_references(&mut self, svg: &SvgDocument, viewport: Size) -> SwoopResult<usize> {
        let mut fitted = 0;
        for frame in &mut self.frames {
            for lf in &mut frame.layers {
                let Some(id) = lf.fit_to.as_deref() else {
                    continue;
                };
                let bbox = svg.element_bounds(id).ok_or_else(|| {
                    SwoopError::svg(format!(
                        "frame '{}' references missing element '{id}'",
                        frame.id
                    ))
                })?;
                lf.camera.fit(bbox, viewport, id);
                fitted += 1;
            }
        }
        tracing::debug!(fitted, "fitted cameras to svg elements");
        Ok(fitted)
    }
}

impl LayerFrame {
    fn validate(&self) -> SwoopResult<()> {
        if !self.camera.has_valid_scale() {
            return Err(SwoopError::validation(format!(
                "camera scale must be finite and > 0, got ({}, {})",
                self.camera.scale.x, self.camera.scale.y
            )));
        }
        if !(self.camera.center.x.is_finite() && self.camera.center.y.is_finite()) {
            return Err(SwoopError::validation("camera center must be finite"));
        }
        if !self.transition.relative_zoom.is_finite() {
            return Err(SwoopError::validation("relative_zoom must be finite"));
        }
        self.transition.trajectory()?;
        Ok(())
    }
}

fn strip_prefix(e: &SwoopError) -> String {
    match e {
        SwoopError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/model.rs"]
mod tests;
