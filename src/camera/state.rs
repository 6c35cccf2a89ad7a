use crate::foundation::core::{Affine, Point, Rect, Size, Vec2, normalize_degrees};

/// The SVG element a camera was last fitted to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceElement {
    /// Element id in the SVG document.
    pub id: String,
    /// Bounding box of the element in SVG user units.
    pub bbox: Rect,
}

/// Viewport over SVG user space for one layer.
///
/// Scale maps SVG user units to viewport pixels; larger is closer. Rotation is in
/// degrees, kept in `[0, 360)`. `clip == None` disables clipping.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    /// Point of SVG user space shown at the viewport center.
    pub center: Point,
    /// Horizontal and vertical scale factors, strictly positive.
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Clip rectangle in SVG user units.
    #[serde(default)]
    pub clip: Option<Rect>,
    /// Element the camera was last fitted to, used to re-fit on resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceElement>,
}

fn unit_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            center: Point::ORIGIN,
            scale: unit_scale(),
            rotation: 0.0,
            clip: None,
            reference: None,
        }
    }
}

impl CameraState {
    /// Camera centered on `center` with uniform `scale`.
    pub fn new(center: Point, scale: f64) -> Self {
        Self {
            center,
            scale: Vec2::new(scale, scale),
            ..Self::default()
        }
    }

    /// Set the rotation, normalized to `[0, 360)`.
    pub fn with_rotation(mut self, deg: f64) -> Self {
        self.rotation = normalize_degrees(deg);
        self
    }

    /// Enable clipping to `clip`.
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Whether both scale factors are finite and strictly positive.
    pub fn has_valid_scale(&self) -> bool {
        [self.scale.x, self.scale.y]
            .iter()
            .all(|s| s.is_finite() && *s > 0.0)
    }

    /// Fit the camera to `bbox` inside a viewport of `viewport` pixels.
    ///
    /// Centers on the box, picks the largest uniform scale showing all of it, resets the
    /// rotation and records `id` as the reference element. Clipping is kept.
    pub fn fit(&mut self, bbox: Rect, viewport: Size, id: impl Into<String>) {
        self.center = bbox.center();
        self.rotation = 0.0;
        if let Some(s) = fit_scale(bbox.size(), viewport) {
            self.scale = Vec2::new(s, s);
        }
        self.reference = Some(ReferenceElement {
            id: id.into(),
            bbox,
        });
    }

    /// Re-fit to the reference element after a viewport resize, keeping rotation.
    ///
    /// Returns `false` when the camera has no reference.
    pub fn refit(&mut self, viewport: Size) -> bool {
        let Some(reference) = self.reference.as_ref() else {
            return false;
        };
        let bbox = reference.bbox;
        self.center = bbox.center();
        if let Some(s) = fit_scale(bbox.size(), viewport) {
            self.scale = Vec2::new(s, s);
        }
        true
    }

    /// Zoom by `factor` keeping the SVG point `anchor` fixed on screen.
    ///
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.center = anchor + (self.center - anchor) / factor;
        self.scale *= factor;
        self.reference = None;
    }

    /// Rotate by `deg` degrees around the center.
    pub fn rotate(&mut self, deg: f64) {
        self.rotation = normalize_degrees(self.rotation + deg);
        self.reference = None;
    }

    /// Move the center by `delta` SVG user units.
    pub fn pan(&mut self, delta: Vec2) {
        self.center += delta;
        self.reference = None;
    }

    /// Transform from SVG user space to viewport pixels.
    ///
    /// `T(viewport center) * R(-rotation) * S(scale) * T(-center)`
    pub fn to_affine(&self, viewport: Size) -> Affine {
        let to_screen = Affine::translate(Vec2::new(viewport.width / 2.0, viewport.height / 2.0));
        let rotate = Affine::rotate(-self.rotation.to_radians());
        let scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);
        let from_center = Affine::translate(-self.center.to_vec2());
        to_screen * rotate * scale * from_center
    }
}

fn fit_scale(content: Size, viewport: Size) -> Option<f64> {
    let candidates = [
        viewport.width / content.width,
        viewport.height / content.height,
    ];
    candidates
        .into_iter()
        .filter(|s| s.is_finite() && *s > 0.0)
        .reduce(f64::min)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/state.rs"]
mod tests;
