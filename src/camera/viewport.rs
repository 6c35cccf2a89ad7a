use crate::{
    camera::state::CameraState,
    foundation::core::{Affine, Rect, Size},
};

/// Screen mapping of one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// SVG user space to viewport pixels.
    pub affine: Affine,
    /// Clip rectangle in SVG user units, if clipping is enabled.
    pub clip: Option<Rect>,
}

/// Live cameras of every layer plus the viewport size.
#[derive(Clone, Debug)]
pub struct Viewport {
    size: Size,
    cameras: Vec<CameraState>,
}

impl Viewport {
    /// Viewport of `size` pixels with `layer_count` default cameras.
    pub fn new(size: Size, layer_count: usize) -> Self {
        Self {
            size,
            cameras: vec![CameraState::default(); layer_count],
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Change the size and re-fit every camera that carries a reference element.
    ///
    /// Returns how many cameras were re-fitted.
    pub fn resize(&mut self, size: Size) -> usize {
        self.size = size;
        let refitted = self
            .cameras
            .iter_mut()
            .map(|cam| cam.refit(size))
            .filter(|done| *done)
            .count();
        tracing::debug!(
            width = size.width,
            height = size.height,
            refitted,
            "viewport resized"
        );
        refitted
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.cameras.len()
    }

    /// Camera of `layer`.
    pub fn camera(&self, layer: usize) -> Option<&CameraState> {
        self.cameras.get(layer)
    }

    /// Mutable camera of `layer`, for interactive operations.
    pub fn camera_mut(&mut self, layer: usize) -> Option<&mut CameraState> {
        self.cameras.get_mut(layer)
    }

    /// All cameras, in layer order.
    pub fn cameras(&self) -> &[CameraState] {
        &self.cameras
    }

    /// Replace the camera of `layer`. Out-of-range layers are ignored.
    pub fn set_camera(&mut self, layer: usize, camera: CameraState) {
        if let Some(slot) = self.cameras.get_mut(layer) {
            *slot = camera;
        }
    }

    /// Screen mapping of `layer`.
    pub fn transform(&self, layer: usize) -> Option<ViewTransform> {
        self.cameras.get(layer).map(|cam| ViewTransform {
            affine: cam.to_affine(self.size),
            clip: cam.clip,
        })
    }
}
