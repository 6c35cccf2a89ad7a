use crate::{
    foundation::error::{SwoopError, SwoopResult},
    presentation::model::{Frame, LayerFrame, LayerInfo, Presentation},
};

/// Programmatic construction of a [`Presentation`].
#[derive(Debug, Default)]
pub struct PresentationBuilder {
    layers: Vec<LayerInfo>,
    frames: Vec<Frame>,
}

impl PresentationBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a layer. Layer ids must be unique.
    pub fn layer(mut self, id: impl Into<String>) -> SwoopResult<Self> {
        let id = id.into();
        if self.layers.iter().any(|l| l.id == id) {
            return Err(SwoopError::validation(format!("duplicate layer id '{id}'")));
        }
        self.layers.push(LayerInfo { id, label: None });
        Ok(self)
    }

    /// Append a frame.
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Assemble and validate.
    pub fn build(self) -> SwoopResult<Presentation> {
        let p = Presentation {
            layers: self.layers,
            frames: self.frames,
        };
        p.validate()?;
        Ok(p)
    }
}

/// Programmatic construction of a [`Frame`].
#[derive(Debug)]
pub struct FrameBuilder {
    id: String,
    title: String,
    timeout_ms: Option<f64>,
    layers: Vec<LayerFrame>,
}

impl FrameBuilder {
    /// Frame with `id` and no layers.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            timeout_ms: None,
            layers: Vec::new(),
        }
    }

    /// Set the display title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Auto-advance after `ms` while playing.
    pub fn timeout_ms(mut self, ms: f64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Append the next layer's entry.
    pub fn layer(mut self, layer: LayerFrame) -> Self {
        self.layers.push(layer);
        self
    }

    /// Assemble the frame. An empty id is rejected.
    pub fn build(self) -> SwoopResult<Frame> {
        if self.id.trim().is_empty() {
            return Err(SwoopError::validation("frame id must be non-empty"));
        }
        Ok(Frame {
            id: self.id,
            title: self.title,
            timeout_ms: self.timeout_ms,
            layers: self.layers,
        })
    }
}
