use std::{fs, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::{Rect, Size},
    error::{SwoopError, SwoopResult},
};

/// Parsed SVG drawing used to resolve camera reference elements.
pub struct SvgDocument {
    tree: usvg::Tree,
}

impl SvgDocument {
    /// Parse an SVG document from bytes.
    pub fn from_data(bytes: &[u8]) -> SwoopResult<Self> {
        let mut opts = usvg::Options::default();
        opts.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| SwoopError::svg(format!("parse svg tree: {e}")))?;
        Ok(Self { tree })
    }

    /// Read and parse an SVG file.
    pub fn from_path(path: impl AsRef<Path>) -> SwoopResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_data(&bytes)
    }

    /// Intrinsic document size in SVG user units.
    pub fn size(&self) -> Size {
        let size = self.tree.size();
        Size::new(f64::from(size.width()), f64::from(size.height()))
    }

    /// Bounding box of the element with `id`, in document coordinates.
    ///
    /// `None` when no rendered element carries that id.
    pub fn element_bounds(&self, id: &str) -> Option<Rect> {
        let node = self.tree.node_by_id(id)?;
        let bbox = node.abs_bounding_box();
        Some(Rect::new(
            f64::from(bbox.left()),
            f64::from(bbox.top()),
            f64::from(bbox.right()),
            f64::from(bbox.bottom()),
        ))
    }
}

impl std::fmt::Debug for SvgDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgDocument")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}
