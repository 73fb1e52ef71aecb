//! Rendering-surface abstraction.
//!
//! A `Surface` answers layout questions for element ids. Elements that are
//! not attached yet return `None`; callers treat that as "nothing to do".

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ElementId, Rect, Viewport};

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("layout json parse error: {0}")]
    Parse(String),
    #[error("element {0:?} has a non-finite or negative rect")]
    InvalidRect(ElementId),
}

pub trait Surface {
    /// Layout box of an attached element, or `None` when it is not rendered.
    fn rect(&self, id: ElementId) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
    fn document_height(&self) -> f32;

    /// Maximum scroll offset for this layout.
    fn scroll_limit(&self) -> f32 {
        (self.document_height() - self.viewport().height).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ElementEntry {
    id: ElementId,
    rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutJson {
    #[serde(default)]
    viewport: Viewport,
    document_height: f32,
    #[serde(default)]
    elements: Vec<ElementEntry>,
}

/// In-memory layout table. Used by tests, fixtures and the wasm bridge,
/// where the host pushes measured rects before each refresh.
#[derive(Debug, Clone, Default)]
pub struct LayoutSurface {
    viewport: Viewport,
    document_height: f32,
    rects: HashMap<ElementId, Rect>,
}

impl LayoutSurface {
    pub fn new(viewport: Viewport, document_height: f32) -> Self {
        Self {
            viewport,
            document_height,
            rects: HashMap::new(),
        }
    }

    /// Parse `{ "viewport": {...}, "document_height": n, "elements": [{ "id": n, "rect": {...} }] }`.
    pub fn from_json(text: &str) -> Result<Self, SurfaceError> {
        let raw: LayoutJson =
            serde_json::from_str(text).map_err(|e| SurfaceError::Parse(e.to_string()))?;
        let mut out = LayoutSurface::new(raw.viewport, raw.document_height);
        for entry in raw.elements {
            out.attach(entry.id, entry.rect)?;
        }
        Ok(out)
    }

    /// Attach (or re-measure) an element.
    pub fn attach(&mut self, id: ElementId, rect: Rect) -> Result<(), SurfaceError> {
        if !rect.is_valid() {
            return Err(SurfaceError::InvalidRect(id));
        }
        self.rects.insert(id, rect);
        Ok(())
    }

    pub fn detach(&mut self, id: ElementId) -> Option<Rect> {
        self.rects.remove(&id)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_document_height(&mut self, height: f32) {
        self.document_height = height.max(0.0);
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        self.rects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Surface for LayoutSurface {
    fn rect(&self, id: ElementId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn document_height(&self) -> f32 {
        self.document_height
    }
}
