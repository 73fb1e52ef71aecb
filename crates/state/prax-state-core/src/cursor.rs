//! Custom cursor state.
//!
//! Any interactive element may write the variant (last writer wins); the
//! cursor component is the only reader.

use serde::{Deserialize, Serialize};

use prax_api_core::Subscription;

use crate::store::Store;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorVariant {
    #[default]
    Default,
    Hover,
    Text,
    Hidden,
    Drag,
    View,
    Link,
    ArrowLeft,
    ArrowRight,
}

impl CursorVariant {
    /// Label shown inside the ring when the writer gave none.
    pub fn default_label(self) -> Option<&'static str> {
        match self {
            CursorVariant::View => Some("View"),
            CursorVariant::Drag => Some("Drag"),
            CursorVariant::ArrowLeft => Some("←"),
            CursorVariant::ArrowRight => Some("→"),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub variant: CursorVariant,
    pub text: String,
    pub is_visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            variant: CursorVariant::Default,
            text: String::new(),
            is_visible: true,
        }
    }
}

impl CursorState {
    /// Text to render: explicit text first, then the variant's label.
    pub fn label(&self) -> Option<&str> {
        if !self.text.is_empty() {
            Some(&self.text)
        } else {
            self.variant.default_label()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CursorStore {
    store: Store<CursorState>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CursorState {
        self.store.snapshot()
    }

    pub fn subscribe(&self, f: impl Fn(&CursorState) + 'static) -> Subscription {
        self.store.subscribe(f)
    }

    pub fn set_variant(&self, variant: CursorVariant) {
        self.store.update(|s| s.variant = variant);
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|s| s.text = text);
    }

    pub fn set_visible(&self, visible: bool) {
        self.store.update(|s| s.is_visible = visible);
    }

    /// Pointer entered an interactive element.
    pub fn enter(&self, variant: CursorVariant, text: Option<&str>) {
        self.store.update(|s| {
            s.variant = variant;
            s.text = text.unwrap_or_default().to_string();
        });
    }

    /// Pointer left an interactive element.
    pub fn reset(&self) {
        self.store.update(|s| *s = CursorState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_writer_wins_and_leave_resets() {
        let cursor = CursorStore::new();
        cursor.enter(CursorVariant::View, None);
        cursor.enter(CursorVariant::Link, Some("Book"));
        let s = cursor.snapshot();
        assert_eq!(s.variant, CursorVariant::Link);
        assert_eq!(s.label(), Some("Book"));
        cursor.reset();
        assert_eq!(cursor.snapshot(), CursorState::default());
    }

    #[test]
    fn labels_and_names() {
        let s = CursorState {
            variant: CursorVariant::ArrowRight,
            ..Default::default()
        };
        assert_eq!(s.label(), Some("→"));
        let v: CursorVariant = serde_json::from_str(r#""arrow-left""#).unwrap();
        assert_eq!(v, CursorVariant::ArrowLeft);
        assert_eq!(CursorVariant::Hover.default_label(), None);
    }
}
