//! Named element refs registered by the host.
//!
//! Sections look elements up by name (`"intro-heading"`) and numbered series
//! (`"grid-item-0"`, `"grid-item-1"`, ...). A name the host never
//! registered simply yields nothing.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

use prax_api_core::ElementId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementRefs {
    names: IndexMap<String, ElementId>,
}

#[derive(Deserialize)]
struct NamedEntry {
    id: ElementId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct NamedLayout {
    #[serde(default)]
    elements: Vec<NamedEntry>,
}

impl ElementRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the `name`d entries of a layout document.
    pub fn from_layout_json(text: &str) -> Result<Self> {
        let layout: NamedLayout =
            serde_json::from_str(text).context("element refs: layout json did not parse")?;
        let mut refs = Self::new();
        for entry in layout.elements {
            if let Some(name) = entry.name {
                refs.register(name, entry.id);
            }
        }
        Ok(refs)
    }

    pub fn register(&mut self, name: impl Into<String>, id: ElementId) -> &mut Self {
        self.names.insert(name.into(), id);
        self
    }

    pub fn unregister(&mut self, name: &str) -> Option<ElementId> {
        self.names.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// `"{prefix}-0"`, `"{prefix}-1"`, ... up to the first gap.
    pub fn series(&self, prefix: &str) -> Vec<ElementId> {
        (0..)
            .map_while(|i| self.get(&format!("{prefix}-{i}")))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_stops_at_first_gap() {
        let mut refs = ElementRefs::new();
        refs.register("card-0", ElementId(1))
            .register("card-1", ElementId(2))
            .register("card-3", ElementId(4));
        assert_eq!(refs.series("card"), vec![ElementId(1), ElementId(2)]);
        assert!(refs.series("missing").is_empty());
    }

    #[test]
    fn unnamed_elements_are_skipped() {
        let refs = ElementRefs::from_layout_json(
            r#"{ "elements": [ { "id": 1, "name": "hero" }, { "id": 2 } ] }"#,
        )
        .unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.get("hero"), Some(ElementId(1)));
        assert!(ElementRefs::from_layout_json("[").is_err());
    }
}
