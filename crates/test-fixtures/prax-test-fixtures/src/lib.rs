//! JSON fixtures shared by the integration tests.
//!
//! Every fixture is embedded at compile time, so tests never touch the
//! filesystem and an unknown name is the only way a lookup can fail.

use anyhow::{anyhow, Result};

/// A named fixture file and its embedded text.
struct Fixture {
    name: &'static str,
    text: &'static str,
}

fn find(set: &'static [Fixture], kind: &str, name: &str) -> Result<&'static str> {
    set.iter()
        .find(|f| f.name == name)
        .map(|f| f.text)
        .ok_or_else(|| anyhow!("no {kind} fixture named '{name}'"))
}

/// Measured page layouts (`LayoutSurface` JSON).
pub mod layouts {
    use anyhow::{anyhow, Context, Result};
    use serde::Deserialize;

    use prax_api_core::{ElementId, LayoutSurface};

    use super::Fixture;

    const LAYOUTS: &[Fixture] = &[
        Fixture {
            name: "home",
            text: include_str!("../../../../fixtures/layouts/home.json"),
        },
        Fixture {
            name: "single-card",
            text: include_str!("../../../../fixtures/layouts/single_card.json"),
        },
    ];

    #[derive(Deserialize)]
    struct Named {
        id: ElementId,
        #[serde(default)]
        name: Option<String>,
    }

    #[derive(Deserialize)]
    struct Names {
        elements: Vec<Named>,
    }

    pub fn json(name: &str) -> Result<&'static str> {
        super::find(LAYOUTS, "layout", name)
    }

    pub fn surface(name: &str) -> Result<LayoutSurface> {
        LayoutSurface::from_json(json(name)?)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("layout '{name}' is not a valid surface"))
    }

    /// Id of the element called `element` in layout `name`.
    pub fn element(name: &str, element: &str) -> Result<ElementId> {
        let names: Names = serde_json::from_str(json(name)?)
            .with_context(|| format!("layout '{name}' does not parse"))?;
        names
            .elements
            .into_iter()
            .find(|e| e.name.as_deref() == Some(element))
            .map(|e| e.id)
            .ok_or_else(|| anyhow!("layout '{name}' has no element '{element}'"))
    }
}

/// Serialized binding specs.
pub mod bindings {
    use anyhow::{Context, Result};
    use serde::de::DeserializeOwned;

    use super::{find, Fixture};

    const BINDINGS: &[Fixture] = &[
        Fixture {
            name: "home",
            text: include_str!("../../../../fixtures/bindings/home.json"),
        },
        Fixture {
            name: "hero-intro",
            text: include_str!("../../../../fixtures/bindings/hero_intro.json"),
        },
    ];

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = find(BINDINGS, "binding", name)?;
        serde_json::from_str(text)
            .with_context(|| format!("binding fixture '{name}' does not parse"))
    }
}
