//! Pages: ordered section lists mounted and unmounted as a unit.

use anyhow::{bail, Result};

use prax_api_core::Surface;
use prax_motion_core::{MotionEngine, Scope};

use crate::refs::ElementRefs;
use crate::section::{Section, SectionKind};

const PROGRESS: Section = Section::new("progress", SectionKind::Progress);
const FOOTER: Section = Section::new("footer", SectionKind::Footer);
const CTA: Section = Section::new("cta", SectionKind::Cta);

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub name: &'static str,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn home() -> Self {
        Self {
            name: "home",
            sections: vec![
                Section::new("hero", SectionKind::Hero),
                Section::new("intro", SectionKind::Story),
                Section::new("grid", SectionKind::Grid),
                Section::new("portfolio", SectionKind::Gallery),
                Section::new("marquee", SectionKind::Marquee),
                Section::new("book", SectionKind::Cta),
                PROGRESS,
                FOOTER,
            ],
        }
    }

    pub fn about() -> Self {
        Self {
            name: "about",
            sections: vec![
                Section::new("about-hero", SectionKind::PageHero),
                Section::new("origin", SectionKind::Story),
                Section::new("values", SectionKind::Grid),
                Section::new("studio", SectionKind::Parallax { speed: 0.8 }),
                CTA,
                PROGRESS,
                FOOTER,
            ],
        }
    }

    pub fn services() -> Self {
        Self {
            name: "services",
            sections: vec![
                Section::new("services-hero", SectionKind::PageHero),
                Section::new("tiers", SectionKind::Grid),
                Section::new("honesty", SectionKind::Story),
                Section::new("differentiation", SectionKind::Story),
                Section::new("experience", SectionKind::Grid),
                Section::new("gallery", SectionKind::Gallery),
                CTA,
                PROGRESS,
                FOOTER,
            ],
        }
    }

    pub fn team() -> Self {
        Self {
            name: "team",
            sections: vec![
                Section::new("team-hero", SectionKind::PageHero),
                Section::new("team", SectionKind::Grid),
                Section::new("team-values", SectionKind::Story),
                CTA,
                PROGRESS,
                FOOTER,
            ],
        }
    }

    pub fn academy() -> Self {
        Self {
            name: "academy",
            sections: vec![
                Section::new("academy-hero", SectionKind::PageHero),
                Section::new("programs", SectionKind::Grid),
                Section::new("philosophy", SectionKind::Story),
                CTA,
                PROGRESS,
                FOOTER,
            ],
        }
    }

    /// Page for a route path such as `"/"` or `"/team"`.
    pub fn for_route(route: &str) -> Result<Self> {
        let path = route.split(['#', '?']).next().unwrap_or_default();
        Ok(match path.trim_end_matches('/') {
            "" => Self::home(),
            "/about" => Self::about(),
            "/services" => Self::services(),
            "/team" => Self::team(),
            "/academy" => Self::academy(),
            other => bail!("no page for route '{other}'"),
        })
    }

    /// Mount every section in order.
    pub fn mount(&self, engine: &MotionEngine, surface: &dyn Surface, refs: &ElementRefs) -> MountedPage {
        let scopes = self
            .sections
            .iter()
            .map(|s| s.mount(engine, surface, refs))
            .collect::<Vec<_>>();
        log::debug!(
            "page '{}' mounted: {} bindings in {} sections",
            self.name,
            scopes.iter().map(Scope::live_bindings).sum::<usize>(),
            scopes.len()
        );
        MountedPage {
            name: self.name,
            scopes,
        }
    }
}

/// A page whose sections are bound. Unmounting reverts sections last to first.
pub struct MountedPage {
    name: &'static str,
    scopes: Vec<Scope>,
}

impl MountedPage {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn live_bindings(&self) -> usize {
        self.scopes.iter().map(Scope::live_bindings).sum()
    }

    pub fn section_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn unmount(&mut self) {
        while let Some(mut scope) = self.scopes.pop() {
            scope.revert();
        }
    }
}

impl Drop for MountedPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve() {
        assert_eq!(Page::for_route("/").unwrap().name, "home");
        assert_eq!(Page::for_route("").unwrap().name, "home");
        assert_eq!(Page::for_route("/team/").unwrap().name, "team");
        assert_eq!(Page::for_route("/about#studio").unwrap().name, "about");
        let err = Page::for_route("/blog").unwrap_err();
        assert!(err.to_string().contains("/blog"));
    }

    #[test]
    fn every_page_ends_with_progress_and_footer() {
        for page in [Page::home(), Page::about(), Page::services(), Page::team(), Page::academy()] {
            let n = page.sections.len();
            assert_eq!(page.sections[n - 2], PROGRESS);
            assert_eq!(page.sections[n - 1], FOOTER);
        }
    }
}
