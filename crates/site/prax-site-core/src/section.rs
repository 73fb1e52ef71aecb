//! Section bindings.
//!
//! A section knows which named refs it animates and how. Refs are looked up
//! under the section's name (`"{name}-heading"`, `"{name}-item-0"`, ...);
//! anything the host did not register is skipped. Mounting binds every
//! animation into one [`Scope`] that the page reverts on unmount.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, Surface};
use prax_motion_core::primitives::{
    stagger, ClipConfig, MagneticConfig, MarqueeConfig, PinConfig, RevealConfig,
    ScaleRevealConfig, ScrubConfig, ScrubRange, StepPosition, StepTween, TimelineSpec,
    TimelineStep,
};
use prax_motion_core::{
    Anchor, BindingSpec, Ease, MotionConfig, MotionEngine, PropTween, Scope, TriggerConfig,
    TriggerEnd, TriggerPoint,
};

use crate::refs::ElementRefs;

/// How far the hero video zooms while the hero scrolls away.
pub const HERO_VIDEO_SCALE: f32 = 1.15;
/// Parallax speed of the hero watermark layer.
pub const HERO_WATERMARK_SPEED: f32 = 0.6;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionKind {
    /// Home hero: timed title entrance, video zoom, content fade-out.
    Hero,
    /// Inner-page hero: heading entrance and an image drifting behind it.
    PageHero,
    /// Heading and body reveal, clipped image, scale-in divider.
    Story,
    /// Card grid revealed in document order.
    Grid,
    /// Pinned horizontal gallery.
    Gallery,
    /// Endless text band.
    Marquee,
    /// Image drifting inside its frame.
    Parallax { speed: f32 },
    /// Heading, divider and a magnetic booking button.
    Cta,
    /// Page scroll progress bar.
    Progress,
    Footer,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Section {
    pub name: &'static str,
    pub kind: SectionKind,
}

impl Section {
    pub const fn new(name: &'static str, kind: SectionKind) -> Self {
        Self { name, kind }
    }

    fn part(&self, refs: &ElementRefs, part: &str) -> Option<ElementId> {
        refs.get(&format!("{}-{part}", self.name))
    }

    fn items(&self, refs: &ElementRefs, part: &str) -> Vec<ElementId> {
        refs.series(&format!("{}-{part}", self.name))
    }

    /// Binding specs for the refs that are registered, in mount order,
    /// timed by the engine's motion tokens.
    pub fn bindings(&self, refs: &ElementRefs, tokens: &MotionConfig) -> Vec<BindingSpec> {
        let mut out = Vec::new();
        match self.kind {
            SectionKind::Hero => self.hero(refs, &mut out),
            SectionKind::PageHero => {
                let heading: Vec<_> = self.part(refs, "heading").into_iter().collect();
                if !heading.is_empty() {
                    out.push(BindingSpec::Reveal {
                        targets: heading,
                        config: RevealConfig::fade_up_with(tokens)
                            .with_trigger(None)
                            .with_delay(0.3),
                    });
                }
                if let (Some(image), Some(frame)) = (self.part(refs, "image"), refs.get(self.name)) {
                    out.push(BindingSpec::Scrub(ScrubConfig::parallax(image, frame, 0.8)));
                }
            }
            SectionKind::Story => {
                let text: Vec<_> = ["heading", "body"]
                    .iter()
                    .filter_map(|p| self.part(refs, p))
                    .collect();
                if !text.is_empty() {
                    out.push(BindingSpec::Reveal {
                        targets: text,
                        config: RevealConfig::fade_up_with(tokens),
                    });
                }
                if let Some(image) = self.part(refs, "image") {
                    out.push(BindingSpec::Clip {
                        target: image,
                        config: ClipConfig::with_tokens(tokens),
                    });
                }
                if let Some(divider) = self.part(refs, "divider") {
                    out.push(BindingSpec::ScaleReveal {
                        targets: vec![divider],
                        config: ScaleRevealConfig::with_tokens(tokens),
                    });
                }
            }
            SectionKind::Grid => {
                let items = self.items(refs, "item");
                if let (Some(container), false) = (refs.get(self.name), items.is_empty()) {
                    let (reveal, stagger) = stagger::grid_reveal(container, tokens);
                    out.push(BindingSpec::Stagger {
                        items,
                        reveal,
                        stagger,
                    });
                }
            }
            SectionKind::Gallery => {
                if let (Some(container), Some(track)) =
                    (refs.get(self.name), self.part(refs, "track"))
                {
                    out.push(BindingSpec::Pin(PinConfig::new(
                        container,
                        track,
                        self.items(refs, "item"),
                    )));
                }
            }
            SectionKind::Marquee => {
                if let Some(track) = self.part(refs, "track") {
                    out.push(BindingSpec::Marquee {
                        track,
                        config: MarqueeConfig::default(),
                    });
                }
            }
            SectionKind::Parallax { speed } => {
                if let (Some(image), Some(frame)) = (self.part(refs, "image"), refs.get(self.name)) {
                    out.push(BindingSpec::Scrub(ScrubConfig::parallax_image(
                        image, frame, speed, 0.0,
                    )));
                }
            }
            SectionKind::Cta => {
                if let Some(heading) = self.part(refs, "heading") {
                    out.push(BindingSpec::Reveal {
                        targets: vec![heading],
                        config: RevealConfig::fade_up_with(tokens),
                    });
                }
                if let Some(divider) = self.part(refs, "divider") {
                    out.push(BindingSpec::ScaleReveal {
                        targets: vec![divider],
                        config: ScaleRevealConfig::with_tokens(tokens),
                    });
                }
                if let Some(button) = self.part(refs, "button") {
                    out.push(BindingSpec::Magnetic {
                        target: button,
                        config: MagneticConfig::default(),
                    });
                }
            }
            SectionKind::Progress => {
                if let Some(bar) = self.part(refs, "bar") {
                    out.push(BindingSpec::Scrub(ScrubConfig::progress_bar(bar)));
                }
            }
            SectionKind::Footer => {
                if let Some(footer) = refs.get(self.name) {
                    let config = RevealConfig {
                        y: 40.0,
                        duration: 0.8,
                        trigger: Some(TriggerConfig::at(TriggerPoint::top_at(90.0)).on(footer)),
                        ..RevealConfig::fade_up_with(tokens)
                    };
                    out.push(BindingSpec::Reveal {
                        targets: vec![footer],
                        config,
                    });
                }
            }
        }
        out
    }

    fn hero(&self, refs: &ElementRefs, out: &mut Vec<BindingSpec>) {
        let intro = hero_intro(
            &self.items(refs, "title-char"),
            self.part(refs, "subtitle"),
            &[self.part(refs, "indicator"), self.part(refs, "cta")]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
        );
        if !intro.steps.is_empty() {
            out.push(BindingSpec::Timeline(intro));
        }
        if let Some(video) = self.part(refs, "video") {
            out.push(BindingSpec::Scrub(ScrubConfig::hero_scale(
                video,
                HERO_VIDEO_SCALE,
            )));
        }
        if let (Some(watermark), Some(hero)) = (self.part(refs, "watermark"), refs.get(self.name)) {
            out.extend(
                ScrubConfig::layers(hero, &[(watermark, HERO_WATERMARK_SPEED)])
                    .into_iter()
                    .map(BindingSpec::Scrub),
            );
        }
        if let (Some(content), Some(hero)) = (self.part(refs, "content"), refs.get(self.name)) {
            out.push(BindingSpec::Scrub(ScrubConfig {
                target: content,
                tweens: vec![
                    PropTween::float(Property::Opacity, 1.0, 0.0),
                    PropTween::float(Property::TranslateY, 0.0, -50.0),
                ],
                range: ScrubRange::Trigger {
                    element: hero,
                    start: TriggerPoint::TOP_TOP,
                    end: TriggerEnd::Point(TriggerPoint::new(Anchor::Percent(60.0), Anchor::Start)),
                },
                ease: Ease::Linear,
            }));
        }
    }

    /// Bind everything this section animates.
    pub fn mount(&self, engine: &MotionEngine, surface: &dyn Surface, refs: &ElementRefs) -> Scope {
        let mut scope = Scope::new(self.name);
        let specs = self.bindings(refs, &engine.config());
        if specs.is_empty() {
            log::debug!("section '{}': no refs registered, nothing to bind", self.name);
        }
        for spec in specs {
            scope.add(spec.bind(engine, surface));
        }
        scope
    }
}

/// Hero entrance: title characters rise in, then the tagline and the rest.
pub fn hero_intro(chars: &[ElementId], tagline: Option<ElementId>, rest: &[ElementId]) -> TimelineSpec {
    let mut spec = TimelineSpec::new(Vec::new()).delay(0.5);
    if !chars.is_empty() {
        spec = spec.then(
            TimelineStep::new(
                chars.to_vec(),
                vec![
                    StepTween::float(Property::Opacity, 0.0, 1.0),
                    StepTween::float(Property::TranslateY, 80.0, 0.0),
                ],
                0.8,
            )
            .ease(Ease::Power3Out)
            .stagger(0.04),
        );
    }
    if let Some(tagline) = tagline {
        spec = spec.then(
            TimelineStep::new(
                vec![tagline],
                vec![
                    StepTween::float(Property::Opacity, 0.0, 1.0),
                    StepTween::float(Property::TranslateY, 30.0, 0.0),
                ],
                0.6,
            )
            .ease(Ease::Power3Out)
            .at(StepPosition::Overlap(0.4)),
        );
    }
    if !rest.is_empty() {
        spec = spec.then(
            TimelineStep::new(
                rest.to_vec(),
                vec![StepTween::float(Property::Opacity, 0.0, 1.0)],
                0.6,
            )
            .ease(Ease::Power3Out)
            .at(StepPosition::Overlap(0.2)),
        );
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[(&str, u32)]) -> ElementRefs {
        let mut r = ElementRefs::new();
        for (n, id) in names {
            r.register(*n, ElementId(*id));
        }
        r
    }

    #[test]
    fn story_binds_what_is_registered() {
        let s = Section::new("intro", SectionKind::Story);
        let specs = s.bindings(
            &refs(&[("intro-heading", 1), ("intro-image", 2)]),
            &MotionConfig::default(),
        );
        let kinds: Vec<_> = specs.iter().map(BindingSpec::kind).collect();
        assert_eq!(kinds, vec!["reveal", "clip"]);
        assert!(s
            .bindings(&ElementRefs::new(), &MotionConfig::default())
            .is_empty());
    }

    #[test]
    fn hero_intro_timing() {
        let chars = [ElementId(1), ElementId(2), ElementId(3)];
        let tl = hero_intro(&chars, Some(ElementId(4)), &[ElementId(5)]).resolve();
        // chars 0.5..1.38, tagline 0.98..1.58, rest 1.38..1.98
        assert!((tl.total_duration() - 1.98).abs() < 1e-5);
    }

    #[test]
    fn hero_watermark_drifts_behind_the_content() {
        let s = Section::new("hero", SectionKind::Hero);
        let specs = s.bindings(
            &refs(&[("hero", 1), ("hero-watermark", 2), ("hero-content", 3)]),
            &MotionConfig::default(),
        );
        let kinds: Vec<_> = specs.iter().map(BindingSpec::kind).collect();
        assert_eq!(kinds, vec!["scrub", "scrub"]);
        let BindingSpec::Scrub(layer) = &specs[0] else {
            panic!("scrub");
        };
        assert_eq!(layer.target, ElementId(2));
    }

    #[test]
    fn grid_needs_container_and_items() {
        let s = Section::new("grid", SectionKind::Grid);
        assert!(s
            .bindings(&refs(&[("grid-item-0", 2)]), &MotionConfig::default())
            .is_empty());
        let specs = s.bindings(
            &refs(&[("grid", 1), ("grid-item-0", 2), ("grid-item-1", 3)]),
            &MotionConfig::default(),
        );
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].kind(), "stagger");
    }

    #[test]
    fn reveal_start_token_moves_story_triggers() {
        let tokens = MotionConfig {
            reveal_start: TriggerPoint::top_at(60.0),
            media_start: TriggerPoint::top_at(70.0),
            ..MotionConfig::default()
        };
        let s = Section::new("intro", SectionKind::Story);
        let specs = s.bindings(&refs(&[("intro-heading", 1), ("intro-image", 2)]), &tokens);
        let BindingSpec::Reveal { config, .. } = &specs[0] else {
            panic!("reveal");
        };
        assert_eq!(config.trigger.map(|t| t.start), Some(TriggerPoint::top_at(60.0)));
        let BindingSpec::Clip { config, .. } = &specs[1] else {
            panic!("clip");
        };
        assert_eq!(config.trigger.map(|t| t.start), Some(TriggerPoint::top_at(70.0)));
        assert_eq!(config.duration, tokens.durations.slowest);
    }
}
