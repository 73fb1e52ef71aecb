//! Animation primitives.
//!
//! Each primitive module exposes a config type, a pure sampler over time or
//! scroll offset, and a `bind` function that registers it on a
//! [`MotionEngine`](crate::MotionEngine). [`BindingSpec`] is the serialized
//! form used by hosts that describe bindings as JSON.

pub mod clip;
pub mod magnetic;
pub mod marquee;
pub mod pin;
pub mod reveal;
pub mod scrub;
pub mod stagger;
pub mod timeline;
pub(crate) mod triggered;
pub mod yoyo;

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Surface};

use crate::binding::BindingHandle;
use crate::engine::MotionEngine;

pub use clip::{ClipConfig, ClipDirection, ClipMode};
pub use magnetic::{MagneticConfig, ReducedMotionPolicy};
pub use marquee::{MarqueeConfig, MarqueeDirection};
pub use pin::{PinConfig, PinFrame, PinGeometry};
pub use reveal::{RevealConfig, RevealFrame, ScaleRevealConfig};
pub use scrub::{ScrubConfig, ScrubRange};
pub use stagger::{StaggerConfig, StaggerFrom, StaggerOrder};
pub use timeline::{StepPosition, StepTween, Timeline, TimelineSpec, TimelineStep};
pub use yoyo::YoyoConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingSpec {
    Reveal {
        targets: Vec<ElementId>,
        #[serde(default)]
        config: RevealConfig,
    },
    ScaleReveal {
        targets: Vec<ElementId>,
        #[serde(default)]
        config: ScaleRevealConfig,
    },
    Clip {
        target: ElementId,
        #[serde(default)]
        config: ClipConfig,
    },
    Stagger {
        items: Vec<ElementId>,
        #[serde(default)]
        reveal: RevealConfig,
        #[serde(default)]
        stagger: StaggerConfig,
    },
    Scrub(ScrubConfig),
    Pin(PinConfig),
    Magnetic {
        target: ElementId,
        #[serde(default)]
        config: MagneticConfig,
    },
    Marquee {
        track: ElementId,
        #[serde(default)]
        config: MarqueeConfig,
    },
    Timeline(TimelineSpec),
    Yoyo {
        target: ElementId,
        config: YoyoConfig,
    },
}

impl BindingSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            BindingSpec::Reveal { .. } => "reveal",
            BindingSpec::ScaleReveal { .. } => "scale_reveal",
            BindingSpec::Clip { .. } => "clip",
            BindingSpec::Stagger { .. } => "stagger",
            BindingSpec::Scrub(_) => "scrub",
            BindingSpec::Pin(_) => "pin",
            BindingSpec::Magnetic { .. } => "magnetic",
            BindingSpec::Marquee { .. } => "marquee",
            BindingSpec::Timeline(_) => "timeline",
            BindingSpec::Yoyo { .. } => "yoyo",
        }
    }

    pub fn bind(self, engine: &MotionEngine, surface: &dyn Surface) -> BindingHandle {
        match self {
            BindingSpec::Reveal { targets, config } => {
                reveal::bind(engine, surface, &targets, &config)
            }
            BindingSpec::ScaleReveal { targets, config } => {
                reveal::bind_scale_x(engine, surface, &targets, &config)
            }
            BindingSpec::Clip { target, config } => clip::bind(engine, surface, target, &config),
            BindingSpec::Stagger {
                items,
                reveal,
                stagger,
            } => stagger::bind(engine, surface, &items, &reveal, &stagger),
            BindingSpec::Scrub(cfg) => scrub::bind(engine, surface, cfg),
            BindingSpec::Pin(cfg) => pin::bind(engine, surface, cfg),
            BindingSpec::Magnetic { target, config } => {
                magnetic::bind(engine, surface, target, &config)
            }
            BindingSpec::Marquee { track, config } => {
                marquee::bind(engine, surface, track, &config)
            }
            BindingSpec::Timeline(spec) => timeline::bind(engine, surface, spec),
            BindingSpec::Yoyo { target, config } => yoyo::bind(engine, surface, target, &config),
        }
    }
}
