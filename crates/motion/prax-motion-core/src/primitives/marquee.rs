//! Endless horizontal marquee.
//!
//! The track holds `copies` identical runs of content side by side. Moving
//! it by exactly one run width lands on a frame identical to the start, so
//! the offset wraps there and the loop is seamless.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, ScrollState, StyleWrite, Surface};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::engine::MotionEngine;
use crate::outputs::SkipReason;
use crate::primitives::magnetic::ReducedMotionPolicy;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarqueeDirection {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Pixels per second.
    pub velocity: f32,
    pub direction: MarqueeDirection,
    /// Identical runs laid out in the track.
    pub copies: u32,
    pub reduced_motion: ReducedMotionPolicy,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            velocity: 80.0,
            direction: MarqueeDirection::Left,
            copies: 2,
            reduced_motion: ReducedMotionPolicy::Rest,
        }
    }
}

/// Float modulo that always returns a value in `[0, m)`.
#[inline]
fn fmod(a: f32, m: f32) -> f32 {
    if m <= 0.0 {
        return 0.0;
    }
    let r = a % m;
    if r < 0.0 {
        r + m
    } else {
        r
    }
}

/// Seconds for one full loop.
pub fn period(run_width: f32, velocity: f32) -> f32 {
    if velocity <= 0.0 {
        f32::INFINITY
    } else {
        run_width / velocity
    }
}

/// Track translation after `t` seconds.
pub fn offset(run_width: f32, velocity: f32, direction: MarqueeDirection, t: f32) -> f32 {
    let travelled = fmod(velocity.max(0.0) * t, run_width);
    match direction {
        MarqueeDirection::Left => -travelled,
        MarqueeDirection::Right => travelled - run_width,
    }
}

struct Marquee {
    track: ElementId,
    run_width: f32,
    cfg: MarqueeConfig,
    elapsed: f32,
}

impl Marquee {
    fn write(&self, cx: &mut FrameCx<'_>) {
        cx.write(StyleWrite::float(
            self.track,
            Property::TranslateX,
            offset(self.run_width, self.cfg.velocity, self.cfg.direction, self.elapsed),
        ));
    }
}

impl Animator for Marquee {
    fn kind(&self) -> &'static str {
        "marquee"
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        vec![(self.track, Property::TranslateX)]
    }

    fn resources(&self) -> Resources {
        Resources {
            frame_callbacks: 1,
            ..Resources::NONE
        }
    }

    fn start(&mut self, _scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        self.write(cx);
    }

    fn tick(&mut self, dt: f32, cx: &mut FrameCx<'_>) {
        let p = period(self.run_width, self.cfg.velocity);
        self.elapsed = if p.is_finite() {
            fmod(self.elapsed + dt, p)
        } else {
            0.0
        };
        self.write(cx);
    }

    fn remeasure(&mut self, surface: &dyn Surface, _scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        if let Some(rect) = surface.rect(self.track) {
            self.run_width = rect.width / self.cfg.copies.max(1) as f32;
            self.write(cx);
        }
    }
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    track: ElementId,
    cfg: &MarqueeConfig,
) -> BindingHandle {
    let Some(rect) = surface.rect(track) else {
        return engine.skip("marquee", SkipReason::Detached, Vec::new());
    };
    if cfg.reduced_motion == ReducedMotionPolicy::Rest && !engine.should_animate() {
        return engine.skip(
            "marquee",
            SkipReason::ReducedMotion,
            vec![StyleWrite::float(track, Property::TranslateX, 0.0)],
        );
    }
    engine.install(Box::new(Marquee {
        track,
        run_width: rect.width / cfg.copies.max(1) as f32,
        cfg: *cfg,
        elapsed: 0.0,
    }))
}
