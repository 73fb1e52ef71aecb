//! Endless back-and-forth tween on one property.
//!
//! Each half cycle eases from `from` to `to`, the next one eases back, and
//! the loop runs until the binding is disposed. Under reduced motion nothing
//! is bound and the element keeps its resting style.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, ScrollState, StyleWrite, Surface};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::ease::{lerp_f32, Ease};
use crate::engine::MotionEngine;
use crate::outputs::SkipReason;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct YoyoConfig {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    /// Seconds for one half cycle.
    pub duration: f32,
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

fn default_ease() -> Ease {
    Ease::SineInOut
}

impl YoyoConfig {
    pub fn new(property: Property, from: f32, to: f32, duration: f32) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            ease: default_ease(),
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Value after `elapsed` seconds of looping.
pub fn sample(cfg: &YoyoConfig, elapsed: f32) -> f32 {
    if cfg.duration <= 0.0 || !elapsed.is_finite() {
        return cfg.from;
    }
    let cycles = elapsed.max(0.0) / cfg.duration;
    let mut t = cycles.fract();
    if cycles as u64 % 2 == 1 {
        t = 1.0 - t;
    }
    lerp_f32(cfg.from, cfg.to, cfg.ease.apply(t))
}

struct Yoyo {
    target: ElementId,
    cfg: YoyoConfig,
    elapsed: f32,
}

impl Yoyo {
    fn write(&self, cx: &mut FrameCx<'_>) {
        cx.write(StyleWrite::float(
            self.target,
            self.cfg.property,
            sample(&self.cfg, self.elapsed),
        ));
    }
}

impl Animator for Yoyo {
    fn kind(&self) -> &'static str {
        "yoyo"
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        vec![(self.target, self.cfg.property)]
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
        // keep the clock inside one full cycle
        self.elapsed = (self.elapsed + dt) % (2.0 * self.cfg.duration.max(f32::EPSILON));
        self.write(cx);
    }
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    target: ElementId,
    cfg: &YoyoConfig,
) -> BindingHandle {
    if surface.rect(target).is_none() {
        return engine.skip("yoyo", SkipReason::Detached, Vec::new());
    }
    if !engine.should_animate() {
        return engine.skip("yoyo", SkipReason::ReducedMotion, Vec::new());
    }
    engine.install(Box::new(Yoyo {
        target,
        cfg: *cfg,
        elapsed: 0.0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breathe() -> YoyoConfig {
        YoyoConfig::new(Property::Scale, 1.0, 1.05, 1.5)
    }

    #[test]
    fn swings_out_and_back() {
        let cfg = breathe();
        assert_eq!(sample(&cfg, 0.0), 1.0);
        assert!((sample(&cfg, 0.75) - 1.025).abs() < 1e-5);
        assert!((sample(&cfg, 1.5) - 1.05).abs() < 1e-5);
        assert!((sample(&cfg, 2.25) - 1.025).abs() < 1e-5);
        assert!((sample(&cfg, 3.0) - 1.0).abs() < 1e-5);
        assert!((sample(&cfg, 4.5) - 1.05).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_rests() {
        let cfg = YoyoConfig::new(Property::Scale, 1.0, 1.05, 0.0);
        assert_eq!(sample(&cfg, 3.0), 1.0);
    }
}
