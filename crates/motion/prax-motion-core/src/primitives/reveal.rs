//! Entrance reveals: fade-up, fade-in, horizontal item reveal and scale-in.
//!
//! A reveal is a "from" tween: each target starts hidden (transparent and
//! offset) and settles at its resting style.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, Surface, Value};

use crate::binding::BindingHandle;
use crate::config::MotionConfig;
use crate::ease::{lerp_f32, Ease};
use crate::engine::MotionEngine;
use crate::primitives::triggered::{attached, bind_track};
use crate::trigger::TriggerConfig;
use crate::tween::{PropTween, TweenSpec};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Starting opacity.
    pub opacity: f32,
    /// Starting horizontal offset in pixels.
    pub x: f32,
    /// Starting vertical offset in pixels.
    pub y: f32,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    /// `None` plays on bind.
    pub trigger: Option<TriggerConfig>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::fade_up()
    }
}

impl RevealConfig {
    /// Up 60px from transparent over 1s, once the top passes 85%.
    pub fn fade_up() -> Self {
        Self::fade_up_with(&MotionConfig::default())
    }

    /// Fade-up timed by the engine's tokens: `slower` duration, `ease_out`,
    /// starting at `reveal_start`.
    pub fn fade_up_with(tokens: &MotionConfig) -> Self {
        Self {
            opacity: 0.0,
            x: 0.0,
            y: 60.0,
            duration: tokens.durations.slower,
            delay: 0.0,
            ease: tokens.ease_out,
            trigger: Some(TriggerConfig::at(tokens.reveal_start)),
        }
    }

    /// Opacity only, played on bind.
    pub fn fade_in() -> Self {
        Self::fade_in_with(&MotionConfig::default())
    }

    pub fn fade_in_with(tokens: &MotionConfig) -> Self {
        Self {
            y: 0.0,
            duration: tokens.durations.slow,
            trigger: None,
            ..Self::fade_up_with(tokens)
        }
    }

    /// In from the side (negative `x` comes from the left).
    pub fn slide_x(x: f32) -> Self {
        Self {
            x,
            y: 0.0,
            ..Self::fade_up()
        }
    }

    pub fn with_trigger(mut self, trigger: Option<TriggerConfig>) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn tweens(&self) -> Vec<PropTween> {
        let mut v = vec![PropTween::from_hidden(
            Property::Opacity,
            Value::Float(self.opacity),
        )];
        if self.x != 0.0 {
            v.push(PropTween::from_hidden(Property::TranslateX, Value::Float(self.x)));
        }
        if self.y != 0.0 {
            v.push(PropTween::from_hidden(Property::TranslateY, Value::Float(self.y)));
        }
        v
    }

    pub(crate) fn tween_spec(&self, targets: Vec<ElementId>) -> TweenSpec {
        let mut spec = TweenSpec::new(targets, self.tweens(), self.duration, self.ease);
        spec.delay = self.delay.max(0.0);
        spec
    }
}

/// Pure reveal state at `elapsed` seconds after play.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
}

pub fn sample(cfg: &RevealConfig, elapsed: f32) -> RevealFrame {
    let raw = if cfg.duration <= 0.0 {
        if elapsed >= cfg.delay {
            1.0
        } else {
            0.0
        }
    } else {
        ((elapsed - cfg.delay) / cfg.duration).clamp(0.0, 1.0)
    };
    let e = cfg.ease.apply(raw);
    RevealFrame {
        opacity: lerp_f32(cfg.opacity, 1.0, e),
        x: lerp_f32(cfg.x, 0.0, e),
        y: lerp_f32(cfg.y, 0.0, e),
    }
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    targets: &[ElementId],
    cfg: &RevealConfig,
) -> BindingHandle {
    let live = attached(surface, targets);
    bind_track(engine, surface, "reveal", cfg.tween_spec(live), cfg.trigger)
}

/// Horizontal scale from 0 to 1 (dividers and rules).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRevealConfig {
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub trigger: Option<TriggerConfig>,
}

impl Default for ScaleRevealConfig {
    fn default() -> Self {
        Self::with_tokens(&MotionConfig::default())
    }
}

impl ScaleRevealConfig {
    pub fn with_tokens(tokens: &MotionConfig) -> Self {
        Self {
            duration: tokens.durations.slowest,
            delay: 0.0,
            ease: Ease::Power3InOut,
            trigger: Some(TriggerConfig::at(tokens.reveal_start)),
        }
    }
}

pub fn bind_scale_x(
    engine: &MotionEngine,
    surface: &dyn Surface,
    targets: &[ElementId],
    cfg: &ScaleRevealConfig,
) -> BindingHandle {
    let mut spec = TweenSpec::new(
        attached(surface, targets),
        vec![PropTween::from_hidden(Property::ScaleX, Value::Float(0.0))],
        cfg.duration,
        cfg.ease,
    );
    spec.delay = cfg.delay.max(0.0);
    bind_track(engine, surface, "scale_reveal", spec, cfg.trigger)
}
