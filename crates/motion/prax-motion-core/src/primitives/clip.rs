//! Clip-path curtain reveals and conceals.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Inset, Property, Surface, Value};

use crate::binding::BindingHandle;
use crate::config::MotionConfig;
use crate::ease::Ease;
use crate::engine::MotionEngine;
use crate::primitives::triggered::{attached, bind_track};
use crate::trigger::TriggerConfig;
use crate::tween::{PropTween, TweenSpec};

/// Edge the curtain opens from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipDirection {
    /// Revealed bottom to top.
    #[default]
    FromBottom,
    /// Revealed top to bottom.
    FromTop,
    /// Revealed left to right.
    FromLeft,
    /// Revealed right to left.
    FromRight,
}

impl ClipDirection {
    /// Fully hidden inset for this direction.
    pub fn closed(self) -> Inset {
        match self {
            ClipDirection::FromBottom => Inset::new(100.0, 0.0, 0.0, 0.0),
            ClipDirection::FromTop => Inset::new(0.0, 0.0, 100.0, 0.0),
            ClipDirection::FromLeft => Inset::new(0.0, 100.0, 0.0, 0.0),
            ClipDirection::FromRight => Inset::new(0.0, 0.0, 0.0, 100.0),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMode {
    /// Closed to open.
    #[default]
    Reveal,
    /// Open to closed.
    Conceal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    pub direction: ClipDirection,
    pub mode: ClipMode,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub trigger: Option<TriggerConfig>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self::with_tokens(&MotionConfig::default())
    }
}

impl ClipConfig {
    /// Bottom-up reveal over `slowest` with `ease_in_out`, starting at
    /// `media_start`.
    pub fn with_tokens(tokens: &MotionConfig) -> Self {
        Self {
            direction: ClipDirection::FromBottom,
            mode: ClipMode::Reveal,
            duration: tokens.durations.slowest,
            delay: 0.0,
            ease: tokens.ease_in_out,
            trigger: Some(TriggerConfig::at(tokens.media_start)),
        }
    }

    pub fn direction(direction: ClipDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// (from, to) insets.
    pub fn endpoints(&self) -> (Inset, Inset) {
        let closed = self.direction.closed();
        match self.mode {
            ClipMode::Reveal => (closed, Inset::OPEN),
            ClipMode::Conceal => (Inset::OPEN, closed),
        }
    }

    pub(crate) fn tween_spec(&self, targets: Vec<ElementId>) -> TweenSpec {
        let (from, to) = self.endpoints();
        let mut spec = TweenSpec::new(
            targets,
            vec![PropTween::new(
                Property::ClipPath,
                Value::Inset(from),
                Value::Inset(to),
            )],
            self.duration,
            self.ease,
        );
        spec.delay = self.delay.max(0.0);
        spec
    }
}

/// Inset at `elapsed` seconds after play.
pub fn sample(cfg: &ClipConfig, elapsed: f32) -> Inset {
    let raw = if cfg.duration <= 0.0 {
        1.0
    } else {
        ((elapsed - cfg.delay) / cfg.duration).clamp(0.0, 1.0)
    };
    let (from, to) = cfg.endpoints();
    Inset::lerp(from, to, cfg.ease.apply(raw))
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    target: ElementId,
    cfg: &ClipConfig,
) -> BindingHandle {
    let live = attached(surface, &[target]);
    bind_track(engine, surface, "clip", cfg.tween_spec(live), cfg.trigger)
}
