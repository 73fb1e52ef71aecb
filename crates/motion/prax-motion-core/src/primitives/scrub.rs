//! Scroll-scrubbed tweens: progress is a pure function of scroll offset.
//!
//! Parallax, hero scale/fade and the page progress bar are presets.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, Rect, ScrollState, StyleWrite, Surface, Viewport};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::ease::Ease;
use crate::engine::MotionEngine;
use crate::outputs::SkipReason;
use crate::trigger::{ScrollRange, TriggerEnd, TriggerPoint};
use crate::tween::PropTween;

/// Where a scrub range comes from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScrubRange {
    /// Between two trigger positions of `element`.
    Trigger {
        element: ElementId,
        start: TriggerPoint,
        end: TriggerEnd,
    },
    /// The whole document, top to scroll limit.
    Document,
}

impl ScrubRange {
    pub fn resolve(&self, surface: &dyn Surface) -> Option<ScrollRange> {
        match *self {
            ScrubRange::Trigger {
                element,
                start,
                end,
            } => surface
                .rect(element)
                .map(|r| ScrollRange::resolve(start, end, r, surface.viewport())),
            ScrubRange::Document => Some(ScrollRange::new(0.0, surface.scroll_limit())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrubConfig {
    pub target: ElementId,
    pub tweens: Vec<PropTween>,
    pub range: ScrubRange,
    #[serde(default = "linear")]
    pub ease: Ease,
}

fn linear() -> Ease {
    Ease::Linear
}

impl ScrubConfig {
    /// `speed` below 1 lags behind the scroll; 1 is no effect.
    /// Runs while `trigger` crosses the viewport.
    pub fn parallax(target: ElementId, trigger: ElementId, speed: f32) -> Self {
        Self {
            target,
            tweens: vec![PropTween::float(
                Property::TranslateY,
                0.0,
                (1.0 - speed) * 200.0,
            )],
            range: ScrubRange::Trigger {
                element: trigger,
                start: TriggerPoint::TOP_BOTTOM,
                end: TriggerEnd::Point(TriggerPoint::BOTTOM_TOP),
            },
            ease: Ease::Linear,
        }
    }

    /// Image drift inside a frame: `offset - 50*speed` to `offset + 50*speed`.
    pub fn parallax_image(target: ElementId, frame: ElementId, speed: f32, offset: f32) -> Self {
        Self {
            tweens: vec![PropTween::float(
                Property::TranslateY,
                offset - 50.0 * speed,
                offset + 50.0 * speed,
            )],
            ..Self::parallax(target, frame, 0.0)
        }
    }

    /// Scale from 1 to `scale` while the element scrolls out the top.
    pub fn hero_scale(target: ElementId, scale: f32) -> Self {
        Self {
            target,
            tweens: vec![PropTween::float(Property::Scale, 1.0, scale)],
            range: ScrubRange::Trigger {
                element: target,
                start: TriggerPoint::TOP_TOP,
                end: TriggerEnd::Point(TriggerPoint::BOTTOM_TOP),
            },
            ease: Ease::Linear,
        }
    }

    /// One parallax scrub per `(layer, speed)`, all driven by `trigger`.
    pub fn layers(trigger: ElementId, layers: &[(ElementId, f32)]) -> Vec<Self> {
        layers
            .iter()
            .map(|&(layer, speed)| Self::parallax(layer, trigger, speed))
            .collect()
    }

    /// Page progress bar: scaleX 0 to 1 over the whole document.
    pub fn progress_bar(bar: ElementId) -> Self {
        Self {
            target: bar,
            tweens: vec![PropTween::float(Property::ScaleX, 0.0, 1.0)],
            range: ScrubRange::Document,
            ease: Ease::Linear,
        }
    }

    fn writes_at(&self, range: &ScrollRange, y: f32, out: &mut FrameCx<'_>) {
        for tw in &self.tweens {
            out.write(StyleWrite::new(
                self.target,
                tw.property,
                sample(tw, range, self.ease, y),
            ));
        }
    }
}

/// Value of `tween` at scroll offset `y`. Pure and repeatable.
pub fn sample(tween: &PropTween, range: &ScrollRange, ease: Ease, y: f32) -> prax_api_core::Value {
    tween.sample(ease.apply(range.progress(y)))
}

/// Convenience for float tweens resolved against a bare rect.
pub fn sample_at(
    tween: &PropTween,
    start: TriggerPoint,
    end: TriggerEnd,
    rect: Rect,
    viewport: Viewport,
    y: f32,
) -> f32 {
    let range = ScrollRange::resolve(start, end, rect, viewport);
    sample(tween, &range, Ease::Linear, y)
        .as_float()
        .unwrap_or(0.0)
}

struct Scrub {
    cfg: ScrubConfig,
    range: ScrollRange,
    last_y: f32,
}

impl Animator for Scrub {
    fn kind(&self) -> &'static str {
        "scrub"
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        self.cfg
            .tweens
            .iter()
            .map(|t| (self.cfg.target, t.property))
            .collect()
    }

    fn resources(&self) -> Resources {
        Resources {
            observers: 1,
            ..Resources::NONE
        }
    }

    fn start(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        self.last_y = scroll.position;
        self.cfg.writes_at(&self.range, scroll.position, cx);
    }

    fn on_scroll(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        if scroll.position == self.last_y {
            return;
        }
        self.last_y = scroll.position;
        self.cfg.writes_at(&self.range, scroll.position, cx);
    }

    fn remeasure(&mut self, surface: &dyn Surface, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        if let Some(range) = self.cfg.range.resolve(surface) {
            self.range = range;
        }
        self.start(scroll, cx);
    }
}

pub fn bind(engine: &MotionEngine, surface: &dyn Surface, cfg: ScrubConfig) -> BindingHandle {
    let resolved = surface
        .rect(cfg.target)
        .and_then(|_| cfg.range.resolve(surface));
    let Some(range) = resolved else {
        return engine.skip("scrub", SkipReason::Detached, Vec::new());
    };
    if !engine.should_animate() {
        let rest = cfg
            .tweens
            .iter()
            .map(|t| StyleWrite::new(cfg.target, t.property, t.property.rest_value()))
            .collect();
        return engine.skip("scrub", SkipReason::ReducedMotion, rest);
    }
    engine.install(Box::new(Scrub {
        cfg,
        range,
        last_y: f32::NAN,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport {
            width: 1440.0,
            height: 1000.0,
        }
    }

    #[test]
    fn parallax_moves_linearly_through_the_crossing() {
        let cfg = ScrubConfig::parallax(ElementId(1), ElementId(1), 0.5);
        let rect = Rect::new(0.0, 2000.0, 100.0, 500.0);
        let ScrubRange::Trigger { start, end, .. } = cfg.range else {
            panic!("trigger range");
        };
        // crossing runs from y=1000 to y=2500
        let t = &cfg.tweens[0];
        assert_eq!(sample_at(t, start, end, rect, vp(), 900.0), 0.0);
        assert_eq!(sample_at(t, start, end, rect, vp(), 1750.0), 50.0);
        assert_eq!(sample_at(t, start, end, rect, vp(), 9999.0), 100.0);
    }

    #[test]
    fn same_offset_same_value() {
        let tw = PropTween::float(Property::Scale, 1.0, 1.08);
        let range = ScrollRange::new(0.0, 800.0);
        let a = sample(&tw, &range, Ease::Linear, 400.0);
        let _ = sample(&tw, &range, Ease::Linear, 10.0);
        let b = sample(&tw, &range, Ease::Linear, 400.0);
        assert_eq!(a, b);
        assert!((a.as_float().unwrap() - 1.04).abs() < 1e-6);
    }
}
