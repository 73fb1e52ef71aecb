//! Pinned horizontal scroll sections.
//!
//! While the container is pinned, vertical scroll drives the track sideways.
//! The pinned distance equals the horizontal overflow of the track, so the
//! last item reaches the viewport edge exactly when the pin releases. Items
//! fade and scale in as they cross from 90% to 60% of the viewport width.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, Rect, ScrollState, StyleWrite, Surface, Viewport};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::ease::lerp_f32;
use crate::engine::MotionEngine;
use crate::outputs::{MotionEvent, SkipReason};
use crate::trigger::{Anchor, ScrollRange, TriggerPoint};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinConfig {
    pub container: ElementId,
    pub track: ElementId,
    #[serde(default)]
    pub items: Vec<ElementId>,
    #[serde(default = "top_top")]
    pub start: TriggerPoint,
    /// Viewport-width fraction (as a percent anchor) where items start to appear.
    #[serde(default = "item_start")]
    pub item_start: Anchor,
    #[serde(default = "item_end")]
    pub item_end: Anchor,
}

fn top_top() -> TriggerPoint {
    TriggerPoint::TOP_TOP
}

fn item_start() -> Anchor {
    Anchor::Percent(90.0)
}

fn item_end() -> Anchor {
    Anchor::Percent(60.0)
}

impl PinConfig {
    pub fn new(container: ElementId, track: ElementId, items: Vec<ElementId>) -> Self {
        Self {
            container,
            track,
            items,
            start: top_top(),
            item_start: item_start(),
            item_end: item_end(),
        }
    }
}

/// Horizontal overflow of `track` past `container`, never negative.
pub fn overflow(container: Rect, track: Rect) -> f32 {
    (track.width - container.width).max(0.0)
}

/// Layout-derived numbers for one pinned section.
#[derive(Clone, Debug, PartialEq)]
pub struct PinGeometry {
    pub range: ScrollRange,
    pub distance: f32,
    pub viewport: Viewport,
    /// Item rects at zero translation.
    pub items: Vec<(ElementId, Rect)>,
}

/// One sampled frame of a pinned section.
#[derive(Clone, Debug, PartialEq)]
pub struct PinFrame {
    pub pinned: bool,
    pub translate_x: f32,
    pub pin_offset: f32,
    /// (item, opacity, scale)
    pub items: Vec<(ElementId, f32, f32)>,
}

impl PinGeometry {
    pub fn measure(cfg: &PinConfig, surface: &dyn Surface) -> Option<Self> {
        let container = surface.rect(cfg.container)?;
        let track = surface.rect(cfg.track)?;
        let viewport = surface.viewport();
        let distance = overflow(container, track);
        let start = cfg.start.resolve_vertical(container, viewport);
        let items = cfg
            .items
            .iter()
            .filter_map(|id| surface.rect(*id).map(|r| (*id, r)))
            .collect();
        Some(Self {
            range: ScrollRange::new(start, start + distance),
            distance,
            viewport,
            items,
        })
    }

    /// Item appearance for a screen-space left edge.
    pub fn item_progress(&self, cfg: &PinConfig, screen_x: f32) -> f32 {
        let from = cfg.item_start.offset(self.viewport.width);
        let to = cfg.item_end.offset(self.viewport.width);
        let span = from - to;
        if span <= 0.0 {
            return if screen_x <= to { 1.0 } else { 0.0 };
        }
        ((from - screen_x) / span).clamp(0.0, 1.0)
    }

    pub fn sample(&self, cfg: &PinConfig, y: f32) -> PinFrame {
        let progress = if self.distance > 0.0 {
            self.range.progress(y)
        } else {
            0.0
        };
        let translate_x = -self.distance * progress;
        let pin_offset = (y - self.range.start).clamp(0.0, self.distance);
        let items = self
            .items
            .iter()
            .map(|(id, r)| {
                let p = self.item_progress(cfg, r.left() + translate_x);
                (*id, lerp_f32(0.3, 1.0, p), lerp_f32(0.9, 1.0, p))
            })
            .collect();
        PinFrame {
            pinned: self.distance > 0.0 && y >= self.range.start && y <= self.range.end,
            translate_x,
            pin_offset,
            items,
        }
    }
}

struct Pin {
    cfg: PinConfig,
    geometry: PinGeometry,
    last_y: f32,
}

impl Pin {
    fn write_frame(&mut self, y: f32, cx: &mut FrameCx<'_>) {
        self.last_y = y;
        let frame = self.geometry.sample(&self.cfg, y);
        cx.write(StyleWrite::float(
            self.cfg.track,
            Property::TranslateX,
            frame.translate_x,
        ));
        cx.write(StyleWrite::float(
            self.cfg.container,
            Property::PinOffset,
            frame.pin_offset,
        ));
        for (id, opacity, scale) in frame.items {
            cx.write(StyleWrite::float(id, Property::Opacity, opacity));
            cx.write(StyleWrite::float(id, Property::Scale, scale));
        }
    }
}

impl Animator for Pin {
    fn kind(&self) -> &'static str {
        "pin"
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        let mut v = vec![
            (self.cfg.track, Property::TranslateX),
            (self.cfg.container, Property::PinOffset),
        ];
        for (id, _) in &self.geometry.items {
            v.push((*id, Property::Opacity));
            v.push((*id, Property::Scale));
        }
        v
    }

    fn resources(&self) -> Resources {
        Resources {
            observers: 1,
            resize_listeners: 1,
            ..Resources::NONE
        }
    }

    fn start(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        cx.event(MotionEvent::PinMeasured {
            binding: cx.binding,
            distance: self.geometry.distance,
        });
        self.write_frame(scroll.position, cx);
    }

    fn on_scroll(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        if scroll.position != self.last_y {
            self.write_frame(scroll.position, cx);
        }
    }

    fn remeasure(&mut self, surface: &dyn Surface, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        let Some(geometry) = PinGeometry::measure(&self.cfg, surface) else {
            log::warn!("pin: container or track detached during refresh");
            return;
        };
        if geometry.distance != self.geometry.distance {
            log::debug!(
                "pin distance {} -> {}",
                self.geometry.distance,
                geometry.distance
            );
        }
        self.geometry = geometry;
        self.start(scroll, cx);
    }
}

pub fn bind(engine: &MotionEngine, surface: &dyn Surface, cfg: PinConfig) -> BindingHandle {
    let Some(geometry) = PinGeometry::measure(&cfg, surface) else {
        return engine.skip("pin", SkipReason::Detached, Vec::new());
    };
    if !engine.should_animate() {
        let mut rest = vec![
            StyleWrite::float(cfg.track, Property::TranslateX, 0.0),
            StyleWrite::float(cfg.container, Property::PinOffset, 0.0),
        ];
        for (id, _) in &geometry.items {
            rest.push(StyleWrite::float(*id, Property::Opacity, 1.0));
            rest.push(StyleWrite::float(*id, Property::Scale, 1.0));
        }
        return engine.skip("pin", SkipReason::ReducedMotion, rest);
    }
    engine.install(Box::new(Pin {
        cfg,
        geometry,
        last_y: f32::NAN,
    }))
}
