//! Magnetic hover: the element leans toward the pointer and springs back.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Point, Property, Rect, ScrollState, StyleWrite, Surface};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::ease::{lerp_f32, Ease};
use crate::engine::MotionEngine;
use crate::outputs::{MotionEvent, SkipReason};

/// What a continuous interaction does when the user prefers reduced motion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducedMotionPolicy {
    /// Stay at rest and register nothing.
    #[default]
    Rest,
    /// Keep running regardless of the preference.
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    /// Fraction of the pointer's offset from centre the element follows.
    pub strength: f32,
    pub follow_duration: f32,
    pub follow_ease: Ease,
    pub return_duration: f32,
    pub return_ease: Ease,
    pub reduced_motion: ReducedMotionPolicy,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.35,
            follow_duration: 0.35,
            follow_ease: Ease::Power3Out,
            return_duration: 0.6,
            return_ease: Ease::BackOut(1.7),
            reduced_motion: ReducedMotionPolicy::Rest,
        }
    }
}

/// Offset the element heads toward for a pointer at `pointer`.
pub fn target_offset(rect: Rect, pointer: Point, strength: f32) -> Point {
    let c = rect.center();
    Point::new((pointer.x - c.x) * strength, (pointer.y - c.y) * strength)
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: Point,
    to: Point,
    elapsed: f32,
    duration: f32,
    ease: Ease,
}

impl Segment {
    fn at(&self) -> Point {
        let raw = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        let e = self.ease.apply(raw);
        Point::new(
            lerp_f32(self.from.x, self.to.x, e),
            lerp_f32(self.from.y, self.to.y, e),
        )
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

struct Magnetic {
    target: ElementId,
    rect: Rect,
    cfg: MagneticConfig,
    current: Point,
    hovering: bool,
    segment: Option<Segment>,
}

impl Magnetic {
    fn head_to(&mut self, to: Point, duration: f32, ease: Ease) {
        self.segment = Some(Segment {
            from: self.current,
            to,
            elapsed: 0.0,
            duration,
            ease,
        });
    }

    fn write(&self, cx: &mut FrameCx<'_>) {
        cx.write(StyleWrite::float(
            self.target,
            Property::TranslateX,
            self.current.x,
        ));
        cx.write(StyleWrite::float(
            self.target,
            Property::TranslateY,
            self.current.y,
        ));
    }
}

impl Animator for Magnetic {
    fn kind(&self) -> &'static str {
        "magnetic"
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        vec![
            (self.target, Property::TranslateX),
            (self.target, Property::TranslateY),
        ]
    }

    fn resources(&self) -> Resources {
        // enter, move, leave
        Resources {
            pointer_listeners: 3,
            frame_callbacks: 1,
            ..Resources::NONE
        }
    }

    fn start(&mut self, _scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        self.write(cx);
    }

    fn on_pointer(&mut self, pointer: Option<Point>, cx: &mut FrameCx<'_>) {
        match pointer {
            Some(p) if self.rect.contains(p) => {
                if !self.hovering {
                    self.hovering = true;
                    cx.event(MotionEvent::PointerEntered {
                        binding: cx.binding,
                    });
                }
                let to = target_offset(self.rect, p, self.cfg.strength);
                self.head_to(to, self.cfg.follow_duration, self.cfg.follow_ease);
            }
            _ if self.hovering => {
                self.hovering = false;
                cx.event(MotionEvent::PointerLeft {
                    binding: cx.binding,
                });
                self.head_to(
                    Point::new(0.0, 0.0),
                    self.cfg.return_duration,
                    self.cfg.return_ease,
                );
            }
            _ => {}
        }
    }

    fn tick(&mut self, dt: f32, cx: &mut FrameCx<'_>) {
        let Some(seg) = self.segment.as_mut() else {
            return;
        };
        seg.elapsed += dt;
        self.current = seg.at();
        if seg.is_done() {
            self.segment = None;
        }
        self.write(cx);
    }

    fn remeasure(&mut self, surface: &dyn Surface, _scroll: &ScrollState, _cx: &mut FrameCx<'_>) {
        if let Some(rect) = surface.rect(self.target) {
            self.rect = rect;
        }
    }
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    target: ElementId,
    cfg: &MagneticConfig,
) -> BindingHandle {
    let Some(rect) = surface.rect(target) else {
        return engine.skip("magnetic", SkipReason::Detached, Vec::new());
    };
    if cfg.reduced_motion == ReducedMotionPolicy::Rest && !engine.should_animate() {
        let rest = vec![
            StyleWrite::float(target, Property::TranslateX, 0.0),
            StyleWrite::float(target, Property::TranslateY, 0.0),
        ];
        return engine.skip("magnetic", SkipReason::ReducedMotion, rest);
    }
    engine.install(Box::new(Magnetic {
        target,
        rect,
        cfg: *cfg,
        current: Point::new(0.0, 0.0),
        hovering: false,
        segment: None,
    }))
}
