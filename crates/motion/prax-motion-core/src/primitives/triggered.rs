//! Time-driven tracks started by a viewport trigger (or immediately).
//!
//! Reveal, clip, stagger, scale and timeline primitives all reduce to a
//! [`Track`] sampled at a playhead time. This module owns the shared
//! animator that moves the playhead on trigger callbacks and frame ticks.

use prax_api_core::{ElementId, Property, ScrollState, StyleWrite, Surface};

use crate::binding::{Animator, BindingHandle, FrameCx, Resources};
use crate::engine::MotionEngine;
use crate::outputs::{MotionEvent, SkipReason};
use crate::trigger::{TriggerConfig, TriggerObserver};
use crate::tween::{Playhead, TweenSpec};

/// Something that can be sampled over `[0, total_duration]`.
pub(crate) trait Track {
    fn total_duration(&self) -> f32;
    fn sample_into(&self, t: f32, out: &mut Vec<StyleWrite>);
    fn claims(&self) -> Vec<(ElementId, Property)>;
    fn final_writes(&self) -> Vec<StyleWrite>;
}

impl Track for TweenSpec {
    fn total_duration(&self) -> f32 {
        TweenSpec::total_duration(self)
    }

    fn sample_into(&self, t: f32, out: &mut Vec<StyleWrite>) {
        TweenSpec::sample_into(self, t, out)
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        TweenSpec::claims(self)
    }

    fn final_writes(&self) -> Vec<StyleWrite> {
        TweenSpec::final_writes(self)
    }
}

struct Armed {
    element: ElementId,
    config: TriggerConfig,
    observer: TriggerObserver,
}

pub(crate) struct Triggered<T: Track> {
    kind: &'static str,
    track: T,
    playhead: Playhead,
    trigger: Option<Armed>,
    completed: bool,
    scratch: Vec<StyleWrite>,
}

impl<T: Track> Triggered<T> {
    fn write_sample(&mut self, cx: &mut FrameCx<'_>) {
        self.scratch.clear();
        self.track.sample_into(self.playhead.time, &mut self.scratch);
        cx.write_all(self.scratch.drain(..));
    }

    fn evaluate(&mut self, y: f32, cx: &mut FrameCx<'_>) {
        let Some(armed) = self.trigger.as_mut() else {
            return;
        };
        let mut jumped = false;
        for cb in armed.observer.update(y) {
            cx.event(MotionEvent::TriggerFired {
                binding: cx.binding,
                callback: cb,
            });
            jumped |= self.playhead.apply(armed.config.toggle_actions.action_for(cb));
        }
        // A one-shot trigger has nothing left to do once it started playing.
        if armed.config.toggle_actions.is_one_shot() && self.playhead.is_active() {
            self.trigger = None;
        }
        if jumped {
            self.write_sample(cx);
        }
    }

    fn report_completion(&mut self, cx: &mut FrameCx<'_>) {
        if self.playhead.is_complete() && !self.completed {
            self.completed = true;
            cx.event(MotionEvent::Completed {
                binding: cx.binding,
            });
        } else if !self.playhead.is_complete() {
            self.completed = false;
        }
    }
}

impl<T: Track> Animator for Triggered<T> {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        self.track.claims()
    }

    fn resources(&self) -> Resources {
        // A finished track with no trigger left can never move again.
        let settled = self.trigger.is_none() && self.playhead.is_complete();
        Resources {
            observers: u32::from(self.trigger.is_some()),
            frame_callbacks: u32::from(!settled),
            ..Resources::NONE
        }
    }

    fn start(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        self.write_sample(cx);
        self.evaluate(scroll.position, cx);
    }

    fn on_scroll(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        self.evaluate(scroll.position, cx);
    }

    fn tick(&mut self, dt: f32, cx: &mut FrameCx<'_>) {
        if self.playhead.advance(dt) {
            self.write_sample(cx);
        }
        self.report_completion(cx);
    }

    fn remeasure(&mut self, surface: &dyn Surface, scroll: &ScrollState, cx: &mut FrameCx<'_>) {
        if let Some(armed) = self.trigger.as_mut() {
            if let Some(rect) = surface.rect(armed.element) {
                armed
                    .observer
                    .remeasure(armed.config.resolve(rect, surface.viewport()));
            }
        }
        self.evaluate(scroll.position, cx);
    }
}

/// Targets that currently have a layout box.
pub(crate) fn attached(surface: &dyn Surface, targets: &[ElementId]) -> Vec<ElementId> {
    targets
        .iter()
        .copied()
        .filter(|t| surface.rect(*t).is_some())
        .collect()
}

/// Register `track` on the engine, armed with `trigger` when given.
///
/// Returns an inert handle when nothing could be bound and, under reduced
/// motion, writes the track's end state instead of animating.
pub(crate) fn bind_track<T: Track + 'static>(
    engine: &MotionEngine,
    surface: &dyn Surface,
    kind: &'static str,
    track: T,
    trigger: Option<TriggerConfig>,
) -> BindingHandle {
    let claims = track.claims();
    let Some(&(first, _)) = claims.first() else {
        return engine.skip(kind, SkipReason::Detached, Vec::new());
    };
    if !engine.should_animate() {
        return engine.skip(kind, SkipReason::ReducedMotion, track.final_writes());
    }

    let armed = match trigger {
        Some(config) => {
            let element = config.element.unwrap_or(first);
            let Some(rect) = surface.rect(element) else {
                log::debug!("{kind}: trigger element {element:?} is not attached");
                return engine.skip(kind, SkipReason::Detached, Vec::new());
            };
            Some(Armed {
                element,
                config,
                observer: TriggerObserver::new(config.resolve(rect, surface.viewport())),
            })
        }
        None => None,
    };

    let mut playhead = Playhead::new(track.total_duration());
    if armed.is_none() {
        playhead.apply(crate::trigger::ToggleAction::Play);
    }
    engine.install(Box::new(Triggered {
        kind,
        track,
        playhead,
        trigger: armed,
        completed: false,
        scratch: Vec::new(),
    }))
}
