//! Sequenced timelines for hero intros, menu transitions and the preloader.
//!
//! Steps are placed after the previous step, overlapping it by a margin, or
//! at an absolute time. A step that leaves `from` empty continues from the
//! value the previous step on the same element+property ended at.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Property, StyleWrite, Surface, Value};

use crate::binding::BindingHandle;
use crate::ease::Ease;
use crate::engine::MotionEngine;
use crate::primitives::triggered::{attached, bind_track, Track};
use crate::trigger::TriggerConfig;
use crate::tween::PropTween;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum StepPosition {
    /// When the previous step ends.
    #[default]
    After,
    /// `seconds` before the previous step ends (`"-=0.4"`).
    Overlap(f32),
    /// Absolute time on the timeline.
    At(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepTween {
    pub property: Property,
    #[serde(default)]
    pub from: Option<Value>,
    pub to: Value,
}

impl StepTween {
    pub fn to(property: Property, to: Value) -> Self {
        Self {
            property,
            from: None,
            to,
        }
    }

    pub fn from_to(property: Property, from: Value, to: Value) -> Self {
        Self {
            property,
            from: Some(from),
            to,
        }
    }

    pub fn float(property: Property, from: f32, to: f32) -> Self {
        Self::from_to(property, Value::Float(from), Value::Float(to))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub targets: Vec<ElementId>,
    pub tweens: Vec<StepTween>,
    pub duration: f32,
    #[serde(default)]
    pub ease: Ease,
    /// Seconds between consecutive targets.
    #[serde(default)]
    pub stagger: f32,
    #[serde(default)]
    pub position: StepPosition,
}

impl TimelineStep {
    pub fn new(targets: Vec<ElementId>, tweens: Vec<StepTween>, duration: f32) -> Self {
        Self {
            targets,
            tweens,
            duration,
            ease: Ease::default(),
            stagger: 0.0,
            position: StepPosition::After,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, each: f32) -> Self {
        self.stagger = each;
        self
    }

    pub fn at(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    fn span(&self) -> f32 {
        self.duration.max(0.0) + self.stagger.max(0.0) * self.targets.len().saturating_sub(1) as f32
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSpec {
    #[serde(default)]
    pub delay: f32,
    pub steps: Vec<TimelineStep>,
    #[serde(default)]
    pub trigger: Option<TriggerConfig>,
}

impl TimelineSpec {
    pub fn new(steps: Vec<TimelineStep>) -> Self {
        Self {
            delay: 0.0,
            steps,
            trigger: None,
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn then(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Keep only targets the surface can lay out; drop steps left empty.
    pub fn retain_attached(mut self, surface: &dyn Surface) -> Self {
        for step in &mut self.steps {
            step.targets = attached(surface, &step.targets);
        }
        self.steps.retain(|s| !s.targets.is_empty());
        self
    }

    /// Place steps on the time axis and fill in implicit `from` values.
    pub fn resolve(&self) -> Timeline {
        let mut placed = Vec::with_capacity(self.steps.len());
        let mut prev_end = self.delay.max(0.0);
        for step in &self.steps {
            let start = match step.position {
                StepPosition::After => prev_end,
                StepPosition::Overlap(s) => (prev_end - s).max(0.0),
                StepPosition::At(t) => self.delay.max(0.0) + t.max(0.0),
            };
            prev_end = start + step.span();
            placed.push((start, step));
        }
        // stable: steps starting together keep declaration order
        placed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut last: HashMap<(ElementId, Property), Value> = HashMap::new();
        let mut steps = Vec::with_capacity(placed.len());
        for (start, step) in placed {
            let mut tweens = Vec::new();
            for (i, target) in step.targets.iter().enumerate() {
                for st in &step.tweens {
                    let key = (*target, st.property);
                    let from = st
                        .from
                        .or_else(|| last.get(&key).copied())
                        .unwrap_or_else(|| st.property.rest_value());
                    last.insert(key, st.to);
                    tweens.push(PlacedTween {
                        target: *target,
                        start: start + step.stagger.max(0.0) * i as f32,
                        tween: PropTween::new(st.property, from, st.to),
                    });
                }
            }
            steps.push(PlacedStep {
                duration: step.duration.max(0.0),
                ease: step.ease,
                tweens,
            });
        }
        let total = steps
            .iter()
            .flat_map(|s| s.tweens.iter().map(move |t| t.start + s.duration))
            .fold(0.0f32, f32::max);
        Timeline { steps, total }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PlacedTween {
    target: ElementId,
    start: f32,
    tween: PropTween,
}

#[derive(Clone, Debug, PartialEq)]
struct PlacedStep {
    duration: f32,
    ease: Ease,
    tweens: Vec<PlacedTween>,
}

/// A resolved timeline, ready to sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    steps: Vec<PlacedStep>,
    total: f32,
}

impl Timeline {
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// Value of every animated element+property at time `t`.
    ///
    /// The most recently started tween wins; a pair whose first tween has
    /// not started yet shows that tween's `from`.
    pub fn sample(&self, t: f32) -> Vec<StyleWrite> {
        let mut order: Vec<(ElementId, Property)> = Vec::new();
        let mut values: HashMap<(ElementId, Property), Value> = HashMap::new();
        for step in &self.steps {
            for pt in &step.tweens {
                let key = (pt.target, pt.tween.property);
                let started = t >= pt.start;
                if !started && values.contains_key(&key) {
                    continue;
                }
                let raw = if step.duration <= 0.0 {
                    if started {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    ((t - pt.start) / step.duration).clamp(0.0, 1.0)
                };
                if values
                    .insert(key, pt.tween.sample(step.ease.apply(raw)))
                    .is_none()
                {
                    order.push(key);
                }
            }
        }
        order
            .into_iter()
            .filter_map(|k| values.get(&k).map(|v| StyleWrite::new(k.0, k.1, *v)))
            .collect()
    }
}

impl Track for Timeline {
    fn total_duration(&self) -> f32 {
        self.total
    }

    fn sample_into(&self, t: f32, out: &mut Vec<StyleWrite>) {
        out.extend(self.sample(t));
    }

    fn claims(&self) -> Vec<(ElementId, Property)> {
        self.steps
            .iter()
            .flat_map(|s| s.tweens.iter().map(|t| (t.target, t.tween.property)))
            .collect()
    }

    fn final_writes(&self) -> Vec<StyleWrite> {
        self.sample(f32::INFINITY)
    }
}

pub fn bind(engine: &MotionEngine, surface: &dyn Surface, spec: TimelineSpec) -> BindingHandle {
    let trigger = spec.trigger;
    let timeline = spec.retain_attached(surface).resolve();
    bind_track(engine, surface, "timeline", timeline, trigger)
}
