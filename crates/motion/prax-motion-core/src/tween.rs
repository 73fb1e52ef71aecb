//! Time-driven property tweens and their playhead.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Inset, Property, StyleWrite, Value};

use crate::ease::{lerp_f32, Ease};
use crate::trigger::ToggleAction;

/// One property animated from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropTween {
    pub property: Property,
    pub from: Value,
    pub to: Value,
}

impl PropTween {
    pub fn new(property: Property, from: Value, to: Value) -> Self {
        Self { property, from, to }
    }

    pub fn float(property: Property, from: f32, to: f32) -> Self {
        Self::new(property, Value::Float(from), Value::Float(to))
    }

    /// Tween from `from` to the property's resting value (a "from" tween).
    pub fn from_hidden(property: Property, from: Value) -> Self {
        Self::new(property, from, property.rest_value())
    }

    /// Value at eased progress `e`. Mismatched kinds hold the left value.
    pub fn sample(&self, e: f32) -> Value {
        match (self.from, self.to) {
            (Value::Float(a), Value::Float(b)) => Value::Float(lerp_f32(a, b, e)),
            (Value::Inset(a), Value::Inset(b)) => Value::Inset(Inset::lerp(a, b, e)),
            (Value::Bool(a), Value::Bool(b)) => Value::Bool(if e >= 1.0 { b } else { a }),
            _ => self.from,
        }
    }
}

/// Declarative tween over one or more targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub targets: Vec<ElementId>,
    pub tweens: Vec<PropTween>,
    pub duration: f32,
    #[serde(default)]
    pub delay: f32,
    #[serde(default)]
    pub ease: Ease,
    /// Extra start offset per target, index-aligned with `targets`.
    #[serde(default)]
    pub offsets: Vec<f32>,
}

impl TweenSpec {
    pub fn new(targets: Vec<ElementId>, tweens: Vec<PropTween>, duration: f32, ease: Ease) -> Self {
        Self {
            targets,
            tweens,
            duration: duration.max(0.0),
            delay: 0.0,
            ease,
            offsets: Vec::new(),
        }
    }

    #[inline]
    fn offset(&self, i: usize) -> f32 {
        self.offsets.get(i).copied().unwrap_or(0.0)
    }

    /// Time from play to the last target settling.
    pub fn total_duration(&self) -> f32 {
        let max_offset = (0..self.targets.len())
            .map(|i| self.offset(i))
            .fold(0.0f32, f32::max);
        self.delay + max_offset + self.duration
    }

    /// Eased progress of target `i` at playhead time `t`.
    pub fn progress_of(&self, i: usize, t: f32) -> f32 {
        let local = t - self.delay - self.offset(i);
        let raw = if self.duration <= 0.0 {
            if local >= 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        };
        self.ease.apply(raw)
    }

    /// Style writes for every target at playhead time `t`.
    pub fn sample_into(&self, t: f32, out: &mut Vec<StyleWrite>) {
        for (i, target) in self.targets.iter().enumerate() {
            let e = self.progress_of(i, t);
            for tw in &self.tweens {
                out.push(StyleWrite::new(*target, tw.property, tw.sample(e)));
            }
        }
    }

    pub fn sample(&self, t: f32) -> Vec<StyleWrite> {
        let mut out = Vec::with_capacity(self.targets.len() * self.tweens.len());
        self.sample_into(t, &mut out);
        out
    }

    /// End values for every target, written directly under reduced motion.
    pub fn final_writes(&self) -> Vec<StyleWrite> {
        self.targets
            .iter()
            .flat_map(|t| {
                self.tweens
                    .iter()
                    .map(move |tw| StyleWrite::new(*t, tw.property, tw.to))
            })
            .collect()
    }

    /// (element, property) pairs this spec drives.
    pub fn claims(&self) -> Vec<(ElementId, Property)> {
        self.targets
            .iter()
            .flat_map(|t| self.tweens.iter().map(move |tw| (*t, tw.property)))
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Paused,
}

/// Playhead over `[0, total]`. Stops itself at either end.
#[derive(Clone, Debug)]
pub struct Playhead {
    pub time: f32,
    pub total: f32,
    pub direction: Direction,
}

impl Playhead {
    pub fn new(total: f32) -> Self {
        Self {
            time: 0.0,
            total: total.max(0.0),
            direction: Direction::Paused,
        }
    }

    pub fn playing(total: f32) -> Self {
        let mut p = Self::new(total);
        p.direction = Direction::Forward;
        p
    }

    pub fn is_active(&self) -> bool {
        self.direction != Direction::Paused
    }

    pub fn is_complete(&self) -> bool {
        self.time >= self.total
    }

    /// Advance by `dt` seconds. Returns true when the time changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let before = self.time;
        match self.direction {
            Direction::Forward => {
                self.time = (self.time + dt.max(0.0)).min(self.total);
                if self.time >= self.total {
                    self.direction = Direction::Paused;
                }
            }
            Direction::Backward => {
                self.time = (self.time - dt.max(0.0)).max(0.0);
                if self.time <= 0.0 {
                    self.direction = Direction::Paused;
                }
            }
            Direction::Paused => {}
        }
        self.time != before
    }

    /// Apply a trigger action. Returns true when the time jumped.
    pub fn apply(&mut self, action: ToggleAction) -> bool {
        let before = self.time;
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => {
                if self.time < self.total {
                    self.direction = Direction::Forward;
                }
            }
            ToggleAction::Reverse => {
                if self.time > 0.0 {
                    self.direction = Direction::Backward;
                }
            }
            ToggleAction::Restart => {
                self.time = 0.0;
                self.direction = Direction::Forward;
            }
            ToggleAction::Reset => {
                self.time = 0.0;
                self.direction = Direction::Paused;
            }
            ToggleAction::Complete => {
                self.time = self.total;
                self.direction = Direction::Paused;
            }
            ToggleAction::Pause => self.direction = Direction::Paused,
        }
        self.time != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(targets: &[u32]) -> TweenSpec {
        TweenSpec::new(
            targets.iter().map(|i| ElementId(*i)).collect(),
            vec![PropTween::float(Property::Opacity, 0.0, 1.0)],
            1.0,
            Ease::Linear,
        )
    }

    #[test]
    fn offsets_extend_total_and_shift_targets() {
        let mut spec = fade(&[1, 2, 3]);
        spec.delay = 0.5;
        spec.offsets = vec![0.0, 0.1, 0.2];
        assert!((spec.total_duration() - 1.7).abs() < 1e-6);
        assert!((spec.progress_of(0, 1.0) - 0.5).abs() < 1e-6);
        assert!((spec.progress_of(2, 1.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_is_a_step() {
        let spec = TweenSpec::new(
            vec![ElementId(1)],
            vec![PropTween::new(
                Property::Visibility,
                Value::Bool(true),
                Value::Bool(false),
            )],
            0.0,
            Ease::Linear,
        );
        assert_eq!(spec.sample(0.0)[0].value, Value::Bool(false));
    }

    #[test]
    fn playhead_stops_at_ends_and_reverses() {
        let mut p = Playhead::playing(1.0);
        assert!(p.advance(0.6));
        assert!(p.advance(0.6));
        assert_eq!(p.time, 1.0);
        assert!(!p.is_active());
        assert!(!p.advance(0.1));
        p.apply(ToggleAction::Reverse);
        p.advance(5.0);
        assert_eq!(p.time, 0.0);
        assert!(!p.is_active());
        assert!(p.apply(ToggleAction::Complete));
        assert!(p.is_complete());
    }

    #[test]
    fn final_writes_use_end_values() {
        let spec = fade(&[7, 8]);
        let w = spec.final_writes();
        assert_eq!(w.len(), 2);
        assert!(w.iter().all(|w| w.value == Value::Float(1.0)));
        assert_eq!(spec.claims()[1], (ElementId(8), Property::Opacity));
    }
}
