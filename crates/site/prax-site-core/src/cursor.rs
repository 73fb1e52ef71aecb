//! Custom cursor visuals.
//!
//! The cursor is a dot that tracks the pointer exactly and a ring that
//! trails it. Each [`CursorVariant`] maps to dot/ring scale and opacity
//! targets plus an optional label.

use prax_api_core::Point;
use prax_motion_core::{Ease, MotionGate};
use prax_state_core::{CursorState, CursorVariant};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Visual {
    pub scale: f32,
    pub opacity: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Visual {
    const fn new(scale: f32, opacity: f32, duration: f32, ease: Ease) -> Self {
        Self {
            scale,
            opacity,
            duration,
            ease,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorVisuals {
    pub dot: Visual,
    pub ring: Visual,
    pub label: Option<String>,
}

impl CursorVisuals {
    pub fn for_state(state: &CursorState) -> Self {
        let (dot, ring, labelled) = match state.variant {
            CursorVariant::Default => (
                Visual::new(1.0, 1.0, 0.3, Ease::Power2Out),
                Visual::new(1.0, 0.5, 0.3, Ease::Power2Out),
                false,
            ),
            CursorVariant::Hover => (
                Visual::new(0.5, 1.0, 0.3, Ease::BackOut(2.0)),
                Visual::new(1.5, 1.0, 0.3, Ease::BackOut(2.0)),
                false,
            ),
            CursorVariant::Text | CursorVariant::View | CursorVariant::Drag => (
                Visual::new(0.0, 0.0, 0.2, Ease::default()),
                Visual::new(2.5, 1.0, 0.3, Ease::BackOut(1.5)),
                true,
            ),
            CursorVariant::Link => (
                Visual::new(0.3, 1.0, 0.3, Ease::default()),
                Visual::new(1.8, 0.8, 0.3, Ease::BackOut(2.0)),
                false,
            ),
            CursorVariant::ArrowLeft | CursorVariant::ArrowRight => (
                Visual::new(0.0, 0.0, 0.2, Ease::default()),
                Visual::new(2.0, 1.0, 0.3, Ease::default()),
                true,
            ),
            CursorVariant::Hidden => (
                Visual::new(0.0, 0.0, 0.2, Ease::default()),
                Visual::new(0.0, 0.0, 0.2, Ease::default()),
                false,
            ),
        };
        let label = if labelled {
            state.label().map(str::to_string)
        } else {
            None
        };
        let (dot, ring) = if state.is_visible {
            (dot, ring)
        } else {
            (Visual { opacity: 0.0, ..dot }, Visual { opacity: 0.0, ..ring })
        };
        Self { dot, ring, label }
    }
}

/// The custom cursor is not rendered on touch devices or under reduced motion.
pub fn cursor_enabled(is_touch: bool, gate: &MotionGate) -> bool {
    !is_touch && gate.should_animate()
}

/// Ring position trailing the pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    pub dot: Point,
    pub ring: Point,
    from: Point,
    elapsed: f32,
    duration: f32,
}

impl CursorFollower {
    pub const TRAIL: f32 = 0.15;

    pub fn new(at: Point) -> Self {
        Self {
            dot: at,
            ring: at,
            from: at,
            elapsed: Self::TRAIL,
            duration: Self::TRAIL,
        }
    }

    /// The dot jumps; the ring restarts its glide from where it is.
    pub fn pointer_moved(&mut self, to: Point) {
        self.from = self.ring;
        self.dot = to;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.elapsed >= self.duration || dt <= 0.0 {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let e = Ease::Power2Out.apply(self.elapsed / self.duration);
        self.ring = Point::new(
            self.from.x + (self.dot.x - self.from.x) * e,
            self.from.y + (self.dot.y - self.from.y) * e,
        );
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prax_motion_core::FixedPreference;

    #[test]
    fn view_shows_label_and_hides_dot() {
        let v = CursorVisuals::for_state(&CursorState {
            variant: CursorVariant::View,
            ..CursorState::default()
        });
        assert_eq!(v.dot.scale, 0.0);
        assert_eq!(v.ring.scale, 2.5);
        assert_eq!(v.label.as_deref(), Some("View"));

        let v = CursorVisuals::for_state(&CursorState::default());
        assert_eq!(v.ring.opacity, 0.5);
        assert_eq!(v.label, None);
    }

    #[test]
    fn ring_trails_then_settles() {
        let mut f = CursorFollower::new(Point::new(0.0, 0.0));
        f.pointer_moved(Point::new(100.0, 0.0));
        assert_eq!(f.dot.x, 100.0);
        f.tick(0.05);
        assert!(f.ring.x > 0.0 && f.ring.x < 100.0);
        f.tick(0.2);
        assert!(f.is_settled());
        assert_eq!(f.ring.x, 100.0);
    }

    #[test]
    fn disabled_on_touch_or_reduced_motion() {
        assert!(cursor_enabled(false, &MotionGate::allow()));
        assert!(!cursor_enabled(true, &MotionGate::allow()));
        assert!(!cursor_enabled(false, &MotionGate::new(FixedPreference(Some(true)))));
    }
}
