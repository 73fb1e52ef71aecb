//! Motion preference gate.
//!
//! The host's reduced-motion signal only exists once a rendering surface
//! does, so the gate reads it on first use and then keeps that answer for
//! the rest of the page view.

use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

/// Source of the host accessibility signal.
pub trait ReducedMotionSource {
    /// `Some(true)` when the user asked for reduced motion, `None` when the
    /// signal is unavailable (non-interactive environment).
    fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// A source with a fixed answer, for hosts that resolve the signal up front
/// and for tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedPreference(pub Option<bool>);

impl ReducedMotionSource for FixedPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.0
    }
}

impl<F> ReducedMotionSource for F
where
    F: Fn() -> Option<bool>,
{
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self()
    }
}

struct GateInner {
    source: Box<dyn ReducedMotionSource>,
    resolved: OnceCell<bool>,
}

/// Shared, lazily evaluated answer to "may anything animate?".
#[derive(Clone)]
pub struct MotionGate {
    inner: Rc<GateInner>,
}

impl MotionGate {
    pub fn new(source: impl ReducedMotionSource + 'static) -> Self {
        Self {
            inner: Rc::new(GateInner {
                source: Box::new(source),
                resolved: OnceCell::new(),
            }),
        }
    }

    /// Gate that always allows motion.
    pub fn allow() -> Self {
        Self::new(FixedPreference(Some(false)))
    }

    /// Gate that always reports reduced motion.
    pub fn reduced() -> Self {
        Self::new(FixedPreference(Some(true)))
    }

    pub fn should_animate(&self) -> bool {
        *self.inner.resolved.get_or_init(|| {
            let reduced = self.inner.source.prefers_reduced_motion().unwrap_or(false);
            log::debug!("motion gate resolved: reduced_motion={reduced}");
            !reduced
        })
    }

    /// Whether the signal has been read yet.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.get().is_some()
    }
}

impl fmt::Debug for MotionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionGate")
            .field("resolved", &self.inner.resolved.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn unavailable_signal_allows_motion() {
        assert!(MotionGate::new(FixedPreference(None)).should_animate());
        assert!(!MotionGate::reduced().should_animate());
    }

    #[test]
    fn signal_is_read_lazily_and_once() {
        let reads = Rc::new(Cell::new(0));
        let counter = reads.clone();
        let gate = MotionGate::new(move || {
            counter.set(counter.get() + 1);
            Some(true)
        });
        assert!(!gate.is_resolved());
        assert_eq!(reads.get(), 0);
        assert!(!gate.should_animate());
        assert!(!gate.clone().should_animate());
        assert_eq!(reads.get(), 1);
    }
}
