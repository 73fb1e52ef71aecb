//! Smooth-scroll coordinator.
//!
//! Wheel, touch and programmatic input move a scroll *target*; each frame
//! the eased *position* glides toward it over `duration` seconds. Every new
//! input restarts the glide from wherever the position currently is, so
//! rapid wheel ticks accumulate into one smooth motion.
//!
//! One coordinator may be active per event-loop thread.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use prax_api_core::{Listeners, Rect, ScrollDirection, ScrollState, Subscription};
use prax_motion_core::Ease;

use crate::config::{GestureOrientation, SmoothScrollConfig};
use crate::error::ScrollError;
use crate::lock::ScrollLocks;
use crate::ticker::{FrameToken, Ticker};

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Raw wheel deltas in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    pub x: f32,
    pub y: f32,
}

/// Where `scroll_to` should go.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScrollTarget {
    Offset(f32),
    Top,
    Bottom,
    /// The leading edge of an element, in document coordinates.
    Element(Rect),
}

impl From<f32> for ScrollTarget {
    fn from(v: f32) -> Self {
        ScrollTarget::Offset(v)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollToOptions {
    /// Added to the resolved target.
    pub offset: f32,
    /// Seconds; `None` uses the configured duration.
    pub duration: Option<f32>,
    /// Jump without easing.
    pub immediate: bool,
    /// Scroll even while a scroll lock is held.
    pub force: bool,
}

impl Default for ScrollToOptions {
    fn default() -> Self {
        Self {
            offset: 0.0,
            duration: None,
            immediate: false,
            force: false,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Glide {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    ease: Ease,
}

impl Glide {
    fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let e = self.ease.apply(t);
        self.from + (self.to - self.from) * e
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

struct CoordinatorState {
    config: SmoothScrollConfig,
    scroll: ScrollState,
    glide: Option<Glide>,
    last_time: Option<f64>,
    locks: ScrollLocks,
}

impl CoordinatorState {
    fn clamp(&self, y: f32) -> f32 {
        y.clamp(0.0, self.scroll.limit)
    }

    /// Move to `y` now. Returns true when the position changed.
    fn jump(&mut self, y: f32) -> bool {
        let y = self.clamp(y);
        let before = self.scroll.position;
        self.glide = None;
        self.scroll.velocity = y - before;
        self.scroll.position = y;
        self.scroll.target = y;
        self.scroll.direction = direction_of(self.scroll.velocity, self.scroll.direction);
        self.scroll.is_scrolling = false;
        y != before
    }

    fn glide_to(&mut self, y: f32, duration: f32) {
        let to = self.clamp(y);
        self.scroll.target = to;
        self.glide = Some(Glide {
            from: self.scroll.position,
            to,
            elapsed: 0.0,
            duration,
            ease: self.config.easing,
        });
        self.scroll.is_scrolling = true;
    }

    /// Advance the glide. Returns true when the position changed.
    fn frame(&mut self, time_ms: f64) -> bool {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);
        let Some(glide) = self.glide.as_mut() else {
            return false;
        };
        glide.elapsed += dt;
        let next = glide.value();
        let done = glide.is_done();
        let before = self.scroll.position;
        self.scroll.position = next;
        self.scroll.velocity = next - before;
        self.scroll.direction = direction_of(self.scroll.velocity, self.scroll.direction);
        if done {
            self.glide = None;
            self.scroll.is_scrolling = false;
            self.scroll.velocity = 0.0;
        }
        next != before || done
    }
}

fn direction_of(velocity: f32, previous: ScrollDirection) -> ScrollDirection {
    if velocity > 0.0 {
        ScrollDirection::Down
    } else if velocity < 0.0 {
        ScrollDirection::Up
    } else {
        previous
    }
}

pub struct ScrollCoordinator;

impl ScrollCoordinator {
    /// Start the coordinator on `ticker` with its own lock registry.
    pub fn start(config: SmoothScrollConfig, ticker: &Ticker) -> Result<CoordinatorHandle, ScrollError> {
        Self::start_with_locks(config, ticker, ScrollLocks::new())
    }

    /// Start the coordinator, ignoring user input while `locks` is held.
    pub fn start_with_locks(
        config: SmoothScrollConfig,
        ticker: &Ticker,
        locks: ScrollLocks,
    ) -> Result<CoordinatorHandle, ScrollError> {
        config.validate()?;
        if ACTIVE.with(|a| a.replace(true)) {
            return Err(ScrollError::AlreadyActive);
        }
        let state = Rc::new(RefCell::new(CoordinatorState {
            config,
            scroll: ScrollState::default(),
            glide: None,
            last_time: None,
            locks,
        }));
        let listeners: Listeners<ScrollState> = Listeners::new();

        let weak: Weak<RefCell<CoordinatorState>> = Rc::downgrade(&state);
        let emit_to = listeners.clone();
        let frame = ticker.add(move |time_ms| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let changed = state.borrow_mut().frame(time_ms);
            if changed {
                let snapshot = state.borrow().scroll;
                log::trace!("scroll frame: {:.1}", snapshot.position);
                emit_to.emit(&snapshot);
            }
        });
        log::debug!("smooth-scroll coordinator started");
        Ok(CoordinatorHandle {
            state,
            listeners,
            frame: RefCell::new(Some(frame)),
            disposed: Cell::new(false),
        })
    }

    /// Whether a coordinator is active on this thread.
    pub fn is_active() -> bool {
        ACTIVE.with(|a| a.get())
    }
}

/// Owner's handle to the active coordinator. Dropping it disposes.
#[must_use = "dropping the handle stops smooth scrolling"]
pub struct CoordinatorHandle {
    state: Rc<RefCell<CoordinatorState>>,
    listeners: Listeners<ScrollState>,
    frame: RefCell<Option<FrameToken>>,
    disposed: Cell<bool>,
}

impl CoordinatorHandle {
    /// Current scroll snapshot.
    pub fn state(&self) -> ScrollState {
        self.state.borrow().scroll
    }

    pub fn config(&self) -> SmoothScrollConfig {
        self.state.borrow().config.clone()
    }

    pub fn locks(&self) -> ScrollLocks {
        self.state.borrow().locks.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Listen for position changes.
    pub fn on_scroll(&self, f: impl Fn(&ScrollState) + 'static) -> Subscription {
        if self.disposed.get() {
            return Subscription::empty();
        }
        self.listeners.subscribe(f)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether a frame callback is registered.
    pub fn has_frame_callback(&self) -> bool {
        self.frame.borrow().is_some()
    }

    fn emit_now(&self) {
        let snapshot = self.state.borrow().scroll;
        self.listeners.emit(&snapshot);
    }

    fn accepts_input(&self) -> bool {
        !self.disposed.get() && !self.state.borrow().locks.is_locked()
    }

    /// New maximum offset after layout changes.
    pub fn resize(&self, limit: f32) {
        let changed = {
            let mut st = self.state.borrow_mut();
            st.scroll.limit = limit.max(0.0);
            let pos = st.clamp(st.scroll.position);
            if let Some(g) = st.glide.as_mut() {
                g.to = g.to.clamp(0.0, limit.max(0.0));
            }
            st.scroll.target = st.clamp(st.scroll.target);
            if pos != st.scroll.position {
                st.scroll.position = pos;
                true
            } else {
                false
            }
        };
        if changed {
            self.emit_now();
        }
    }

    pub fn wheel(&self, delta: WheelDelta) {
        if !self.accepts_input() {
            return;
        }
        let (smooth, duration) = {
            let st = self.state.borrow();
            (st.config.smooth_wheel, st.config.duration)
        };
        let d = {
            let st = self.state.borrow();
            let raw = match st.config.gesture_orientation {
                GestureOrientation::Vertical => delta.y,
                GestureOrientation::Horizontal => delta.x,
                GestureOrientation::Both => {
                    if delta.x.abs() > delta.y.abs() {
                        delta.x
                    } else {
                        delta.y
                    }
                }
            };
            raw * st.config.wheel_multiplier
        };
        if d == 0.0 {
            return;
        }
        if smooth {
            let mut st = self.state.borrow_mut();
            let target = st.scroll.target + d;
            st.glide_to(target, duration);
        } else {
            let changed = {
                let mut st = self.state.borrow_mut();
                let y = st.scroll.position + d;
                st.jump(y)
            };
            if changed {
                self.emit_now();
            }
        }
    }

    /// Touch drag by `delta` pixels; follows the finger without easing.
    pub fn touch(&self, delta: f32) {
        if !self.accepts_input() {
            return;
        }
        let changed = {
            let mut st = self.state.borrow_mut();
            let y = st.scroll.position + delta * st.config.touch_multiplier;
            st.jump(y)
        };
        if changed {
            self.emit_now();
        }
    }

    /// The host scrolled natively (keyboard, scrollbar). Ignored mid-glide.
    pub fn native_scroll(&self, position: f32) {
        if self.disposed.get() {
            return;
        }
        let changed = {
            let mut st = self.state.borrow_mut();
            if st.glide.is_some() {
                return;
            }
            st.jump(position)
        };
        if changed {
            self.emit_now();
        }
    }

    pub fn scroll_to(&self, target: impl Into<ScrollTarget>, opts: ScrollToOptions) {
        if self.disposed.get() {
            return;
        }
        if !opts.force && self.state.borrow().locks.is_locked() {
            log::debug!("scroll_to ignored while scroll is locked");
            return;
        }
        let y = {
            let st = self.state.borrow();
            let base = match target.into() {
                ScrollTarget::Offset(v) => v,
                ScrollTarget::Top => 0.0,
                ScrollTarget::Bottom => st.scroll.limit,
                ScrollTarget::Element(rect) => rect.top(),
            };
            base + opts.offset
        };
        if opts.immediate {
            let changed = self.state.borrow_mut().jump(y);
            if changed {
                self.emit_now();
            }
        } else {
            let mut st = self.state.borrow_mut();
            let duration = opts.duration.unwrap_or(st.config.duration).max(0.0);
            st.glide_to(y, duration);
        }
    }

    /// Stop any glide where it is.
    pub fn stop(&self) {
        let mut st = self.state.borrow_mut();
        st.glide = None;
        st.scroll.target = st.scroll.position;
        st.scroll.velocity = 0.0;
        st.scroll.is_scrolling = false;
    }

    /// Remove the frame callback and every listener. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(token) = self.frame.borrow_mut().take() {
            token.remove();
        }
        self.listeners.clear();
        ACTIVE.with(|a| a.set(false));
        log::debug!("smooth-scroll coordinator disposed");
    }
}

impl Drop for CoordinatorHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for CoordinatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorHandle")
            .field("state", &self.state())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glide_uses_the_scroll_curve() {
        let g = Glide {
            from: 0.0,
            to: 1000.0,
            elapsed: 0.14,
            duration: 1.4,
            ease: Ease::ScrollExpo,
        };
        // 1.001 - 2^-1 = 0.501
        assert!((g.value() - 501.0).abs() < 0.1);
        let done = Glide { elapsed: 1.4, ..g };
        assert_eq!(done.value(), 1000.0);
        assert!(done.is_done());
    }

    #[test]
    fn direction_keeps_last_when_idle() {
        assert_eq!(direction_of(3.0, ScrollDirection::Idle), ScrollDirection::Down);
        assert_eq!(direction_of(0.0, ScrollDirection::Up), ScrollDirection::Up);
    }
}
