//! Frame ticker: the single source of frame timing.
//!
//! Hosts call [`Ticker::tick`] once per animation frame with a monotonic
//! timestamp in milliseconds. Callbacks run in registration order; the list
//! is snapshotted first, so a callback may add or remove callbacks.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

type FrameFn = Rc<RefCell<dyn FnMut(f64)>>;

#[derive(Default)]
struct TickerInner {
    next: u64,
    callbacks: IndexMap<u64, FrameFn>,
    last_time: Option<f64>,
}

#[derive(Clone, Default)]
pub struct Ticker {
    inner: Rc<RefCell<TickerInner>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f(time_ms)` to run every frame.
    pub fn add(&self, f: impl FnMut(f64) + 'static) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next;
        inner.next += 1;
        inner.callbacks.insert(id, Rc::new(RefCell::new(f)));
        log::trace!("ticker: callback {id} added ({} total)", inner.callbacks.len());
        FrameToken {
            id,
            ticker: Rc::downgrade(&self.inner),
            removed: Cell::new(false),
        }
    }

    pub fn tick(&self, time_ms: f64) {
        let snapshot: Vec<FrameFn> = {
            let mut inner = self.inner.borrow_mut();
            if let Some(last) = inner.last_time {
                if time_ms < last {
                    log::warn!("ticker: time went backwards ({last} -> {time_ms})");
                }
            }
            inner.last_time = Some(time_ms);
            inner.callbacks.values().cloned().collect()
        };
        for cb in snapshot {
            // A callback that is already running (re-entrant tick) is skipped.
            if let Ok(mut f) = cb.try_borrow_mut() {
                f(time_ms);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_time(&self) -> Option<f64> {
        self.inner.borrow().last_time
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker").field("callbacks", &self.len()).finish()
    }
}

/// Keeps a frame callback registered; removal is idempotent and happens on drop.
#[must_use = "dropping a FrameToken removes the callback"]
pub struct FrameToken {
    id: u64,
    ticker: Weak<RefCell<TickerInner>>,
    removed: Cell<bool>,
}

impl FrameToken {
    pub fn remove(&self) {
        if self.removed.replace(true) {
            return;
        }
        if let Some(inner) = self.ticker.upgrade() {
            inner.borrow_mut().callbacks.shift_remove(&self.id);
            log::trace!("ticker: callback {} removed", self.id);
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }
}

impl Drop for FrameToken {
    fn drop(&mut self) {
        self.remove();
    }
}

impl fmt::Debug for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameToken")
            .field("id", &self.id)
            .field("removed", &self.removed.get())
            .finish()
    }
}
