//! Engine: owns live bindings and routes scroll, time and pointer input to them.
//!
//! Methods:
//! - new, scroll, tick, pointer, refresh, drain
//! - resources / live_bindings for leak checks
//!
//! The engine is single-threaded and cheap to clone; clones share state.
//! Primitives register through the crate-internal `install`/`skip` pair.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use prax_api_core::{Point, ScrollState, StyleWrite, Surface};

use crate::binding::{Animator, Binding, BindingHandle, BindingTable, FrameCx, Resources};
use crate::config::MotionConfig;
use crate::gate::MotionGate;
use crate::ids::{BindingId, IdAllocator};
use crate::outputs::{MotionEvent, Outputs, SkipReason};

/// Pointer input in client (viewport) coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    /// The pointer left the window.
    Leave,
}

pub(crate) struct EngineState {
    pub cfg: MotionConfig,
    pub ids: IdAllocator,
    pub table: BindingTable,
    pub pending: Outputs,
    pub scroll: ScrollState,
    /// Last pointer position in document space.
    pub pointer: Option<Point>,
}

impl EngineState {
    fn new(cfg: MotionConfig) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            table: BindingTable::default(),
            pending: Outputs::default(),
            scroll: ScrollState::default(),
            pointer: None,
        }
    }

    pub(crate) fn remove_binding(&mut self, id: BindingId) -> bool {
        match self.table.remove(id) {
            Some(b) => {
                log::debug!("binding {:?} ({}) disposed", id, b.animator.kind());
                self.pending
                    .push_event(MotionEvent::BindingDisposed { binding: id });
                true
            }
            None => false,
        }
    }

    fn bound_writes(&mut self) {
        let max = self.cfg.max_writes_per_drain;
        if max > 0 && self.pending.writes.len() > max {
            let before = self.pending.writes.len();
            self.pending.writes.compact();
            log::warn!(
                "style write buffer over {max}; compacted {before} -> {} (host is not draining)",
                self.pending.writes.len()
            );
        }
    }

    /// Run `f` on every live binding, in creation order.
    fn for_each(&mut self, mut f: impl FnMut(&mut dyn Animator, &mut FrameCx<'_>)) {
        let Outputs { writes, events } = &mut self.pending;
        for b in self.table.iter_mut() {
            let mut cx = FrameCx {
                binding: b.id,
                writes,
                events,
            };
            f(b.animator.as_mut(), &mut cx);
        }
        self.bound_writes();
    }
}

#[derive(Clone)]
pub struct MotionEngine {
    state: Rc<RefCell<EngineState>>,
    gate: MotionGate,
}

impl MotionEngine {
    pub fn new(cfg: MotionConfig, gate: MotionGate) -> Self {
        Self {
            state: Rc::new(RefCell::new(EngineState::new(cfg))),
            gate,
        }
    }

    pub fn gate(&self) -> &MotionGate {
        &self.gate
    }

    pub fn config(&self) -> MotionConfig {
        self.state.borrow().cfg.clone()
    }

    /// Whether new bindings will animate. Reads the gate lazily.
    pub fn should_animate(&self) -> bool {
        self.gate.should_animate()
    }

    /// Latest scroll state seen by the engine.
    pub fn scroll_state(&self) -> ScrollState {
        self.state.borrow().scroll
    }

    /// Feed a new scroll snapshot. Triggers and scrubs react synchronously.
    pub fn scroll(&self, scroll: ScrollState) {
        let mut st = self.state.borrow_mut();
        st.scroll = scroll;
        st.for_each(|a, cx| a.on_scroll(&scroll, cx));
    }

    /// Advance time-driven animations by `dt` seconds.
    pub fn tick(&self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        self.state.borrow_mut().for_each(|a, cx| a.tick(dt, cx));
    }

    pub fn pointer(&self, event: PointerEvent) {
        let mut st = self.state.borrow_mut();
        let doc = match event {
            PointerEvent::Move { x, y } => Some(Point::new(x, y + st.scroll.position)),
            PointerEvent::Leave => None,
        };
        st.pointer = doc;
        st.for_each(|a, cx| a.on_pointer(doc, cx));
    }

    /// Re-measure every binding after a resize or content change.
    pub fn refresh(&self, surface: &dyn Surface) {
        let mut st = self.state.borrow_mut();
        let mut scroll = st.scroll;
        scroll.limit = surface.scroll_limit();
        scroll.position = scroll.position.clamp(0.0, scroll.limit);
        st.scroll = scroll;
        log::debug!("refresh: {} live bindings", st.table.len());
        st.for_each(|a, cx| a.remeasure(surface, &scroll, cx));
    }

    /// Take everything produced since the previous drain.
    pub fn drain(&self) -> Outputs {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    /// Resources held by all live bindings.
    pub fn resources(&self) -> Resources {
        let st = self.state.borrow();
        let mut total = Resources::NONE;
        for b in st.table.iter() {
            total += b.animator.resources();
        }
        total
    }

    pub fn live_bindings(&self) -> usize {
        self.state.borrow().table.len()
    }

    pub fn is_live(&self, id: BindingId) -> bool {
        self.state.borrow().table.contains(id)
    }

    /// Register a running animator. Live bindings driving any of the same
    /// element+property pairs are disposed first.
    pub(crate) fn install(&self, mut animator: Box<dyn Animator>) -> BindingHandle {
        let mut st = self.state.borrow_mut();
        let id = st.ids.alloc_binding();
        let mut claims = animator.claims();
        claims.sort();
        claims.dedup();

        for old in st.table.conflicting(&claims) {
            st.table.remove(old);
            log::debug!("binding {old:?} replaced by {id:?}");
            st.pending
                .push_event(MotionEvent::BindingReplaced { old, new: id });
        }

        let kind = animator.kind();
        let scroll = st.scroll;
        {
            let Outputs { writes, events } = &mut st.pending;
            events.push(MotionEvent::BindingCreated {
                binding: id,
                kind: kind.to_string(),
            });
            let mut cx = FrameCx {
                binding: id,
                writes,
                events,
            };
            animator.start(&scroll, &mut cx);
        }
        st.table.insert(Binding {
            id,
            claims,
            animator,
        });
        st.bound_writes();
        log::debug!("binding {id:?} ({kind}) live");
        BindingHandle::live(id, Rc::downgrade(&self.state))
    }

    /// Record a primitive that registered nothing, writing `final_writes`
    /// so the element shows its end state.
    pub(crate) fn skip(
        &self,
        kind: &'static str,
        reason: SkipReason,
        final_writes: Vec<StyleWrite>,
    ) -> BindingHandle {
        let mut st = self.state.borrow_mut();
        log::debug!("{kind} skipped: {reason:?}");
        st.pending.writes.extend(final_writes);
        st.pending.push_event(MotionEvent::BindingSkipped {
            kind: kind.to_string(),
            reason,
        });
        st.bound_writes();
        BindingHandle::inert()
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(MotionConfig::default(), MotionGate::allow())
    }
}

impl std::fmt::Debug for MotionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionEngine")
            .field("live_bindings", &self.live_bindings())
            .field("gate", &self.gate)
            .finish()
    }
}
