//! Live bindings, their handles and the resources they hold.
//!
//! The engine owns every live binding in a creation-ordered table. The
//! component that created a binding owns its `BindingHandle`; disposing the
//! handle (explicitly or by dropping it) removes the binding and releases
//! its observers, listeners and frame callbacks. Disposal is idempotent.

use std::cell::{Cell, RefCell};
use std::ops::AddAssign;
use std::rc::Weak;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Point, Property, ScrollState, StyleBatch, StyleWrite, Surface};

use crate::engine::EngineState;
use crate::ids::BindingId;
use crate::outputs::MotionEvent;

/// Host resources a binding keeps registered while it is live.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Viewport-intersection / scroll observers.
    pub observers: u32,
    pub pointer_listeners: u32,
    pub resize_listeners: u32,
    pub frame_callbacks: u32,
}

impl Resources {
    pub const NONE: Resources = Resources {
        observers: 0,
        pointer_listeners: 0,
        resize_listeners: 0,
        frame_callbacks: 0,
    };

    pub fn is_empty(&self) -> bool {
        *self == Resources::NONE
    }

    pub fn total(&self) -> u32 {
        self.observers + self.pointer_listeners + self.resize_listeners + self.frame_callbacks
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Self) {
        self.observers += rhs.observers;
        self.pointer_listeners += rhs.pointer_listeners;
        self.resize_listeners += rhs.resize_listeners;
        self.frame_callbacks += rhs.frame_callbacks;
    }
}

/// Per-call sink handed to animators.
pub(crate) struct FrameCx<'a> {
    pub binding: BindingId,
    pub writes: &'a mut StyleBatch,
    pub events: &'a mut Vec<MotionEvent>,
}

impl FrameCx<'_> {
    #[inline]
    pub fn write(&mut self, w: StyleWrite) {
        self.writes.push(w);
    }

    pub fn write_all(&mut self, ws: impl IntoIterator<Item = StyleWrite>) {
        self.writes.extend(ws);
    }

    #[inline]
    pub fn event(&mut self, e: MotionEvent) {
        self.events.push(e);
    }
}

/// Behaviour behind one live binding. Every primitive provides one.
pub(crate) trait Animator {
    fn kind(&self) -> &'static str;

    /// (element, property) pairs this binding drives.
    fn claims(&self) -> Vec<(ElementId, Property)>;

    fn resources(&self) -> Resources;

    /// Called once when the binding goes live.
    fn start(&mut self, scroll: &ScrollState, cx: &mut FrameCx<'_>);

    fn on_scroll(&mut self, _scroll: &ScrollState, _cx: &mut FrameCx<'_>) {}

    fn tick(&mut self, _dt: f32, _cx: &mut FrameCx<'_>) {}

    /// Pointer position in document space, `None` when it left the window.
    fn on_pointer(&mut self, _pointer: Option<Point>, _cx: &mut FrameCx<'_>) {}

    /// Re-read layout after a resize or content change.
    fn remeasure(&mut self, _surface: &dyn Surface, _scroll: &ScrollState, _cx: &mut FrameCx<'_>) {}
}

pub(crate) struct Binding {
    pub id: BindingId,
    pub claims: Vec<(ElementId, Property)>,
    pub animator: Box<dyn Animator>,
}

/// Creation-ordered table of live bindings.
#[derive(Default)]
pub(crate) struct BindingTable {
    rows: IndexMap<BindingId, Binding>,
}

impl BindingTable {
    pub fn insert(&mut self, binding: Binding) {
        self.rows.insert(binding.id, binding);
    }

    /// Remove preserving the order of the rest.
    pub fn remove(&mut self, id: BindingId) -> Option<Binding> {
        self.rows.shift_remove(&id)
    }

    pub fn contains(&self, id: BindingId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Live bindings that drive any of `claims`.
    pub fn conflicting(&self, claims: &[(ElementId, Property)]) -> Vec<BindingId> {
        self.rows
            .values()
            .filter(|b| b.claims.iter().any(|c| claims.contains(c)))
            .map(|b| b.id)
            .collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Binding> {
        self.rows.values_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.rows.values()
    }
}

/// Owner's handle to a binding. Dropping it disposes the binding.
#[must_use = "dropping a BindingHandle disposes the binding immediately"]
pub struct BindingHandle {
    id: Option<BindingId>,
    engine: Weak<RefCell<EngineState>>,
    disposed: Cell<bool>,
}

impl BindingHandle {
    pub(crate) fn live(id: BindingId, engine: Weak<RefCell<EngineState>>) -> Self {
        Self {
            id: Some(id),
            engine,
            disposed: Cell::new(false),
        }
    }

    /// Handle for a primitive that registered nothing (detached target or
    /// reduced motion). Disposing it does nothing.
    pub fn inert() -> Self {
        Self {
            id: None,
            engine: Weak::new(),
            disposed: Cell::new(true),
        }
    }

    pub fn id(&self) -> Option<BindingId> {
        self.id
    }

    pub fn is_inert(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// True while the engine still runs this binding. A binding replaced by
    /// a newer one on the same element+property is no longer live.
    pub fn is_live(&self) -> bool {
        match (self.id, self.engine.upgrade()) {
            (Some(id), Some(engine)) if !self.disposed.get() => engine.borrow().table.contains(id),
            _ => false,
        }
    }

    /// Release the binding. Safe to call any number of times.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let (Some(id), Some(engine)) = (self.id, self.engine.upgrade()) else {
            return;
        };
        engine.borrow_mut().remove_binding(id);
    }
}

impl Drop for BindingHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for BindingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingHandle")
            .field("id", &self.id)
            .field("disposed", &self.disposed.get())
            .finish()
    }
}
