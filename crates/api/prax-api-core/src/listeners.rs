//! Listener lists with RAII subscriptions.
//!
//! Listeners run in subscription order. Emitting clones the list first, so a
//! listener may subscribe or unsubscribe (itself included) while running.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next: u64,
    entries: IndexMap<u64, Callback<T>>,
}

pub struct Listeners<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next: 0,
                entries: IndexMap::new(),
            })),
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next;
            reg.next += 1;
            reg.entries.insert(id, Rc::new(f));
            id
        };
        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            closed: Cell::new(false),
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().entries.shift_remove(&id);
                }
            })),
        }
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self.inner.borrow().entries.values().cloned().collect();
        for cb in snapshot {
            cb(value);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener. Outstanding subscriptions become no-ops.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.inner.borrow().entries.len())
            .finish()
    }
}

/// Keeps a listener registered. Closing is idempotent; dropping closes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    closed: Cell<bool>,
    release: Option<Box<dyn Fn()>>,
}

impl Subscription {
    /// A subscription to nothing, for callers that had nothing to register.
    pub fn empty() -> Self {
        Self {
            closed: Cell::new(true),
            release: None,
        }
    }

    pub fn close(&self) {
        if self.closed.replace(true) {
            return;
        }
        if let Some(release) = &self.release {
            release();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.closed.get())
            .finish()
    }
}
