//! Generic observable store.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use prax_api_core::{Listeners, Subscription};

/// Shared state with change notification.
///
/// Cloning yields another handle to the same state. Subscribers run after
/// a mutation actually changed the state, never for no-op writes.
pub struct Store<S> {
    state: Rc<RefCell<S>>,
    listeners: Listeners<S>,
}

impl<S: Clone + PartialEq + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(initial)),
            listeners: Listeners::new(),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// Read without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.state.borrow())
    }

    /// Apply `f` and notify subscribers if the state changed.
    /// Returns whether it did.
    pub fn update(&self, f: impl FnOnce(&mut S)) -> bool {
        let after = {
            let mut st = self.state.borrow_mut();
            let before = st.clone();
            f(&mut *st);
            if *st == before {
                return false;
            }
            st.clone()
        };
        self.listeners.emit(&after);
        true
    }

    pub fn subscribe(&self, f: impl Fn(&S) + 'static) -> Subscription {
        self.listeners.subscribe(f)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<S: Clone + PartialEq + Default + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_only_on_change() {
        let store = Store::new(0u32);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = store.subscribe(move |_| h.set(h.get() + 1));

        assert!(store.update(|v| *v = 3));
        assert!(!store.update(|v| *v = 3));
        assert_eq!(hits.get(), 1);

        sub.close();
        sub.close();
        store.update(|v| *v = 4);
        assert_eq!(hits.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_may_read_the_store() {
        let store = Store::new(String::new());
        let seen = Rc::new(RefCell::new(String::new()));
        let (s, out) = (store.clone(), seen.clone());
        let _sub = store.subscribe(move |_| *out.borrow_mut() = s.snapshot());
        store.update(|v| v.push_str("view"));
        assert_eq!(*seen.borrow(), "view");
    }
}
