//! Grouped cleanup for everything a component registers.
//!
//! A component collects its binding handles (and any extra teardown it
//! needs) into one `Scope`. Reverting the scope, or dropping it, releases
//! them in reverse creation order. Reverting twice is a no-op.

use crate::binding::BindingHandle;

enum Entry {
    Binding(BindingHandle),
    Cleanup(Box<dyn FnOnce()>),
}

#[derive(Default)]
pub struct Scope {
    name: &'static str,
    entries: Vec<Entry>,
    reverted: bool,
}

impl Scope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
            reverted: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Take ownership of a binding handle. Inert handles are dropped.
    pub fn add(&mut self, handle: BindingHandle) -> &mut Self {
        if self.reverted {
            log::warn!("scope '{}' already reverted; disposing late binding", self.name);
            handle.dispose();
        } else if !handle.is_inert() {
            self.entries.push(Entry::Binding(handle));
        }
        self
    }

    pub fn extend(&mut self, handles: impl IntoIterator<Item = BindingHandle>) -> &mut Self {
        for h in handles {
            self.add(h);
        }
        self
    }

    /// Run `f` when the scope reverts, in order with the bindings.
    pub fn on_revert(&mut self, f: impl FnOnce() + 'static) -> &mut Self {
        if self.reverted {
            f();
        } else {
            self.entries.push(Entry::Cleanup(Box::new(f)));
        }
        self
    }

    /// Absorb another scope; it reverts when this one does.
    pub fn adopt(&mut self, mut other: Scope) -> &mut Self {
        let entries = std::mem::take(&mut other.entries);
        other.reverted = true;
        if self.reverted {
            Self::release(entries);
        } else {
            self.entries.extend(entries);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_reverted(&self) -> bool {
        self.reverted
    }

    /// Handles still owned by this scope that the engine is running.
    pub fn live_bindings(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Binding(h) if h.is_live()))
            .count()
    }

    pub fn revert(&mut self) {
        if self.reverted {
            return;
        }
        self.reverted = true;
        let entries = std::mem::take(&mut self.entries);
        log::debug!("scope '{}' reverting {} entries", self.name, entries.len());
        Self::release(entries);
    }

    fn release(entries: Vec<Entry>) {
        for entry in entries.into_iter().rev() {
            match entry {
                Entry::Binding(h) => h.dispose(),
                Entry::Cleanup(f) => f(),
            }
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.revert();
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .field("reverted", &self.reverted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn cleanups_run_in_reverse_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = Scope::new("t");
        for i in 0..3 {
            let l = log.clone();
            scope.on_revert(move || l.borrow_mut().push(i));
        }
        scope.revert();
        scope.revert();
        drop(scope);
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn drop_reverts_and_inert_handles_are_ignored() {
        let hit = Rc::new(RefCell::new(false));
        {
            let mut scope = Scope::new("t");
            scope.add(BindingHandle::inert());
            assert!(scope.is_empty());
            let h = hit.clone();
            scope.on_revert(move || *h.borrow_mut() = true);
        }
        assert!(*hit.borrow());
    }
}
