//! Scroll locks.
//!
//! While any `ScrollLock` is alive, user scroll input is ignored. Locks are
//! counted, so nested holders (menu plus a modal) release independently.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct ScrollLocks {
    count: Rc<Cell<u32>>,
}

impl ScrollLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, holder: &'static str) -> ScrollLock {
        self.count.set(self.count.get() + 1);
        log::debug!("scroll locked by {holder} ({} held)", self.count.get());
        ScrollLock {
            count: self.count.clone(),
            holder,
            released: Cell::new(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.count.get() > 0
    }

    pub fn held(&self) -> u32 {
        self.count.get()
    }
}

/// RAII guard; scroll input resumes once every guard is released.
#[must_use = "dropping a ScrollLock unlocks scrolling immediately"]
#[derive(Debug)]
pub struct ScrollLock {
    count: Rc<Cell<u32>>,
    holder: &'static str,
    released: Cell<bool>,
}

impl ScrollLock {
    pub fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        self.count.set(self.count.get().saturating_sub(1));
        log::debug!("scroll lock released by {} ({} held)", self.holder, self.count.get());
    }

    pub fn is_released(&self) -> bool {
        self.released.get()
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_and_idempotent() {
        let locks = ScrollLocks::new();
        let a = locks.acquire("menu");
        let b = locks.acquire("modal");
        a.release();
        a.release();
        assert!(locks.is_locked());
        drop(b);
        assert!(!locks.is_locked());
        drop(a);
        assert_eq!(locks.held(), 0);
    }
}
