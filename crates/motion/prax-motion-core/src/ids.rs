//! Identifiers and a simple allocator for bindings.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BindingId(pub u32);

/// Monotonic allocator. Ids are never reused within an engine, so a stale
/// handle can never dispose a newer binding.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_binding: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_binding(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding = self.next_binding.wrapping_add(1);
        id
    }
}
