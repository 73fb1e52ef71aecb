//! Per-session key/value storage, as the host's session storage exposes it.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

/// Key set once the preloader has played in this session.
pub const PRELOADER_SHOWN_KEY: &str = "preloaderShown";

pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    fn set_flag(&self, key: &str) {
        self.set(key, "true");
    }
}

/// In-memory storage. Clones share the same map, like two page mounts
/// within one browser session.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let a = MemorySessionStorage::new();
        let b = a.clone();
        assert!(!b.flag(PRELOADER_SHOWN_KEY));
        a.set_flag(PRELOADER_SHOWN_KEY);
        assert!(b.flag(PRELOADER_SHOWN_KEY));
        b.remove(PRELOADER_SHOWN_KEY);
        assert!(a.is_empty());
    }
}
