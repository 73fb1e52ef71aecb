//! Navigation state: menu open flag and header visibility.
//!
//! Any component may open or close the menu; a mounted menu controller
//! subscribes and locks page scroll while the flag is set. The header
//! fields have one writer, the scroll listener, which must hold a
//! [`HeaderWriter`].

use serde::{Deserialize, Serialize};

use prax_api_core::Subscription;

use crate::error::StoreError;
use crate::store::Store;
use crate::writer::{WriterClaim, WriterRole};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub is_menu_open: bool,
    pub is_header_visible: bool,
    pub is_header_solid: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            is_menu_open: false,
            is_header_visible: true,
            is_header_solid: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NavigationStore {
    store: Store<NavigationState>,
    header: WriterRole,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> NavigationState {
        self.store.snapshot()
    }

    pub fn subscribe(&self, f: impl Fn(&NavigationState) + 'static) -> Subscription {
        self.store.subscribe(f)
    }

    pub fn is_menu_open(&self) -> bool {
        self.store.with(|s| s.is_menu_open)
    }

    pub fn set_menu_open(&self, open: bool) {
        self.store.update(|s| s.is_menu_open = open);
    }

    pub fn toggle_menu(&self) {
        self.store.update(|s| s.is_menu_open = !s.is_menu_open);
    }

    /// Claim the header writer role.
    pub fn claim_header_writer(&self) -> Result<HeaderWriter, StoreError> {
        let claim = self.header.claim("header")?;
        Ok(HeaderWriter {
            store: self.store.clone(),
            _claim: claim,
        })
    }

    pub fn header_writer_claimed(&self) -> bool {
        self.header.is_claimed()
    }
}

/// Exclusive right to write the header fields. Dropping frees the role.
#[derive(Debug)]
pub struct HeaderWriter {
    store: Store<NavigationState>,
    _claim: WriterClaim,
}

impl HeaderWriter {
    pub fn set_visible(&self, visible: bool) {
        self.store.update(|s| s.is_header_visible = visible);
    }

    pub fn set_solid(&self, solid: bool) {
        self.store.update(|s| s.is_header_solid = solid);
    }
}
