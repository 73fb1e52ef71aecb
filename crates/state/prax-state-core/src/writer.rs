//! Claimable single-writer roles.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::StoreError;

#[derive(Clone, Debug, Default)]
pub(crate) struct WriterRole {
    claimed: Rc<Cell<bool>>,
}

impl WriterRole {
    pub(crate) fn claim(&self, role: &'static str) -> Result<WriterClaim, StoreError> {
        if self.claimed.replace(true) {
            return Err(StoreError::WriterClaimed(role.to_string()));
        }
        log::debug!("writer role '{role}' claimed");
        Ok(WriterClaim {
            claimed: self.claimed.clone(),
            role,
        })
    }

    pub(crate) fn is_claimed(&self) -> bool {
        self.claimed.get()
    }
}

/// Held by a writer token; dropping frees the role.
#[derive(Debug)]
pub(crate) struct WriterClaim {
    claimed: Rc<Cell<bool>>,
    role: &'static str,
}

impl Drop for WriterClaim {
    fn drop(&mut self) {
        self.claimed.set(false);
        log::debug!("writer role '{}' released", self.role);
    }
}
