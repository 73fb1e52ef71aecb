//! Preloader progress.
//!
//! Progress only moves forward within `0..=100` and completes once. The
//! preloader component is the single writer and must hold a
//! [`ProgressWriter`].

use serde::{Deserialize, Serialize};

use prax_api_core::Subscription;

use crate::error::StoreError;
use crate::store::Store;
use crate::writer::{WriterClaim, WriterRole};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloaderState {
    pub is_loading: bool,
    pub progress: u8,
    pub is_complete: bool,
}

impl Default for PreloaderState {
    fn default() -> Self {
        Self {
            is_loading: true,
            progress: 0,
            is_complete: false,
        }
    }
}

impl PreloaderState {
    /// State for a session that already saw the preloader.
    pub fn skipped() -> Self {
        Self {
            is_loading: false,
            progress: 100,
            is_complete: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PreloaderStore {
    store: Store<PreloaderState>,
    progress: WriterRole,
}

impl PreloaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PreloaderState {
        self.store.snapshot()
    }

    pub fn subscribe(&self, f: impl Fn(&PreloaderState) + 'static) -> Subscription {
        self.store.subscribe(f)
    }

    pub fn is_complete(&self) -> bool {
        self.store.with(|s| s.is_complete)
    }

    pub fn claim_progress_writer(&self) -> Result<ProgressWriter, StoreError> {
        let claim = self.progress.claim("preloader-progress")?;
        Ok(ProgressWriter {
            store: self.store.clone(),
            _claim: claim,
        })
    }
}

/// Exclusive right to advance the preloader. Dropping frees the role.
#[derive(Debug)]
pub struct ProgressWriter {
    store: Store<PreloaderState>,
    _claim: WriterClaim,
}

impl ProgressWriter {
    /// Raise progress to `value` (clamped to 100). Lower values are ignored.
    pub fn set_progress(&self, value: u8) {
        let value = value.min(100);
        self.store.update(|s| {
            if !s.is_complete && value > s.progress {
                s.progress = value;
            }
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.store.update(|s| {
            if !s.is_complete {
                s.is_loading = loading;
            }
        });
    }

    /// Mark the load finished. Returns false if it already was.
    pub fn complete(&self) -> bool {
        let changed = self.store.update(|s| {
            if !s.is_complete {
                s.progress = 100;
                s.is_complete = true;
                s.is_loading = false;
            }
        });
        if changed {
            log::debug!("preloader complete");
        }
        changed
    }

    /// Jump straight to the completed state without playing the sequence.
    pub fn skip(&self) {
        self.store.update(|s| *s = PreloaderState::skipped());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn progress_is_monotonic_and_completes_once() {
        let store = PreloaderStore::new();
        let w = store.claim_progress_writer().unwrap();
        w.set_progress(40);
        w.set_progress(20);
        assert_eq!(store.snapshot().progress, 40);
        w.set_progress(250);
        assert_eq!(store.snapshot().progress, 100);

        let completions = Rc::new(Cell::new(0));
        let c = completions.clone();
        let _sub = store.subscribe(move |s| {
            if s.is_complete {
                c.set(c.get() + 1);
            }
        });
        assert!(w.complete());
        assert!(!w.complete());
        assert_eq!(completions.get(), 1);
        assert!(!store.snapshot().is_loading);
    }

    #[test]
    fn second_writer_is_refused() {
        let store = PreloaderStore::new();
        let _w = store.claim_progress_writer().unwrap();
        assert!(matches!(
            store.claim_progress_writer(),
            Err(StoreError::WriterClaimed(_))
        ));
    }
}
