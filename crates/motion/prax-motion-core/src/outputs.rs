//! Output contracts from the motion engine.
//!
//! Outputs carry the style writes produced since the last drain, keyed by
//! element and property, and a separate list of lifecycle events. Hosts
//! apply the writes to their rendering surface and may log the events.

use serde::{Deserialize, Serialize};

use prax_api_core::StyleBatch;

use crate::ids::BindingId;
use crate::trigger::TriggerCallback;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// None of the targets were attached to the surface.
    Detached,
    /// The motion gate reported reduced motion; final state was written.
    ReducedMotion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionEvent {
    BindingCreated {
        binding: BindingId,
        kind: String,
    },
    /// `old` drove an element+property that `new` now drives.
    BindingReplaced {
        old: BindingId,
        new: BindingId,
    },
    BindingDisposed {
        binding: BindingId,
    },
    BindingSkipped {
        kind: String,
        reason: SkipReason,
    },
    TriggerFired {
        binding: BindingId,
        callback: TriggerCallback,
    },
    Completed {
        binding: BindingId,
    },
    /// Scroll distance a pinned section consumes, after each measure.
    PinMeasured {
        binding: BindingId,
        distance: f32,
    },
    PointerEntered {
        binding: BindingId,
    },
    PointerLeft {
        binding: BindingId,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub writes: StyleBatch,
    #[serde(default)]
    pub events: Vec<MotionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.writes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: MotionEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.events.is_empty()
    }

    /// Number of trigger callbacks of kind `cb` fired by `binding`.
    pub fn trigger_count(&self, binding: BindingId, cb: TriggerCallback) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(e, MotionEvent::TriggerFired { binding: b, callback } if *b == binding && *callback == cb)
            })
            .count()
    }
}
