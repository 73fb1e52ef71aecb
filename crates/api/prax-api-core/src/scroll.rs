//! Scroll state snapshot published by the smooth-scroll coordinator.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Down,
    Up,
}

/// Normalized scroll offset and velocity.
///
/// `position` is the eased offset that triggers must read; `target` is where
/// the coordinator is heading. Readers only ever get copies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub position: f32,
    pub target: f32,
    pub velocity: f32,
    pub direction: ScrollDirection,
    /// Maximum scroll offset (document height minus viewport height).
    pub limit: f32,
    pub is_scrolling: bool,
}

impl ScrollState {
    /// A resting state at `position`, as used by hosts without smoothing.
    pub fn at(position: f32, limit: f32) -> Self {
        let position = position.clamp(0.0, limit.max(0.0));
        Self {
            position,
            target: position,
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            limit: limit.max(0.0),
            is_scrolling: false,
        }
    }

    /// Progress through the document in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.limit <= 0.0 {
            return 0.0;
        }
        (self.position / self.limit).clamp(0.0, 1.0)
    }
}
