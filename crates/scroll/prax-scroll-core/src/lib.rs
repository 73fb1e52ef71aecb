//! PRAX Scroll Core
//!
//! A frame [`Ticker`] and the smooth-scroll [`ScrollCoordinator`] it drives.
//! The coordinator eases the page's scroll offset toward a target fed by
//! wheel, touch and programmatic input, and publishes every change as a
//! [`ScrollState`] snapshot.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod lock;
pub mod ticker;

pub use config::{GestureOrientation, Orientation, SmoothScrollConfig};
pub use coordinator::{CoordinatorHandle, ScrollCoordinator, ScrollTarget, ScrollToOptions, WheelDelta};
pub use error::ScrollError;
pub use lock::{ScrollLock, ScrollLocks};
pub use ticker::{FrameToken, Ticker};

pub use prax_api_core::{ScrollDirection, ScrollState, Subscription};
