//! PRAX Motion Core (engine-agnostic)
//!
//! Declarative animation primitives (reveal, clip, stagger, scrub, pin,
//! magnetic, marquee, timeline) bound to host elements through a
//! single-threaded [`MotionEngine`]. Every primitive has a pure sampler so
//! its output can be checked against a synthetic time or scroll value, and
//! every binding is released through an idempotent [`BindingHandle`].

pub mod binding;
pub mod config;
pub mod ease;
pub mod engine;
pub mod error;
pub mod gate;
pub mod ids;
pub mod outputs;
pub mod primitives;
pub mod scope;
pub mod trigger;
pub mod tween;

pub use binding::{BindingHandle, Resources};
pub use config::{Durations, MotionConfig};
pub use ease::Ease;
pub use engine::{MotionEngine, PointerEvent};
pub use error::MotionError;
pub use gate::{FixedPreference, MotionGate, ReducedMotionSource};
pub use ids::BindingId;
pub use outputs::{MotionEvent, Outputs};
pub use primitives::BindingSpec;
pub use scope::Scope;
pub use trigger::{Anchor, ToggleAction, ToggleActions, TriggerConfig, TriggerEnd, TriggerPoint};
pub use tween::{PropTween, TweenSpec};

pub use prax_api_core::{
    ElementId, Inset, LayoutSurface, Point, Property, Rect, ScrollState, StyleBatch, StyleWrite,
    Surface, Value, Viewport,
};
