//! prax-api-core: shared vocabulary for the PRAX motion layer (engine-agnostic)
//!
//! Elements are opaque ids laid out on a [`Surface`]; animations describe
//! their effect as [`StyleWrite`]s batched per tick; the scroll coordinator
//! publishes a [`ScrollState`] snapshot that every trigger calculation reads.

pub mod element;
pub mod listeners;
pub mod scroll;
pub mod style;
pub mod surface;
pub mod value;

pub use element::{ElementId, Point, Rect, Viewport};
pub use listeners::{Listeners, Subscription};
pub use scroll::{ScrollDirection, ScrollState};
pub use style::{StyleBatch, StyleWrite};
pub use surface::{LayoutSurface, Surface, SurfaceError};
pub use value::{Inset, Property, Value};
