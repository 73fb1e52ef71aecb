//! Error types for the motion layer.
//!
//! Only host misuse surfaces as an error. Missing elements, reduced motion and
//! repeated disposal are not errors; they degrade to the static final layout.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// Unparsable trigger position such as `"top eighty"`.
    #[error("Invalid trigger '{input}': {reason}")]
    InvalidTrigger { input: String, reason: String },

    /// Malformed configuration value (ease name, stagger amount, ...).
    #[error("Invalid config: {0}")]
    Config(String),

    /// Layout data rejected by the surface.
    #[error("Surface error: {0}")]
    Surface(String),
}

impl From<prax_api_core::SurfaceError> for MotionError {
    fn from(e: prax_api_core::SurfaceError) -> Self {
        MotionError::Surface(e.to_string())
    }
}
