//! Smooth-scroll configuration.

use serde::{Deserialize, Serialize};

use prax_motion_core::Ease;

use crate::error::ScrollError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Which wheel axis drives scrolling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOrientation {
    #[default]
    Vertical,
    Horizontal,
    /// Whichever axis moved more.
    Both,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Seconds for one eased glide toward the target.
    pub duration: f32,
    pub easing: Ease,
    pub orientation: Orientation,
    pub gesture_orientation: GestureOrientation,
    /// When false, wheel input moves the page immediately.
    pub smooth_wheel: bool,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.4,
            easing: Ease::ScrollExpo,
            orientation: Orientation::Vertical,
            gesture_orientation: GestureOrientation::Vertical,
            smooth_wheel: true,
            wheel_multiplier: 0.8,
            touch_multiplier: 1.5,
        }
    }
}

impl SmoothScrollConfig {
    pub fn validate(&self) -> Result<(), ScrollError> {
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(ScrollError::Config(format!(
                "duration must be finite and >= 0, got {}",
                self.duration
            )));
        }
        for (name, m) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !m.is_finite() {
                return Err(ScrollError::Config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_feel() {
        let cfg = SmoothScrollConfig::default();
        assert_eq!(cfg.duration, 1.4);
        assert_eq!(cfg.wheel_multiplier, 0.8);
        assert_eq!(cfg.touch_multiplier, 1.5);
        assert!(cfg.smooth_wheel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_overrides_and_validation() {
        let cfg: SmoothScrollConfig =
            serde_json::from_str(r#"{ "duration": 0.8, "easing": "power2.out" }"#).unwrap();
        assert_eq!(cfg.easing, Ease::Power2Out);
        assert_eq!(cfg.orientation, Orientation::Vertical);
        let bad = SmoothScrollConfig {
            duration: f32::NAN,
            ..cfg
        };
        assert!(matches!(bad.validate(), Err(ScrollError::Config(_))));
    }
}
