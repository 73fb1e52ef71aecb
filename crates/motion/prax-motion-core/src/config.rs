//! Motion tokens and engine configuration.

use serde::{Deserialize, Serialize};

use crate::ease::Ease;
use crate::trigger::{Anchor, TriggerPoint};

/// Duration tokens in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub instant: f32,
    pub fast: f32,
    pub normal: f32,
    pub slow: f32,
    pub slower: f32,
    pub slowest: f32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            instant: 0.1,
            fast: 0.2,
            normal: 0.35,
            slow: 0.6,
            slower: 1.0,
            slowest: 1.4,
        }
    }
}

/// Engine-wide defaults. Every field can be omitted in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub durations: Durations,
    /// Ease for entrance tweens that do not name one.
    pub ease_out: Ease,
    pub ease_in_out: Ease,
    /// Default start for text/card reveals.
    pub reveal_start: TriggerPoint,
    /// Default start for image and grid reveals.
    pub media_start: TriggerPoint,
    /// Upper bound on style writes buffered between drains.
    pub max_writes_per_drain: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            ease_out: Ease::Power3Out,
            ease_in_out: Ease::Power2InOut,
            reveal_start: TriggerPoint::new(Anchor::Start, Anchor::Percent(85.0)),
            media_start: TriggerPoint::new(Anchor::Start, Anchor::Percent(80.0)),
            max_writes_per_drain: 8192,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: MotionConfig =
            serde_json::from_str(r#"{ "durations": { "slow": 0.7 }, "reveal_start": "top 90%" }"#)
                .unwrap();
        assert_eq!(cfg.durations.slow, 0.7);
        assert_eq!(cfg.durations.slowest, 1.4);
        assert_eq!(
            cfg.reveal_start,
            TriggerPoint::new(Anchor::Start, Anchor::Percent(90.0))
        );
        assert_eq!(cfg.ease_out, Ease::Power3Out);
    }
}
