//! Background media playback state.
//!
//! Media starts `Loading`. The first frame of data moves it to `Playing`;
//! a load error or a rejected autoplay drops to `Fallback`, which shows the
//! poster image. Fallback is terminal for the mount.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MediaState {
    Loading,
    Playing,
    Fallback { poster: Option<String> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEvent {
    LoadedData,
    Error,
    AutoplayRejected,
}

impl MediaState {
    pub fn new() -> Self {
        MediaState::Loading
    }

    /// Next state after `event`. `poster` is shown if playback fails.
    pub fn on_event(self, event: MediaEvent, poster: Option<&str>) -> Self {
        match (self, event) {
            (MediaState::Loading, MediaEvent::LoadedData) => MediaState::Playing,
            (MediaState::Fallback { poster }, _) => MediaState::Fallback { poster },
            (_, MediaEvent::Error | MediaEvent::AutoplayRejected) => {
                log::warn!("media playback failed ({event:?}); showing poster");
                MediaState::Fallback {
                    poster: poster.map(str::to_string),
                }
            }
            (state, MediaEvent::LoadedData) => state,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, MediaState::Playing)
    }

    /// Poster to display: while loading and after a failure.
    pub fn visible_poster<'a>(&'a self, poster: Option<&'a str>) -> Option<&'a str> {
        match self {
            MediaState::Loading => poster,
            MediaState::Playing => None,
            MediaState::Fallback { poster } => poster.as_deref(),
        }
    }
}

impl Default for MediaState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_rejection_falls_back_to_poster() {
        let s = MediaState::new().on_event(MediaEvent::AutoplayRejected, Some("poster.jpg"));
        assert_eq!(
            s,
            MediaState::Fallback {
                poster: Some("poster.jpg".into())
            }
        );
        let s = s.on_event(MediaEvent::LoadedData, None);
        assert!(!s.is_playing(), "fallback is terminal");
        assert_eq!(s.visible_poster(None), Some("poster.jpg"));
    }

    #[test]
    fn loads_then_plays() {
        let s = MediaState::new();
        assert_eq!(s.visible_poster(Some("p")), Some("p"));
        let s = s.on_event(MediaEvent::LoadedData, Some("p"));
        assert!(s.is_playing());
        assert_eq!(s.visible_poster(Some("p")), None);
        let s = s.on_event(MediaEvent::Error, None);
        assert_eq!(s, MediaState::Fallback { poster: None });
    }
}
