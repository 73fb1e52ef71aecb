//! Branded preloader.
//!
//! Plays once per browser session. Progress follows an expo-out curve over
//! a minimum duration and holds at 99 until that minimum has elapsed; the
//! store completes shortly after reaching 100, and an exit timeline clears
//! the overlay. Once the logo intro has played the logo breathes in a slow
//! loop until the exit starts. Time is fed in explicitly through
//! [`Preloader::advance`].

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Inset, Property, Surface, Value};
use prax_motion_core::primitives::{
    timeline, yoyo, StepPosition, StepTween, TimelineSpec, TimelineStep, YoyoConfig,
};
use prax_motion_core::{BindingHandle, Ease, MotionEngine};
use prax_state_core::{
    PreloaderStore, ProgressWriter, SessionStorage, StoreError, PRELOADER_SHOWN_KEY,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Progress cannot reach 100 before this.
    pub min_duration_ms: f64,
    /// Pause at 100 before the store completes.
    pub complete_delay_ms: f64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 2000.0,
            complete_delay_ms: 300.0,
        }
    }
}

fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

/// Displayed progress (0..=100) after `elapsed_ms`.
pub fn progress_at(cfg: &PreloaderConfig, elapsed_ms: f64) -> u8 {
    if elapsed_ms >= cfg.min_duration_ms {
        return 100;
    }
    let natural = if cfg.min_duration_ms > 0.0 {
        (elapsed_ms.max(0.0) / cfg.min_duration_ms).min(1.0)
    } else {
        1.0
    };
    let eased = (ease_out_expo(natural) * 100.0).floor();
    eased.min(99.0) as u8
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PreloaderElements {
    pub container: Option<ElementId>,
    pub logo: Option<ElementId>,
    pub progress: Option<ElementId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PreloaderPhase {
    /// Already shown this session; nothing renders.
    Skipped,
    Loading,
    /// At 100, waiting out the completion delay.
    Completing { waited_ms: f64 },
    Exiting { remaining_ms: f64 },
    Done,
}

/// Length of [`logo_intro`].
pub const LOGO_INTRO_MS: f64 = 1200.0;

/// Logo fades and scales in when the overlay mounts.
pub fn logo_intro(logo: ElementId) -> TimelineSpec {
    TimelineSpec::new(vec![TimelineStep::new(
        vec![logo],
        vec![
            StepTween::float(Property::Opacity, 0.0, 1.0),
            StepTween::float(Property::Scale, 0.8, 1.0),
        ],
        (LOGO_INTRO_MS / 1000.0) as f32,
    )
    .ease(Ease::Power2Out)])
}

/// Slow scale pulse while loading.
pub fn logo_breathing() -> YoyoConfig {
    YoyoConfig::new(Property::Scale, 1.0, 1.05, 1.5).ease(Ease::SineInOut)
}

/// Progress fades down, the logo scales out, then the curtain lifts.
pub fn exit_timeline(el: &PreloaderElements) -> TimelineSpec {
    let mut spec = TimelineSpec::new(Vec::new());
    if let Some(progress) = el.progress {
        spec = spec.then(
            TimelineStep::new(
                vec![progress],
                vec![
                    StepTween::float(Property::Opacity, 1.0, 0.0),
                    StepTween::float(Property::TranslateY, 0.0, 20.0),
                ],
                0.3,
            )
            .ease(Ease::Power2In),
        );
    }
    if let Some(logo) = el.logo {
        spec = spec.then(
            TimelineStep::new(
                vec![logo],
                vec![
                    StepTween::float(Property::Scale, 1.0, 1.2),
                    StepTween::float(Property::Opacity, 1.0, 0.0),
                ],
                0.5,
            )
            .ease(Ease::Power2In)
            .at(StepPosition::Overlap(0.2)),
        );
    }
    if let Some(container) = el.container {
        spec = spec
            .then(
                TimelineStep::new(
                    vec![container],
                    vec![StepTween::from_to(
                        Property::ClipPath,
                        Value::Inset(Inset::OPEN),
                        Value::Inset(Inset::new(0.0, 0.0, 100.0, 0.0)),
                    )],
                    0.8,
                )
                .ease(Ease::Power3InOut),
            )
            .then(TimelineStep::new(
                vec![container],
                vec![StepTween::from_to(
                    Property::Visibility,
                    Value::Bool(true),
                    Value::Bool(false),
                )],
                0.0,
            ));
    }
    spec
}

pub struct Preloader {
    cfg: PreloaderConfig,
    engine: MotionEngine,
    elements: PreloaderElements,
    writer: Option<ProgressWriter>,
    phase: PreloaderPhase,
    elapsed_ms: f64,
    motion: Option<BindingHandle>,
    breathing: Option<BindingHandle>,
}

impl Preloader {
    /// Mount the overlay, or skip it when this session already saw it.
    pub fn mount(
        cfg: PreloaderConfig,
        engine: MotionEngine,
        elements: PreloaderElements,
        store: &PreloaderStore,
        session: &dyn SessionStorage,
        surface: &dyn Surface,
    ) -> Result<Self, StoreError> {
        let writer = store.claim_progress_writer()?;
        let mut preloader = Self {
            cfg,
            engine,
            elements,
            writer: None,
            phase: PreloaderPhase::Loading,
            elapsed_ms: 0.0,
            motion: None,
            breathing: None,
        };
        if session.flag(PRELOADER_SHOWN_KEY) {
            writer.skip();
            preloader.phase = PreloaderPhase::Skipped;
            log::debug!("preloader already shown this session");
            return Ok(preloader);
        }
        if let Some(logo) = elements.logo {
            preloader.motion = Some(timeline::bind(
                &preloader.engine,
                surface,
                logo_intro(logo),
            ));
        }
        preloader.writer = Some(writer);
        Ok(preloader)
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    /// Whether the overlay is still on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, PreloaderPhase::Skipped | PreloaderPhase::Done)
    }

    pub fn display_progress(&self) -> u8 {
        match self.phase {
            PreloaderPhase::Loading => progress_at(&self.cfg, self.elapsed_ms),
            _ => 100,
        }
    }

    /// Advance by `dt_ms` of wall time.
    pub fn advance(
        &mut self,
        dt_ms: f64,
        session: &dyn SessionStorage,
        surface: &dyn Surface,
    ) -> PreloaderPhase {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let phase = self.phase;
        self.phase = match phase {
            PreloaderPhase::Loading => {
                // the loop takes over the logo's scale on the first frame
                // after the intro ran its course
                if self.elapsed_ms >= LOGO_INTRO_MS {
                    self.start_breathing(surface);
                }
                self.elapsed_ms += dt_ms;
                let progress = progress_at(&self.cfg, self.elapsed_ms);
                if let Some(w) = &self.writer {
                    w.set_progress(progress);
                }
                if progress == 100 {
                    PreloaderPhase::Completing { waited_ms: 0.0 }
                } else {
                    PreloaderPhase::Loading
                }
            }
            PreloaderPhase::Completing { waited_ms } => {
                let waited_ms = waited_ms + dt_ms;
                if waited_ms >= self.cfg.complete_delay_ms {
                    self.finish(session, surface)
                } else {
                    PreloaderPhase::Completing { waited_ms }
                }
            }
            PreloaderPhase::Exiting { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    PreloaderPhase::Done
                } else {
                    PreloaderPhase::Exiting { remaining_ms }
                }
            }
            done @ (PreloaderPhase::Skipped | PreloaderPhase::Done) => done,
        };
        self.phase
    }

    fn start_breathing(&mut self, surface: &dyn Surface) {
        let Some(logo) = self.elements.logo else {
            return;
        };
        if self.breathing.is_none() {
            self.breathing = Some(yoyo::bind(&self.engine, surface, logo, &logo_breathing()));
        }
    }

    /// Whether the logo's loading loop is running.
    pub fn is_breathing(&self) -> bool {
        self.breathing.as_ref().is_some_and(BindingHandle::is_live)
    }

    fn finish(&mut self, session: &dyn SessionStorage, surface: &dyn Surface) -> PreloaderPhase {
        if let Some(w) = self.writer.take() {
            w.complete();
        }
        if let Some(breathing) = self.breathing.take() {
            breathing.dispose();
        }
        session.set_flag(PRELOADER_SHOWN_KEY);
        let spec = exit_timeline(&self.elements).retain_attached(surface);
        let total_ms = if self.engine.should_animate() {
            f64::from(spec.resolve().total_duration()) * 1000.0
        } else {
            0.0
        };
        self.motion = Some(timeline::bind(&self.engine, surface, spec));
        if total_ms > 0.0 {
            PreloaderPhase::Exiting {
                remaining_ms: total_ms,
            }
        } else {
            PreloaderPhase::Done
        }
    }
}

impl Drop for Preloader {
    fn drop(&mut self) {
        if let Some(breathing) = self.breathing.take() {
            breathing.dispose();
        }
        if let Some(motion) = self.motion.take() {
            motion.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_holds_at_99_until_minimum() {
        let cfg = PreloaderConfig::default();
        assert_eq!(progress_at(&cfg, 0.0), 0);
        assert_eq!(progress_at(&cfg, 200.0), 50);
        assert_eq!(progress_at(&cfg, 1900.0), 99);
        assert_eq!(progress_at(&cfg, 2000.0), 100);
        let mut last = 0;
        for ms in (0..2000).step_by(50) {
            let p = progress_at(&cfg, f64::from(ms));
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn exit_timeline_places_steps() {
        let el = PreloaderElements {
            container: Some(ElementId(1)),
            logo: Some(ElementId(2)),
            progress: Some(ElementId(3)),
        };
        let tl = exit_timeline(&el).resolve();
        // 0..0.3, 0.1..0.6, 0.6..1.4, set at 1.4
        assert!((tl.total_duration() - 1.4).abs() < 1e-5);
        let end = tl.sample(f32::INFINITY);
        assert!(end
            .iter()
            .any(|w| w.property == Property::Visibility && w.value == Value::Bool(false)));
    }
}
