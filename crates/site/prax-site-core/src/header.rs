//! Sticky header: hides while scrolling down, returns on scroll up, and
//! turns solid once the page leaves the very top.

use prax_api_core::{ElementId, Property, Surface};
use prax_motion_core::primitives::{StepTween, TimelineSpec, TimelineStep};
use prax_motion_core::{BindingHandle, Ease, MotionEngine};
use prax_state_core::HeaderWriter;

/// Scroll offset past which scrolling down hides the header.
pub const HIDE_THRESHOLD: f32 = 100.0;
/// Scroll offset past which the header background turns solid.
pub const SOLID_THRESHOLD: f32 = 50.0;
pub const SLIDE_DURATION: f32 = 0.4;

/// Owns the header writer role for the lifetime of the page.
pub struct HeaderController {
    writer: HeaderWriter,
    engine: MotionEngine,
    header: Option<ElementId>,
    last_y: f32,
    hidden: bool,
    shown_offset: f32,
    slide: Option<BindingHandle>,
}

impl HeaderController {
    pub fn new(writer: HeaderWriter, engine: MotionEngine, header: Option<ElementId>) -> Self {
        Self {
            writer,
            engine,
            header,
            last_y: 0.0,
            hidden: false,
            shown_offset: 0.0,
            slide: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Feed the eased scroll offset. Does nothing under reduced motion.
    pub fn on_scroll(&mut self, y: f32, menu_open: bool, surface: &dyn Surface) {
        if !self.engine.should_animate() {
            return;
        }
        let hidden = y > self.last_y && y > HIDE_THRESHOLD;
        self.last_y = y;
        self.writer.set_visible(!hidden);
        self.writer.set_solid(y > SOLID_THRESHOLD);
        if hidden != self.hidden {
            self.hidden = hidden;
            self.slide_to(hidden && !menu_open, surface);
        }
    }

    /// The menu opening always brings the header back.
    pub fn on_menu(&mut self, menu_open: bool, surface: &dyn Surface) {
        if self.engine.should_animate() {
            self.slide_to(self.hidden && !menu_open, surface);
        }
    }

    fn slide_to(&mut self, hide: bool, surface: &dyn Surface) {
        let Some(header) = self.header else {
            return;
        };
        let Some(rect) = surface.rect(header) else {
            log::debug!("header element {header:?} not attached");
            return;
        };
        let to = if hide { -rect.height } else { 0.0 };
        if to == self.shown_offset {
            return;
        }
        let step = TimelineStep::new(
            vec![header],
            vec![StepTween::float(Property::TranslateY, self.shown_offset, to)],
            SLIDE_DURATION,
        )
        .ease(Ease::Power3Out);
        self.shown_offset = to;
        let spec = TimelineSpec::new(vec![step]);
        self.slide = Some(prax_motion_core::primitives::timeline::bind(
            &self.engine,
            surface,
            spec,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prax_api_core::{LayoutSurface, Rect, Viewport};
    use prax_motion_core::{MotionConfig, MotionGate};
    use prax_state_core::NavigationStore;

    fn setup(gate: MotionGate) -> (NavigationStore, MotionEngine, LayoutSurface, HeaderController) {
        let nav = NavigationStore::new();
        let engine = MotionEngine::new(MotionConfig::default(), gate);
        let mut surface = LayoutSurface::new(Viewport::default(), 5000.0);
        surface
            .attach(ElementId(1), Rect::new(0.0, 0.0, 1440.0, 96.0))
            .unwrap();
        let header = HeaderController::new(
            nav.claim_header_writer().unwrap(),
            engine.clone(),
            Some(ElementId(1)),
        );
        (nav, engine, surface, header)
    }

    #[test]
    fn hides_down_shows_up() {
        let (nav, engine, surface, mut header) = setup(MotionGate::allow());
        header.on_scroll(60.0, false, &surface);
        assert!(nav.snapshot().is_header_solid);
        assert!(nav.snapshot().is_header_visible, "below the hide threshold");

        header.on_scroll(300.0, false, &surface);
        assert!(!nav.snapshot().is_header_visible);
        assert!(header.is_hidden());
        assert_eq!(engine.live_bindings(), 1);

        header.on_scroll(250.0, false, &surface);
        assert!(nav.snapshot().is_header_visible);
        assert_eq!(engine.live_bindings(), 1, "slide back replaces slide away");

        engine.tick(SLIDE_DURATION);
        let out = engine.drain();
        assert_eq!(out.writes.latest_float(ElementId(1), Property::TranslateY), Some(0.0));
    }

    #[test]
    fn reduced_motion_leaves_header_alone() {
        let (nav, engine, surface, mut header) = setup(MotionGate::reduced());
        header.on_scroll(600.0, false, &surface);
        header.on_scroll(900.0, false, &surface);
        assert!(nav.snapshot().is_header_visible);
        assert!(!nav.snapshot().is_header_solid);
        assert_eq!(engine.live_bindings(), 0);
    }
}
