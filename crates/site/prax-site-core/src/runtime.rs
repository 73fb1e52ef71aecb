//! One page view's worth of wiring.
//!
//! The runtime owns the frame [`Ticker`], the [`MotionEngine`] and, when
//! motion is allowed, the smooth-scroll coordinator. Each host frame calls
//! [`SiteRuntime::frame`]: the ticker advances the coordinator, whose scroll
//! events feed the engine, and the engine's time-driven bindings advance by
//! the frame delta.

use anyhow::{Context, Result};

use prax_api_core::{LayoutSurface, ScrollState, Surface};
use prax_motion_core::{MotionEngine, MotionGate, Outputs, PointerEvent};
use prax_scroll_core::{
    CoordinatorHandle, ScrollCoordinator, ScrollLocks, ScrollTarget, ScrollToOptions, Subscription,
    Ticker, WheelDelta,
};
use prax_state_core::NavigationStore;

use crate::config::SiteConfig;
use crate::header::HeaderController;
use crate::menu::MenuController;
use crate::page::{MountedPage, Page};
use crate::refs::ElementRefs;

struct Header {
    controller: HeaderController,
    nav: NavigationStore,
    last_y: Option<f32>,
}

pub struct SiteRuntime {
    engine: MotionEngine,
    ticker: Ticker,
    locks: ScrollLocks,
    surface: LayoutSurface,
    coordinator: Option<CoordinatorHandle>,
    header: Option<Header>,
    menu: Option<MenuController>,
    last_frame: Option<f64>,
    _scroll_sub: Option<Subscription>,
}

impl SiteRuntime {
    /// Build the engine and, unless reduced motion is preferred, start the
    /// smooth-scroll coordinator on this thread.
    pub fn start(config: &SiteConfig, gate: MotionGate, surface: LayoutSurface) -> Result<Self> {
        let engine = MotionEngine::new(config.motion.clone(), gate);
        let ticker = Ticker::new();
        let locks = ScrollLocks::new();

        let (coordinator, scroll_sub) = if engine.should_animate() {
            let handle =
                ScrollCoordinator::start_with_locks(config.scroll.clone(), &ticker, locks.clone())
                    .context("starting the smooth-scroll coordinator")?;
            handle.resize(surface.scroll_limit());
            let feed = engine.clone();
            let sub = handle.on_scroll(move |s| feed.scroll(*s));
            (Some(handle), Some(sub))
        } else {
            log::debug!("reduced motion: native scrolling, no coordinator");
            (None, None)
        };
        engine.refresh(&surface);

        Ok(Self {
            engine,
            ticker,
            locks,
            surface,
            coordinator,
            header: None,
            menu: None,
            last_frame: None,
            _scroll_sub: scroll_sub,
        })
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn locks(&self) -> &ScrollLocks {
        &self.locks
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn surface(&self) -> &LayoutSurface {
        &self.surface
    }

    pub fn is_smooth(&self) -> bool {
        self.coordinator.is_some()
    }

    pub fn scroll_state(&self) -> ScrollState {
        match &self.coordinator {
            Some(c) => c.state(),
            None => self.engine.scroll_state(),
        }
    }

    /// Drive the header from scroll changes.
    pub fn attach_header(&mut self, controller: HeaderController, nav: NavigationStore) {
        self.header = Some(Header {
            controller,
            nav,
            last_y: None,
        });
    }

    /// Let the runtime play menu transitions for store-driven changes.
    pub fn attach_menu(&mut self, menu: MenuController) {
        self.menu = Some(menu);
    }

    pub fn menu_mut(&mut self) -> Option<&mut MenuController> {
        self.menu.as_mut()
    }

    pub fn mount(&self, page: &Page, refs: &ElementRefs) -> MountedPage {
        page.mount(&self.engine, &self.surface, refs)
    }

    /// New measurements from the host (resize, fonts, images).
    pub fn set_layout(&mut self, surface: LayoutSurface) {
        self.surface = surface;
        if let Some(c) = &self.coordinator {
            c.resize(self.surface.scroll_limit());
        }
        self.engine.refresh(&self.surface);
    }

    pub fn wheel(&self, delta: WheelDelta) {
        if let Some(c) = &self.coordinator {
            c.wheel(delta);
        }
    }

    pub fn touch(&self, delta: f32) {
        if let Some(c) = &self.coordinator {
            c.touch(delta);
        }
    }

    /// The host reports its native scroll offset.
    pub fn native_scroll(&self, position: f32) {
        match &self.coordinator {
            Some(c) => c.native_scroll(position),
            None => self
                .engine
                .scroll(ScrollState::at(position, self.surface.scroll_limit())),
        }
    }

    pub fn scroll_to(&self, target: impl Into<ScrollTarget>, opts: ScrollToOptions) {
        let target = target.into();
        match &self.coordinator {
            Some(c) => c.scroll_to(target, opts),
            None => {
                if self.locks.is_locked() && !opts.force {
                    return;
                }
                let limit = self.surface.scroll_limit();
                let y = match target {
                    ScrollTarget::Offset(v) => v,
                    ScrollTarget::Top => 0.0,
                    ScrollTarget::Bottom => limit,
                    ScrollTarget::Element(rect) => rect.top(),
                } + opts.offset;
                self.engine.scroll(ScrollState::at(y, limit));
            }
        }
    }

    pub fn pointer(&self, event: PointerEvent) {
        self.engine.pointer(event);
    }

    /// Advance one host frame at `time_ms` and collect the engine output.
    pub fn frame(&mut self, time_ms: f64) -> Outputs {
        self.ticker.tick(time_ms);
        let dt = match self.last_frame {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame = Some(time_ms);
        if let Some(menu) = self.menu.as_mut() {
            menu.sync(&self.surface);
        }
        self.engine.tick(dt);
        self.update_header();
        self.engine.drain()
    }

    fn update_header(&mut self) {
        let y = self.scroll_state().position;
        let Some(h) = self.header.as_mut() else {
            return;
        };
        if h.last_y == Some(y) {
            return;
        }
        h.last_y = Some(y);
        let menu_open = h.nav.is_menu_open();
        h.controller.on_scroll(y, menu_open, &self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prax_api_core::Viewport;

    fn surface() -> LayoutSurface {
        LayoutSurface::new(Viewport::default(), 3000.0)
    }

    #[test]
    fn reduced_motion_skips_the_coordinator() {
        let rt = SiteRuntime::start(&SiteConfig::default(), MotionGate::reduced(), surface()).unwrap();
        assert!(!rt.is_smooth());
        rt.native_scroll(400.0);
        assert_eq!(rt.scroll_state().position, 400.0);
        assert!(rt.ticker().is_empty());
    }

    #[test]
    fn wheel_reaches_the_engine() {
        let mut rt = SiteRuntime::start(&SiteConfig::default(), MotionGate::allow(), surface()).unwrap();
        assert!(rt.is_smooth());
        rt.wheel(WheelDelta { x: 0.0, y: 500.0 });
        let mut t = 0.0;
        for _ in 0..120 {
            rt.frame(t);
            t += 16.0;
        }
        assert_eq!(rt.scroll_state().position, 400.0);
        assert_eq!(rt.engine().scroll_state().position, 400.0);
    }
}
