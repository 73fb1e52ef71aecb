//! Full-screen mobile menu.
//!
//! The controller follows the navigation store's menu flag, whoever writes
//! it: while the flag is set it holds a [`ScrollLock`], and every change
//! queues the matching transition for the next [`MenuController::sync`].
//! Unmounting or dropping the controller closes the menu and releases the
//! lock, so page scroll can never stay locked past the menu's lifetime.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use prax_api_core::{ElementId, Inset, Property, Subscription, Surface, Value};
use prax_motion_core::primitives::{timeline, StepPosition, StepTween, TimelineSpec, TimelineStep};
use prax_motion_core::{BindingHandle, Ease, MotionEngine};
use prax_scroll_core::{ScrollLock, ScrollLocks};
use prax_state_core::NavigationStore;

const CLOSED: Inset = Inset::new(0.0, 0.0, 100.0, 0.0);

/// Panel clips open top to bottom, then the links rise in.
pub fn open_timeline(panel: ElementId, links: &[ElementId]) -> TimelineSpec {
    TimelineSpec::new(vec![
        TimelineStep::new(
            vec![panel],
            vec![StepTween::from_to(
                Property::ClipPath,
                Value::Inset(CLOSED),
                Value::Inset(Inset::OPEN),
            )],
            0.6,
        )
        .ease(Ease::Power3InOut),
        TimelineStep::new(
            links.to_vec(),
            vec![
                StepTween::float(Property::TranslateY, 60.0, 0.0),
                StepTween::float(Property::Opacity, 0.0, 1.0),
            ],
            0.5,
        )
        .ease(Ease::Power3Out)
        .stagger(0.08)
        .at(StepPosition::At(0.3)),
    ])
}

/// Links drop out, then the panel clips closed.
pub fn close_timeline(panel: ElementId, links: &[ElementId]) -> TimelineSpec {
    TimelineSpec::new(vec![
        TimelineStep::new(
            links.to_vec(),
            vec![
                StepTween::float(Property::TranslateY, 0.0, -30.0),
                StepTween::float(Property::Opacity, 1.0, 0.0),
            ],
            0.3,
        )
        .ease(Ease::Power2In)
        .stagger(0.05),
        TimelineStep::new(
            vec![panel],
            vec![StepTween::from_to(
                Property::ClipPath,
                Value::Inset(Inset::OPEN),
                Value::Inset(CLOSED),
            )],
            0.5,
        )
        .ease(Ease::Power3InOut)
        .at(StepPosition::At(0.2)),
    ])
}

/// Lock and pending transition, shared with the store listener.
#[derive(Default)]
struct MenuState {
    lock: Option<ScrollLock>,
    /// `Some(open)` when a transition has not been played yet.
    pending: Option<bool>,
}

impl MenuState {
    fn follow(&mut self, open: bool, locks: &ScrollLocks) {
        if open == self.lock.is_some() {
            return;
        }
        if open {
            self.lock = Some(locks.acquire("menu"));
        } else if let Some(lock) = self.lock.take() {
            lock.release();
        }
        self.pending = Some(open);
    }
}

pub struct MenuController {
    nav: NavigationStore,
    engine: MotionEngine,
    panel: Option<ElementId>,
    links: Vec<ElementId>,
    state: Rc<RefCell<MenuState>>,
    motion: Option<BindingHandle>,
    subscription: Option<Subscription>,
}

impl MenuController {
    pub fn new(
        nav: NavigationStore,
        locks: ScrollLocks,
        engine: MotionEngine,
        panel: Option<ElementId>,
        links: Vec<ElementId>,
    ) -> Self {
        let state = Rc::new(RefCell::new(MenuState::default()));
        state.borrow_mut().follow(nav.is_menu_open(), &locks);
        let weak: Weak<RefCell<MenuState>> = Rc::downgrade(&state);
        let subscription = nav.subscribe(move |s| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().follow(s.is_menu_open, &locks);
            }
        });
        Self {
            nav,
            engine,
            panel,
            links,
            state,
            motion: None,
            subscription: Some(subscription),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().lock.is_some()
    }

    pub fn open(&mut self, surface: &dyn Surface) {
        self.nav.set_menu_open(true);
        self.sync(surface);
    }

    pub fn close(&mut self, surface: &dyn Surface) {
        self.nav.set_menu_open(false);
        self.sync(surface);
    }

    pub fn toggle(&mut self, surface: &dyn Surface) {
        self.nav.toggle_menu();
        self.sync(surface);
    }

    /// Play the transition for the latest menu change, if one is queued.
    ///
    /// The runtime calls this every frame for an attached menu, so changes
    /// made directly on the store animate too.
    pub fn sync(&mut self, surface: &dyn Surface) {
        let Some(open) = self.state.borrow_mut().pending.take() else {
            return;
        };
        let Some(panel) = self.panel else {
            return;
        };
        let spec = if open {
            open_timeline(panel, &self.links)
        } else {
            close_timeline(panel, &self.links)
        };
        self.motion = Some(timeline::bind(&self.engine, surface, spec));
    }

    /// Component teardown: release the lock and any running transition.
    pub fn unmount(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.close();
        }
        let lock = {
            let mut st = self.state.borrow_mut();
            st.pending = None;
            st.lock.take()
        };
        if let Some(lock) = lock {
            lock.release();
            self.nav.set_menu_open(false);
            log::debug!("menu unmounted while open; scroll lock released");
        }
        if let Some(motion) = self.motion.take() {
            motion.dispose();
        }
    }
}

impl Drop for MenuController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_timeline_shape() {
        let links = [ElementId(2), ElementId(3), ElementId(4)];
        let tl = open_timeline(ElementId(1), &links).resolve();
        // links start at 0.3, 0.38, 0.46 and run 0.5s
        assert!((tl.total_duration() - 0.96).abs() < 1e-5);
        let end = tl.sample(f32::INFINITY);
        assert!(end
            .iter()
            .any(|w| w.target == ElementId(1) && w.value == Value::Inset(Inset::OPEN)));
    }

    #[test]
    fn close_timeline_ends_clipped() {
        let tl = close_timeline(ElementId(1), &[ElementId(2)]).resolve();
        assert!((tl.total_duration() - 0.7).abs() < 1e-5);
        let end = tl.sample(f32::INFINITY);
        assert!(end.iter().any(|w| w.value == Value::Inset(CLOSED)));
    }
}
