use prax_api_core::{ElementId, LayoutSurface, Rect, Viewport};
use prax_motion_core::MotionGate;
use prax_scroll_core::WheelDelta;
use prax_site_core::{MenuController, SiteConfig, SiteRuntime};
use prax_state_core::NavigationStore;

fn runtime() -> SiteRuntime {
    let mut surface = LayoutSurface::new(Viewport::default(), 4000.0);
    surface
        .attach(ElementId(1), Rect::new(0.0, 0.0, 1440.0, 900.0))
        .unwrap();
    for (i, id) in [2, 3, 4].into_iter().enumerate() {
        surface
            .attach(ElementId(id), Rect::new(100.0, 200.0 + 80.0 * i as f32, 400.0, 60.0))
            .unwrap();
    }
    SiteRuntime::start(&SiteConfig::default(), MotionGate::allow(), surface).unwrap()
}

fn run(rt: &mut SiteRuntime, from: f64, frames: u32) -> f64 {
    let mut t = from;
    for _ in 0..frames {
        rt.frame(t);
        t += 16.0;
    }
    t
}

fn menu(rt: &SiteRuntime, nav: &NavigationStore) -> MenuController {
    MenuController::new(
        nav.clone(),
        rt.locks().clone(),
        rt.engine().clone(),
        Some(ElementId(1)),
        vec![ElementId(2), ElementId(3), ElementId(4)],
    )
}

#[test]
fn open_locks_close_unlocks() {
    let mut rt = runtime();
    let nav = NavigationStore::new();
    let mut m = menu(&rt, &nav);

    m.open(rt.surface());
    assert!(nav.is_menu_open());
    assert!(rt.locks().is_locked());
    rt.wheel(WheelDelta { x: 0.0, y: 400.0 });
    let t = run(&mut rt, 0.0, 100);
    assert_eq!(rt.scroll_state().position, 0.0, "page does not scroll under the menu");

    m.close(rt.surface());
    assert!(!nav.is_menu_open());
    assert!(!rt.locks().is_locked());
    rt.wheel(WheelDelta { x: 0.0, y: 400.0 });
    run(&mut rt, t, 120);
    assert_eq!(rt.scroll_state().position, 320.0);
}

#[test]
fn unmount_while_open_restores_scrolling() {
    let mut rt = runtime();
    let nav = NavigationStore::new();
    {
        let mut m = menu(&rt, &nav);
        m.toggle(rt.surface());
        assert!(rt.locks().is_locked());
        assert!(rt.engine().live_bindings() > 0);
    }
    assert!(!rt.locks().is_locked());
    assert!(!nav.is_menu_open());
    assert_eq!(rt.engine().live_bindings(), 0, "transition disposed with the menu");

    rt.touch(100.0);
    run(&mut rt, 0.0, 2);
    assert_eq!(rt.scroll_state().position, 150.0);
}

#[test]
fn open_twice_holds_one_lock() {
    let rt = runtime();
    let nav = NavigationStore::new();
    let mut m = menu(&rt, &nav);
    m.open(rt.surface());
    m.open(rt.surface());
    assert_eq!(rt.locks().held(), 1);
    m.unmount();
    m.unmount();
    assert_eq!(rt.locks().held(), 0);
}

#[test]
fn reduced_motion_menu_still_locks() {
    let surface = LayoutSurface::new(Viewport::default(), 4000.0);
    let rt = SiteRuntime::start(&SiteConfig::default(), MotionGate::reduced(), surface).unwrap();
    let nav = NavigationStore::new();
    let mut m = menu(&rt, &nav);
    m.open(rt.surface());
    assert!(rt.locks().is_locked());
    assert_eq!(rt.engine().live_bindings(), 0);
    drop(m);
    assert!(!rt.locks().is_locked());
}

#[test]
fn closing_through_the_store_unlocks() {
    let mut rt = runtime();
    let nav = NavigationStore::new();
    let mut m = menu(&rt, &nav);
    m.open(rt.surface());
    assert!(rt.locks().is_locked());

    nav.set_menu_open(false);
    assert!(!m.is_open());
    assert!(!rt.locks().is_locked());
    rt.wheel(WheelDelta { x: 0.0, y: 400.0 });
    run(&mut rt, 0.0, 120);
    assert_eq!(rt.scroll_state().position, 320.0);
}

#[test]
fn opening_through_the_store_locks() {
    let mut rt = runtime();
    let nav = NavigationStore::new();
    let m = menu(&rt, &nav);

    nav.toggle_menu();
    assert!(m.is_open());
    assert_eq!(rt.locks().held(), 1);

    // the attached menu plays its transition on the next frame
    rt.attach_menu(m);
    assert_eq!(rt.engine().live_bindings(), 0);
    let t = run(&mut rt, 0.0, 1);
    assert!(rt.engine().live_bindings() > 0);

    rt.wheel(WheelDelta { x: 0.0, y: 400.0 });
    run(&mut rt, t, 60);
    assert_eq!(rt.scroll_state().position, 0.0);

    nav.set_menu_open(false);
    assert_eq!(rt.locks().held(), 0);
}

#[test]
fn menu_mounted_over_an_open_store_locks_at_once() {
    let rt = runtime();
    let nav = NavigationStore::new();
    nav.set_menu_open(true);
    let m = menu(&rt, &nav);
    assert!(m.is_open());
    assert!(rt.locks().is_locked());
    drop(m);
    assert!(!nav.is_menu_open());
    assert!(!rt.locks().is_locked());
}
