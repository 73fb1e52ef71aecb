use prax_api_core::{ElementId, LayoutSurface, Property, Rect, Viewport};
use prax_motion_core::{MotionConfig, MotionEngine, MotionGate};
use prax_site_core::{Preloader, PreloaderConfig, PreloaderElements, PreloaderPhase};
use prax_state_core::{MemorySessionStorage, PreloaderStore, SessionStorage, PRELOADER_SHOWN_KEY};

fn surface() -> LayoutSurface {
    let mut s = LayoutSurface::new(Viewport::default(), 900.0);
    s.attach(ElementId(1), Rect::new(0.0, 0.0, 1440.0, 900.0)).unwrap();
    s.attach(ElementId(2), Rect::new(560.0, 290.0, 320.0, 320.0)).unwrap();
    s.attach(ElementId(3), Rect::new(620.0, 660.0, 200.0, 20.0)).unwrap();
    s
}

fn elements() -> PreloaderElements {
    PreloaderElements {
        container: Some(ElementId(1)),
        logo: Some(ElementId(2)),
        progress: Some(ElementId(3)),
    }
}

fn run_to_done(p: &mut Preloader, engine: &MotionEngine, session: &dyn SessionStorage, surface: &LayoutSurface) -> u32 {
    let mut frames = 0;
    while p.phase() != PreloaderPhase::Done && frames < 1000 {
        p.advance(16.0, session, surface);
        engine.tick(0.016);
        frames += 1;
    }
    frames
}

#[test]
fn plays_once_per_session() {
    let session = MemorySessionStorage::new();
    let surface = surface();

    // first page view
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::allow());
    let store = PreloaderStore::new();
    let mut first = Preloader::mount(
        PreloaderConfig::default(),
        engine.clone(),
        elements(),
        &store,
        &session,
        &surface,
    )
    .unwrap();
    assert!(first.is_visible());
    let frames = run_to_done(&mut first, &engine, &session, &surface);
    assert!(frames < 1000);
    assert!(store.is_complete());
    assert!(session.flag(PRELOADER_SHOWN_KEY));
    let out = engine.drain();
    assert_eq!(
        out.writes.latest(ElementId(1), Property::Visibility),
        Some(prax_api_core::Value::Bool(false))
    );
    drop(first);

    // second page view in the same session
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::allow());
    let store = PreloaderStore::new();
    let second = Preloader::mount(
        PreloaderConfig::default(),
        engine.clone(),
        elements(),
        &store,
        &session.clone(),
        &surface,
    )
    .unwrap();
    assert_eq!(second.phase(), PreloaderPhase::Skipped);
    assert!(!second.is_visible());
    assert!(store.is_complete());
    assert_eq!(engine.live_bindings(), 0);
}

#[test]
fn progress_holds_then_completes_after_delay() {
    let session = MemorySessionStorage::new();
    let surface = surface();
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::allow());
    let store = PreloaderStore::new();
    let mut p = Preloader::mount(
        PreloaderConfig::default(),
        engine,
        elements(),
        &store,
        &session,
        &surface,
    )
    .unwrap();

    p.advance(1990.0, &session, &surface);
    assert_eq!(store.snapshot().progress, 99);
    assert!(!store.is_complete());

    assert_eq!(
        p.advance(10.0, &session, &surface),
        PreloaderPhase::Completing { waited_ms: 0.0 }
    );
    assert_eq!(store.snapshot().progress, 100);
    assert!(!store.is_complete(), "completes after the delay");

    p.advance(299.0, &session, &surface);
    assert!(!store.is_complete());
    assert!(matches!(
        p.advance(1.0, &session, &surface),
        PreloaderPhase::Exiting { .. }
    ));
    assert!(store.is_complete());
}

#[test]
fn reduced_motion_exit_is_immediate() {
    let session = MemorySessionStorage::new();
    let surface = surface();
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::reduced());
    let store = PreloaderStore::new();
    let mut p = Preloader::mount(
        PreloaderConfig::default(),
        engine.clone(),
        elements(),
        &store,
        &session,
        &surface,
    )
    .unwrap();
    p.advance(2000.0, &session, &surface);
    assert_eq!(p.advance(300.0, &session, &surface), PreloaderPhase::Done);
    assert_eq!(engine.live_bindings(), 0);
    assert_eq!(engine.resources(), prax_motion_core::Resources::NONE);
}

#[test]
fn second_preloader_on_one_store_is_refused() {
    let session = MemorySessionStorage::new();
    let surface = surface();
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::allow());
    let store = PreloaderStore::new();
    let _first = Preloader::mount(
        PreloaderConfig::default(),
        engine.clone(),
        elements(),
        &store,
        &session,
        &surface,
    )
    .unwrap();
    assert!(Preloader::mount(
        PreloaderConfig::default(),
        engine,
        elements(),
        &store,
        &session,
        &surface,
    )
    .is_err());
}

#[test]
fn logo_breathes_while_loading_and_stops_on_exit() {
    let session = MemorySessionStorage::new();
    let surface = surface();
    let engine = MotionEngine::new(MotionConfig::default(), MotionGate::allow());
    let store = PreloaderStore::new();
    let mut p = Preloader::mount(
        PreloaderConfig::default(),
        engine.clone(),
        elements(),
        &store,
        &session,
        &surface,
    )
    .unwrap();

    for _ in 0..70 {
        p.advance(16.0, &session, &surface);
        engine.tick(0.016);
    }
    assert!(!p.is_breathing(), "intro still owns the logo");

    for _ in 0..10 {
        p.advance(16.0, &session, &surface);
        engine.tick(0.016);
    }
    assert!(p.is_breathing());
    assert_eq!(engine.live_bindings(), 1, "loop replaced the finished intro");
    engine.drain();

    p.advance(16.0, &session, &surface);
    engine.tick(0.75);
    let scale = engine
        .drain()
        .writes
        .latest_float(ElementId(2), Property::Scale)
        .unwrap();
    assert!(scale > 1.0 && scale < 1.05, "scale {scale}");

    run_to_done(&mut p, &engine, &session, &surface);
    engine.tick(0.1);
    assert!(!p.is_breathing());
    assert_eq!(engine.resources().frame_callbacks, 0, "exit finished, loop gone");
}
