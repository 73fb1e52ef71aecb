use prax_motion_core::primitives::{self, MagneticConfig, MarqueeConfig, PinConfig};
use prax_motion_core::{
    ElementId, MotionEngine, MotionEvent, PointerEvent, Property, Rect, ScrollState, Surface,
};
use prax_test_fixtures::layouts;

#[test]
fn marquee_returns_to_its_start_after_one_period() {
    let surface = layouts::surface("home").unwrap();
    let engine = MotionEngine::default();
    let track = ElementId(40);
    // 3000px track holds two 1500px runs; at 100px/s one loop takes 15s
    let cfg = MarqueeConfig {
        velocity: 100.0,
        ..MarqueeConfig::default()
    };
    let _h = primitives::marquee::bind(&engine, &surface, track, &cfg);
    engine.tick(3.0);
    assert_eq!(engine.drain().writes.latest_float(track, Property::TranslateX), Some(-300.0));
    for _ in 0..12 {
        engine.tick(1.0);
    }
    let x = engine.drain().writes.latest_float(track, Property::TranslateX).unwrap();
    assert!(x.abs() < 1e-3, "wrapped to {x}");

    // scrolling does not move a time-driven marquee
    engine.scroll(ScrollState::at(4000.0, surface.scroll_limit()));
    assert!(engine.drain().writes.is_empty());
}

#[test]
fn magnetic_follows_pointer_and_springs_back() {
    let surface = layouts::surface("home").unwrap();
    let engine = MotionEngine::default();
    let button = ElementId(50);
    engine.scroll(ScrollState::at(5800.0, surface.scroll_limit()));
    let h = primitives::magnetic::bind(&engine, &surface, button, &MagneticConfig::default());
    let id = h.id().unwrap();
    engine.drain();

    // centre is (720, 6032) in document space, 232 below the viewport top
    engine.pointer(PointerEvent::Move { x: 770.0, y: 232.0 });
    engine.tick(0.35);
    let out = engine.drain();
    assert!(out.events.contains(&MotionEvent::PointerEntered { binding: id }));
    let x = out.writes.latest_float(button, Property::TranslateX).unwrap();
    assert!((x - 17.5).abs() < 1e-3);
    assert_eq!(out.writes.latest_float(button, Property::TranslateY), Some(0.0));

    engine.pointer(PointerEvent::Leave);
    engine.tick(0.6);
    let out = engine.drain();
    assert!(out.events.contains(&MotionEvent::PointerLeft { binding: id }));
    assert_eq!(out.writes.latest_float(button, Property::TranslateX), Some(0.0));
}

#[test]
fn pointer_outside_never_moves_the_element() {
    let surface = layouts::surface("home").unwrap();
    let engine = MotionEngine::default();
    let _h = primitives::magnetic::bind(&engine, &surface, ElementId(50), &MagneticConfig::default());
    engine.drain();
    engine.pointer(PointerEvent::Move { x: 10.0, y: 10.0 });
    engine.tick(0.5);
    assert!(engine.drain().is_empty());
}

fn measured(events: &[MotionEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|e| match e {
            MotionEvent::PinMeasured { distance, .. } => Some(*distance),
            _ => None,
        })
        .collect()
}

#[test]
fn pin_distance_follows_resize_without_rebinding() {
    let mut surface = layouts::surface("home").unwrap();
    let engine = MotionEngine::default();
    let (container, track) = (ElementId(30), ElementId(31));
    let h = primitives::pin::bind(
        &engine,
        &surface,
        PinConfig::new(container, track, vec![ElementId(32), ElementId(33)]),
    );
    assert_eq!(measured(&engine.drain().events), vec![3000.0]);

    // pinned from 3800 for 3000px
    engine.scroll(ScrollState::at(6800.0, surface.scroll_limit()));
    let out = engine.drain();
    assert_eq!(out.writes.latest_float(track, Property::TranslateX), Some(-3000.0));
    assert_eq!(out.writes.latest_float(container, Property::PinOffset), Some(3000.0));

    surface
        .attach(track, Rect::new(0.0, 3800.0, 3440.0, 900.0))
        .unwrap();
    engine.refresh(&surface);
    let out = engine.drain();
    assert_eq!(measured(&out.events), vec![2000.0]);
    assert_eq!(out.writes.latest_float(track, Property::TranslateX), Some(-2000.0));
    assert!(h.is_live());
    assert_eq!(engine.resources().resize_listeners, 1);
}

#[test]
fn scrub_is_a_pure_function_of_scroll() {
    let surface = layouts::surface("home").unwrap();
    let engine = MotionEngine::default();
    let bar = ElementId(60);
    let _h = primitives::scrub::bind(
        &engine,
        &surface,
        primitives::ScrubConfig::progress_bar(bar),
    );
    let limit = surface.scroll_limit();
    let mut seen = Vec::new();
    for y in [4050.0, 100.0, 8100.0, 4050.0] {
        engine.scroll(ScrollState::at(y, limit));
        seen.push(engine.drain().writes.latest_float(bar, Property::ScaleX).unwrap());
    }
    assert_eq!(seen[0], 0.5);
    assert_eq!(seen[2], 1.0);
    assert_eq!(seen[0], seen[3]);
}
