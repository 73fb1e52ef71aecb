use prax_motion_core::outputs::SkipReason;
use prax_motion_core::primitives::{self, MarqueeConfig, ReducedMotionPolicy};
use prax_motion_core::{
    BindingSpec, ElementId, MotionConfig, MotionEngine, MotionEvent, MotionGate, Property,
    Resources, Scope, Surface,
};
use prax_test_fixtures::{bindings, layouts};

fn reduced() -> MotionEngine {
    MotionEngine::new(MotionConfig::default(), MotionGate::reduced())
}

#[test]
fn nothing_is_registered_and_final_state_is_written() {
    let surface = layouts::surface("home").unwrap();
    let engine = reduced();
    let specs: Vec<BindingSpec> = bindings::load("home").unwrap();
    let mut scope = Scope::new("home");
    for spec in specs {
        scope.add(spec.bind(&engine, &surface));
    }

    assert_eq!(engine.live_bindings(), 0);
    assert_eq!(engine.resources(), Resources::NONE);
    assert!(scope.is_empty());

    let out = engine.drain();
    let w = &out.writes;
    assert_eq!(w.latest_float(ElementId(10), Property::Opacity), Some(1.0));
    assert_eq!(w.latest_float(ElementId(11), Property::TranslateY), Some(0.0));
    assert!(w
        .latest(ElementId(12), Property::ClipPath)
        .and_then(|v| v.as_inset())
        .is_some_and(|i| i.is_open()));
    assert_eq!(w.latest_float(ElementId(2), Property::Scale), Some(1.0));
    assert_eq!(w.latest_float(ElementId(31), Property::TranslateX), Some(0.0));
    assert_eq!(w.latest_float(ElementId(32), Property::Opacity), Some(1.0));
    assert_eq!(w.latest_float(ElementId(40), Property::TranslateX), Some(0.0));
    assert!(out.events.iter().all(|e| matches!(
        e,
        MotionEvent::BindingSkipped {
            reason: SkipReason::ReducedMotion,
            ..
        }
    )));
}

#[test]
fn ticks_and_scrolls_do_nothing_under_reduced_motion() {
    let surface = layouts::surface("home").unwrap();
    let engine = reduced();
    let _h = primitives::marquee::bind(&engine, &surface, ElementId(40), &MarqueeConfig::default());
    engine.drain();
    engine.tick(1.0);
    engine.scroll(prax_motion_core::ScrollState::at(2000.0, surface.scroll_limit()));
    assert!(engine.drain().is_empty());
}

#[test]
fn continue_policy_keeps_the_marquee_running() {
    let surface = layouts::surface("home").unwrap();
    let engine = reduced();
    let cfg = MarqueeConfig {
        reduced_motion: ReducedMotionPolicy::Continue,
        ..MarqueeConfig::default()
    };
    let h = primitives::marquee::bind(&engine, &surface, ElementId(40), &cfg);
    assert!(h.is_live());
    assert_eq!(engine.resources().frame_callbacks, 1);
}

#[test]
fn preference_is_read_once_at_first_bind() {
    use std::cell::Cell;
    use std::rc::Rc;

    let reads = Rc::new(Cell::new(0u32));
    let r = reads.clone();
    let engine = MotionEngine::new(
        MotionConfig::default(),
        MotionGate::new(move || {
            r.set(r.get() + 1);
            None
        }),
    );
    assert_eq!(reads.get(), 0);
    let surface = layouts::surface("single-card").unwrap();
    let a = primitives::clip::bind(&engine, &surface, ElementId(1), &Default::default());
    let b = primitives::marquee::bind(&engine, &surface, ElementId(1), &Default::default());
    assert_eq!(reads.get(), 1);
    // an unavailable signal means motion is allowed
    assert!(a.is_live() && b.is_live());
}
