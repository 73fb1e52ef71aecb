use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prax_motion_core::primitives::{self, RevealConfig, StaggerConfig};
use prax_motion_core::{
    BindingSpec, Ease, ElementId, LayoutSurface, MotionEngine, Rect, Scope, ScrollState, Surface,
    Viewport,
};

fn grid_surface(items: u32) -> LayoutSurface {
    let mut s = LayoutSurface::new(Viewport::default(), items as f32 * 120.0 + 2000.0);
    for i in 0..items {
        let rect = Rect::new((i % 4) as f32 * 360.0, 900.0 + (i / 4) as f32 * 480.0, 340.0, 440.0);
        s.attach(ElementId(i + 1), rect).expect("valid rect");
    }
    s
}

fn ease_benchmark(c: &mut Criterion) {
    let e = Ease::CubicBezier([0.25, 0.1, 0.25, 1.0]);
    c.bench_function("cubic_bezier_ease", |b| b.iter(|| black_box(e.apply(black_box(0.42)))));
}

fn stagger_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stagger_tick");
    for count in [16u32, 128, 512] {
        let surface = grid_surface(count);
        let engine = MotionEngine::default();
        engine.scroll(ScrollState::at(surface.scroll_limit(), surface.scroll_limit()));
        let items: Vec<ElementId> = (1..=count).map(ElementId).collect();
        let reveal = RevealConfig::fade_up().with_trigger(None);
        let _h = primitives::stagger::bind(&engine, &surface, &items, &reveal, &StaggerConfig::each(0.01));
        group.bench_function(format!("{count}_items"), |b| {
            b.iter(|| {
                engine.tick(black_box(1.0 / 120.0));
                black_box(engine.drain())
            })
        });
    }
    group.finish();
}

fn home_scroll_benchmark(c: &mut Criterion) {
    let surface = LayoutSurface::from_json(include_str!("../../../../fixtures/layouts/home.json"))
        .expect("home layout");
    let specs: Vec<BindingSpec> =
        serde_json::from_str(include_str!("../../../../fixtures/bindings/home.json")).expect("home bindings");
    let engine = MotionEngine::default();
    let mut scope = Scope::new("bench");
    for spec in specs {
        scope.add(spec.bind(&engine, &surface));
    }
    let limit = surface.scroll_limit();
    let mut y = 0.0f32;
    c.bench_function("home_scroll_frame", |b| {
        b.iter(|| {
            y = (y + 37.0) % limit;
            engine.scroll(ScrollState::at(y, limit));
            engine.tick(1.0 / 60.0);
            black_box(engine.drain())
        })
    });
}

criterion_group!(benches, ease_benchmark, stagger_tick_benchmark, home_scroll_benchmark);
criterion_main!(benches);
