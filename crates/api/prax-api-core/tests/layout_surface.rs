use prax_api_core::{ElementId, LayoutSurface, Rect, Surface, SurfaceError, Viewport};

#[test]
fn parses_layout_json_and_answers_queries() {
    let json = r#"{
        "viewport": { "width": 1280, "height": 800 },
        "document_height": 4000,
        "elements": [
            { "id": 1, "rect": { "x": 0, "y": 900, "width": 1280, "height": 400 } },
            { "id": 2, "rect": { "x": 40, "y": 1500, "width": 300, "height": 200 } }
        ]
    }"#;
    let surface = LayoutSurface::from_json(json).expect("layout parses");
    assert_eq!(surface.viewport(), Viewport { width: 1280.0, height: 800.0 });
    assert_eq!(surface.scroll_limit(), 3200.0);
    assert_eq!(
        surface.rect(ElementId(2)),
        Some(Rect::new(40.0, 1500.0, 300.0, 200.0))
    );
    assert_eq!(surface.rect(ElementId(9)), None);
}

#[test]
fn rejects_bad_json_and_bad_rects() {
    assert!(matches!(
        LayoutSurface::from_json("{ nope"),
        Err(SurfaceError::Parse(_))
    ));
    let mut s = LayoutSurface::new(Viewport::default(), 100.0);
    assert_eq!(
        s.attach(ElementId(1), Rect::new(0.0, f32::INFINITY, 1.0, 1.0)),
        Err(SurfaceError::InvalidRect(ElementId(1)))
    );
    assert!(s.is_empty());
}

#[test]
fn detach_makes_element_unrendered() {
    let mut s = LayoutSurface::new(Viewport::default(), 2000.0);
    s.attach(ElementId(5), Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(s.is_attached(ElementId(5)));
    s.detach(ElementId(5));
    assert_eq!(s.rect(ElementId(5)), None);
}
