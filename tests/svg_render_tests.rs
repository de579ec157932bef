use classroom_charts::core::Viewport;
use classroom_charts::filter::MarkState;
use classroom_charts::render::{
    ClipRect, Color, Mark, MarkKey, MarkShape, MarkStyle, NullRenderer, RenderFrame, Renderer,
    SvgRenderer, TextAnchor, TextPrimitive,
};
use classroom_charts::ChartError;

fn frame() -> RenderFrame {
    RenderFrame::new(Viewport::new(200, 100))
        .with_clip(ClipRect {
            x: 10.0,
            y: 10.0,
            width: 180.0,
            height: 80.0,
        })
        .with_text(
            TextPrimitive::new("Age & <years>", 5.0, 5.0, 12.0, Color::BLACK, TextAnchor::Start)
                .with_class("title"),
        )
        .with_mark(Mark::new(
            MarkKey::Id(7),
            MarkState::Active,
            MarkShape::Circle {
                cx: 50.0,
                cy: 50.0,
                r: 5.0,
            },
            MarkStyle::filled(Color::rgb8(0x33, 0x33, 0x55), 0.6),
        ))
        .with_mark(Mark::new(
            MarkKey::Id(8),
            MarkState::Selected,
            MarkShape::Arrow {
                x1: 20.0,
                y1: 80.0,
                x2: 60.0,
                y2: 40.0,
            },
            MarkStyle::stroked(Color::rgb8(0xff, 0xa5, 0x00), 4.0),
        ))
}

#[test]
fn svg_document_carries_clip_marks_and_arrow_markers() {
    let mut renderer = SvgRenderer::default();
    renderer.render(&frame()).expect("svg render");
    let svg = renderer.document();

    assert!(svg.contains("<clipPath id=\"chart-mask\">"));
    assert!(svg.contains("clip-path=\"url(#chart-mask)\""));
    assert!(svg.contains("class=\"mark active\" data-key=\"id-7\""));
    assert!(svg.contains("class=\"mark selected\" data-key=\"id-8\""));
    assert!(svg.contains("<marker id=\"arrow-ffa500\""));
    assert!(svg.contains("marker-end=\"url(#arrow-ffa500)\""));
    assert!(svg.contains("Age &amp; &lt;years&gt;"));
    assert_eq!(renderer.skipped_marks(), 0);
}

#[test]
fn marks_with_nan_geometry_are_skipped() {
    let frame = frame().with_mark(Mark::new(
        MarkKey::Index(0),
        MarkState::Active,
        MarkShape::Circle {
            cx: f64::NAN,
            cy: 1.0,
            r: 2.0,
        },
        MarkStyle::filled(Color::BLACK, 1.0),
    ));
    let mut renderer = SvgRenderer::default();
    renderer.render(&frame).expect("svg render");
    assert_eq!(renderer.skipped_marks(), 1);
    assert!(!renderer.document().contains("index-0"));
}

#[test]
fn invalid_decorations_are_rejected() {
    let broken = frame().with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        12.0,
        Color::BLACK,
        TextAnchor::Middle,
    ));
    let err = SvgRenderer::default()
        .render(&broken)
        .expect_err("empty text must fail validation");
    assert!(matches!(err, ChartError::InvalidData(_)));

    NullRenderer::default()
        .render(&frame())
        .expect("null renderer accepts a valid frame");
}

#[test]
fn hit_test_honours_clip_and_draw_order() {
    let frame = frame();
    assert_eq!(
        frame.hit_test(53.0, 53.0).map(|mark| &mark.key),
        Some(&MarkKey::Id(7))
    );
    assert!(frame.hit_test(2.0, 2.0).is_none());
}
