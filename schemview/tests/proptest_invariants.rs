//! Property-based invariant tests.
//!
//! Verifies:
//! 1. Parse is total: any text yields a model without panicking
//! 2. Every wire in a parsed model came from a four-integer coordinate line
//! 3. Zoom stays within [0.1, 5.0] after any pan/zoom sequence
//! 4. Focal zoom keeps the focal point fixed
//! 5. Drawing leaves the surface's save/restore stack balanced
//! 6. Fit places the bounds center at the container center

use proptest::prelude::*;
use schemview::prelude::*;
use schemview::{compute_bounds, RecordingSurface, MAX_ZOOM, MIN_ZOOM};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_schematic_line() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["$Comp", "$EndComp", "Wire Wire Line"]).prop_map(str::to_string),
        "L [A-Za-z:]{0,8} [A-Z0-9]{0,4}",
        "P -?[0-9]{1,5} -?[0-9]{1,5}",
        r#"F [0-9]{1,3} "[^"\n]{0,10}" [HVX] [0-9]{1,5} [0-9]{1,5}"#,
        "[0-9 ]{0,24}",
        "Text GLabel[ 0-9A-Z]{0,30}",
        "(Title|Date|Rev|Comp) \"?[^\n]{0,12}",
        "#PWR[0-9]{0,3}",
        "[^\n]{0,40}",
    ]
}

fn arb_schematic_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_schematic_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

#[derive(Debug, Clone)]
enum Interaction {
    Pan(f64, f64),
    ZoomAt(f64, f64, f64),
    ZoomAtFocus(f64, f64, f64),
    ZoomIn,
    ZoomOut,
    Wheel(f64),
}

fn arb_interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        (-1e4..1e4f64, -1e4..1e4f64).prop_map(|(dx, dy)| Interaction::Pan(dx, dy)),
        (0.0..20.0f64, -1e3..1e3f64, -1e3..1e3f64)
            .prop_map(|(f, x, y)| Interaction::ZoomAt(f, x, y)),
        (0.01..20.0f64, -1e3..1e3f64, -1e3..1e3f64)
            .prop_map(|(f, x, y)| Interaction::ZoomAtFocus(f, x, y)),
        Just(Interaction::ZoomIn),
        Just(Interaction::ZoomOut),
        (-500.0..500.0f64).prop_map(Interaction::Wheel),
    ]
}

fn apply(vp: Viewport, step: &Interaction) -> Viewport {
    match *step {
        Interaction::Pan(dx, dy) => vp.pan(dx, dy),
        Interaction::ZoomAt(f, x, y) => vp.zoom_at(f, x, y),
        Interaction::ZoomAtFocus(f, x, y) => vp.zoom_at_focus(f, x, y),
        Interaction::ZoomIn => vp.zoom_in(),
        Interaction::ZoomOut => vp.zoom_out(),
        Interaction::Wheel(d) => vp.wheel(d),
    }
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn parse_never_panics_on_arbitrary_text(text in any::<String>()) {
        let _ = parse(&text);
    }

    #[test]
    fn parse_never_panics_on_schematic_like_text(text in arb_schematic_text()) {
        let model = parse(&text);
        prop_assert!(model.components.len() <= text.matches("$Comp").count());
    }

    #[test]
    fn wires_require_wire_header(text in arb_schematic_text()) {
        let model = parse(&text);
        prop_assert!(model.wires.len() <= text.matches("Wire Wire Line").count());
    }

    #[test]
    fn zoom_stays_clamped(
        start in 0.0..10.0f64,
        steps in prop::collection::vec(arb_interaction(), 0..60),
    ) {
        let mut vp = Viewport::new(0.0, 0.0, start);
        prop_assert!(vp.zoom() >= MIN_ZOOM && vp.zoom() <= MAX_ZOOM);
        for step in &steps {
            vp = apply(vp, step);
            prop_assert!(vp.zoom() >= MIN_ZOOM && vp.zoom() <= MAX_ZOOM, "{:?} -> {}", step, vp.zoom());
        }
    }

    #[test]
    fn focal_zoom_keeps_focus(
        pan_x in -1e3..1e3f64,
        pan_y in -1e3..1e3f64,
        zoom in 0.1..5.0f64,
        factor in 0.05..20.0f64,
        fx in 0.0..2000.0f64,
        fy in 0.0..2000.0f64,
    ) {
        let vp = Viewport::new(pan_x, pan_y, zoom);
        let before = vp.to_world(fx, fy);
        let after = vp.zoom_at_focus(factor, fx, fy).to_world(fx, fy);
        prop_assert!((before.0 - after.0).abs() < 1e-6);
        prop_assert!((before.1 - after.1).abs() < 1e-6);
    }

    #[test]
    fn draw_keeps_stack_balanced(text in arb_schematic_text(), zoom in 0.1..5.0f64) {
        let model = parse(&text);
        let viewport = Viewport::new(12.0, -7.0, zoom);
        let mut renderer = SchematicRenderer::new(RecordingSurface::new(800.0, 600.0)).show_grid(false);
        renderer.draw(Some(&model), &viewport);
        prop_assert_eq!(renderer.surface().depth(), 0);
    }

    #[test]
    fn fit_centers_bounds(
        x1 in -5000i64..5000, y1 in -5000i64..5000,
        dx in 1i64..5000, dy in 1i64..5000,
        width in 200.0..3000.0f64, height in 200.0..3000.0f64,
    ) {
        let model = parse(&format!("Wire Wire Line\n{} {} {} {}\n", x1, y1, x1 + dx, y1 + dy));
        let vp = fit_viewport(&model, width, height, 40.0);
        let (cx, cy) = compute_bounds(&model).center();
        let (sx, sy) = vp.to_screen(cx, cy);
        prop_assert!((sx - width / 2.0).abs() < 1e-6);
        prop_assert!((sy - height / 2.0).abs() < 1e-6);
    }
}
