// Host-side tests for constants and their geometric relationships.
// The main crate is wasm-only, so we pull the constants from kaleido-core.

use kaleido_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Budgets and counts should be positive
    assert!(PLACEMENT_ATTEMPTS > 0);
    assert!(SHAPE_OBJECT_COUNT > 0);
    assert!(WORD_COPIES > 0);
    assert!(DEFAULT_REFLECTIONS >= 1);

    // Defaults must survive import clamping unchanged
    assert!(DEFAULT_REFLECTIONS <= MAX_REFLECTIONS);
    assert!(PLACEMENT_ATTEMPTS <= MAX_ATTEMPTS);
    assert!(SHAPE_OBJECT_COUNT <= MAX_ITEMS);
    assert!(WORD_COPIES <= MAX_ITEMS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sizing_constants_are_positive() {
    assert!(SHAPE_SIZE_MIN > 0.0);
    assert!(SHAPE_SIZE_SPAN > 0.0);
    assert!(SHAPE_RADIUS_FACTOR >= 1.0);
    assert!(GLYPH_SIZE > 0.0);
    assert!(GLYPH_DEPTH > 0.0);
    assert!(GLYPH_ADVANCE > 0.0);
    assert!(GLYPH_SPACING >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_defaults_leave_room_for_items() {
    // Tunnel band must be a real annulus
    assert!(TUNNEL_RADIUS_MIN > 0.0 && TUNNEL_RADIUS_MIN < TUNNEL_RADIUS_MAX);

    // The largest shape must fit inside the static cube and the zoom square
    let largest = (SHAPE_SIZE_MIN + SHAPE_SIZE_SPAN) * SHAPE_RADIUS_FACTOR;
    assert!(largest * 2.0 < SPACE_SIZE);
    assert!(largest < ZOOM_HALF_EXTENT);
    assert!(ZOOM_Z_STEP > 0.0);
    assert!(SPHERE_RADIUS > largest);
}

#[test]
fn defaults_agree_with_constants() {
    let settings = KaleidoSettings::default();
    assert_eq!(settings.reflections, DEFAULT_REFLECTIONS);
    assert_eq!(settings.max_attempts, PLACEMENT_ATTEMPTS);
    match settings.content {
        SceneContent::Shapes { shapes, count } => {
            assert_eq!(count, SHAPE_OBJECT_COUNT);
            assert_eq!(shapes.len(), ShapeKind::ALL.len());
        }
        other => panic!("default content should be shapes, got {other:?}"),
    }
    match EffectParams::for_kind(EffectKind::Sphere) {
        EffectParams::Sphere(p) => assert_eq!(p.radius, SPHERE_RADIUS),
        other => panic!("unexpected {other:?}"),
    }
    match EffectParams::for_kind(EffectKind::Static) {
        EffectParams::Static(p) => assert_eq!(p.spread, SPACE_SIZE),
        other => panic!("unexpected {other:?}"),
    }
}
