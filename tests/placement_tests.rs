// Host-side tests for collision-avoiding placement and its exhaustion policies.

use glam::Vec3;
use kaleido_core::{
    place_items, CandidateSource, EffectKind, EffectParams, ExhaustionPolicy, GlyphMetrics,
    GlyphSource, MonospaceMetrics, PlacementConfig, Proposal, ShapeKind, ShapeSource,
    SphereParams, SpiralParams, StaticParams, WordSource, PLACEMENT_ATTEMPTS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn crowded() -> EffectParams {
    EffectParams::Sphere(SphereParams { radius: 0.5 })
}

/// Wraps a source and counts how often each side of the contract is used.
struct Counting<S> {
    inner: S,
    proposed: usize,
    realized: usize,
}

impl<S: CandidateSource> CandidateSource for Counting<S> {
    type Spec = S::Spec;
    type Payload = S::Payload;

    fn propose<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Option<Proposal<S::Spec>> {
        self.proposed += 1;
        self.inner.propose(index, rng)
    }

    fn realize<R: Rng + ?Sized>(&mut self, index: usize, spec: S::Spec, rng: &mut R) -> S::Payload {
        self.realized += 1;
        self.inner.realize(index, spec, rng)
    }
}

#[test]
fn shape_mode_never_overlaps_across_seeds_and_layouts() {
    // Property: in drop mode every accepted pair is at least r_a + r_b apart
    for seed in 0..25u64 {
        let mut param_rng = StdRng::seed_from_u64(seed ^ 0xABCD);
        for kind in EffectKind::ALL {
            let effect = match EffectParams::for_kind(kind) {
                EffectParams::Sphere(_) => EffectParams::Sphere(SphereParams {
                    radius: param_rng.gen_range(1.0..6.0),
                }),
                EffectParams::Static(_) => EffectParams::Static(StaticParams {
                    spread: param_rng.gen_range(2.0..20.0),
                }),
                EffectParams::Spiral(p) => EffectParams::Spiral(SpiralParams {
                    arms: param_rng.gen_range(1..5),
                    jitter: param_rng.gen_range(0.0..2.0),
                    ..p
                }),
                other => other,
            };
            let count = param_rng.gen_range(1..60);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut source = ShapeSource::new(ShapeKind::ALL);
            let run = place_items(&PlacementConfig::shapes(count), &mut source, &effect, &mut rng);

            assert!(run.placed.is_overlap_free(), "seed {seed} {kind:?} overlapped");
            let items = run.placed.as_slice();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    let d = a.position.distance(b.position);
                    assert!(d >= a.bounding_radius + b.bounding_radius);
                }
            }
            assert_eq!(run.report.forced, 0);
            assert_eq!(run.report.accepted + run.report.dropped, count);
        }
    }
}

#[test]
fn shape_mode_drops_when_space_runs_out() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut source = ShapeSource::new([ShapeKind::Box]);
    let run = place_items(&PlacementConfig::shapes(30), &mut source, &crowded(), &mut rng);
    assert!(run.report.dropped > 0, "expected drops on a tiny shell");
    assert!(run.accepted.len() < 30);
    assert!(run.placed.is_overlap_free());
    assert_eq!(run.accepted.len(), run.placed.len());
}

#[test]
fn glyph_mode_places_every_visible_character() {
    let metrics = MonospaceMetrics::default();
    for text in ["A", "KALEIDOSCOPE", "hello world", "  spaced  out  ", "ünïcödé ✓"] {
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut source = GlyphSource::new(text, &metrics);
            let visible = source.placeable_count();
            let config = PlacementConfig::glyphs(source.len());
            let run = place_items(&config, &mut source, &crowded(), &mut rng);
            assert_eq!(run.accepted.len(), visible, "text {text:?} seed {seed}");
            let whitespace = text.chars().filter(|c| c.is_whitespace()).count();
            assert_eq!(run.report.skipped, whitespace);
            assert_eq!(run.report.dropped, 0);
        }
    }
}

#[test]
fn glyph_mode_forces_the_last_attempt_when_crowded() {
    let metrics = MonospaceMetrics::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut source = GlyphSource::new("OVERLAPPING", &metrics);
    let run = place_items(
        &PlacementConfig::glyphs(source.len()),
        &mut source,
        &crowded(),
        &mut rng,
    );
    assert!(run.report.forced > 0);
    assert!(run.accepted.iter().any(|a| a.forced));
    assert_eq!(
        run.accepted.iter().filter(|a| a.forced).count(),
        run.report.forced
    );
}

#[test]
fn exhaustion_policy_is_configurable_per_run() {
    let effect = crowded();

    let mut rng = StdRng::seed_from_u64(3);
    let mut shapes = ShapeSource::new(ShapeKind::ALL);
    let forced = PlacementConfig::new(25, ExhaustionPolicy::AcceptLast);
    let run = place_items(&forced, &mut shapes, &effect, &mut rng);
    assert_eq!(run.accepted.len(), 25, "shapes with accept-last keep every item");

    let metrics = MonospaceMetrics::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut glyphs = GlyphSource::new("ABCDEFGHIJKLMNOP", &metrics);
    let dropping = PlacementConfig::new(glyphs.len(), ExhaustionPolicy::Drop);
    let run = place_items(&dropping, &mut glyphs, &effect, &mut rng);
    assert!(run.accepted.len() < 16, "glyphs with drop may lose letters");
    assert!(run.placed.is_overlap_free());
}

#[test]
fn payloads_are_built_only_for_accepted_candidates() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut source = Counting {
        inner: ShapeSource::new(ShapeKind::ALL),
        proposed: 0,
        realized: 0,
    };
    let run = place_items(&PlacementConfig::shapes(30), &mut source, &crowded(), &mut rng);
    assert_eq!(source.realized, run.accepted.len());
    assert_eq!(source.proposed, run.report.attempts);
    assert!(source.proposed > source.realized);
}

#[test]
fn attempts_never_exceed_the_budget() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut source = ShapeSource::new(ShapeKind::ALL);
    let config = PlacementConfig::shapes(30).with_max_attempts(5);
    let run = place_items(&config, &mut source, &crowded(), &mut rng);
    assert!(run.report.attempts <= 30 * 5);
    assert_eq!(PlacementConfig::shapes(1).max_attempts, PLACEMENT_ATTEMPTS);
}

#[test]
fn zero_attempt_budget_still_places_every_glyph() {
    let metrics = MonospaceMetrics::default();
    let config = PlacementConfig::glyphs(3).with_max_attempts(0);
    assert_eq!(config.max_attempts, 1);

    let mut rng = StdRng::seed_from_u64(6);
    let mut source = GlyphSource::new("ABC", &metrics);
    let run = place_items(&config, &mut source, &crowded(), &mut rng);
    assert_eq!(run.accepted.len(), 3);
    assert_eq!(run.report.dropped, 0);

    // A budget written straight into the struct gets the same floor.
    let raw = PlacementConfig {
        max_attempts: 0,
        ..PlacementConfig::glyphs(3)
    };
    let mut source = GlyphSource::new("ABC", &metrics);
    let run = place_items(&raw, &mut source, &crowded(), &mut rng);
    assert_eq!(run.accepted.len(), 3);
}

#[test]
fn each_attempt_resamples_the_position() {
    // Two boxes on a shell barely bigger than one: the second index must move
    // around the shell rather than re-testing one spot.
    let mut rng = StdRng::seed_from_u64(9);
    let mut source = ShapeSource::new([ShapeKind::Box]);
    let effect = EffectParams::Sphere(SphereParams { radius: 3.0 });
    let run = place_items(&PlacementConfig::shapes(2), &mut source, &effect, &mut rng);
    assert_eq!(run.accepted.len(), 2);
}

#[test]
fn empty_shape_selection_yields_empty_run() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut source = ShapeSource::new([]);
    let run = place_items(
        &PlacementConfig::shapes(30),
        &mut source,
        &EffectParams::default(),
        &mut rng,
    );
    assert!(run.accepted.is_empty());
    assert!(run.placed.is_empty());
    assert_eq!(run.report.skipped, 30);
    assert_eq!(run.report.attempts, 0);
}

#[test]
fn shape_payloads_come_from_the_selection() {
    let kinds = [ShapeKind::Torus, ShapeKind::TorusKnot];
    let mut rng = StdRng::seed_from_u64(17);
    let mut source = ShapeSource::new(kinds);
    let run = place_items(
        &PlacementConfig::shapes(30),
        &mut source,
        &EffectParams::default(),
        &mut rng,
    );
    assert!(!run.accepted.is_empty());
    for a in &run.accepted {
        assert!(kinds.contains(&a.payload.kind));
        assert!((0.15..=0.65).contains(&a.payload.size));
        assert!((a.placement.bounding_radius - a.payload.size * 1.5).abs() < 1e-6);
        assert!(a.payload.color.iter().all(|c| (0.0..1.0).contains(c)));
    }
}

#[test]
fn shape_names_round_trip() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ShapeKind::from_name("torusKnot"), Some(ShapeKind::TorusKnot));
    assert_eq!(ShapeKind::from_name("dodecahedron"), None);
}

#[test]
fn word_mode_places_whole_text_copies() {
    let metrics = MonospaceMetrics::default();
    let mut source = WordSource::new("HI THERE", &metrics, 10);
    let bounds = source.bounds();
    // 7 visible glyphs, 6 gaps between them
    let expected_width = 7.0 * 0.6 + 6.0 * 0.1;
    assert!((bounds.width - expected_width).abs() < 1e-5);

    let mut rng = StdRng::seed_from_u64(2);
    let run = place_items(
        &PlacementConfig::new(source.copies(), ExhaustionPolicy::Drop),
        &mut source,
        &EffectParams::default(),
        &mut rng,
    );
    assert!(!run.accepted.is_empty());
    assert!(run.placed.is_overlap_free());
    for a in &run.accepted {
        assert_eq!(a.payload.letters.len(), 7);
        assert!((a.payload.letters[0].offset.x + expected_width / 2.0).abs() < 1e-5);
        assert!(a.payload.letters.windows(2).all(|w| w[1].offset.x > w[0].offset.x));
    }
}

#[test]
fn word_letters_fit_the_sphere_around_the_item_position() {
    let metrics = MonospaceMetrics::default();
    for text in ["A", "KALEIDO", "a much longer line of text"] {
        let mut source = WordSource::new(text, &metrics, 1);
        let radius = source.bounds().bounding_radius();
        let mut rng = StdRng::seed_from_u64(0);
        let run = place_items(
            &PlacementConfig::new(1, ExhaustionPolicy::Drop),
            &mut source,
            &EffectParams::default(),
            &mut rng,
        );
        let word = &run.accepted[0].payload;
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for letter in &word.letters {
            let lo = letter.offset;
            let hi = lo + 2.0 * letter.geometry.bounds.half_extent();
            min = min.min(lo);
            max = max.max(hi);
            for corner in [lo, hi] {
                assert!(corner.length() <= radius + 1e-5, "{text:?}: {corner} outside {radius}");
            }
        }
        let centre = (min + max) / 2.0;
        assert!(centre.length() < 1e-5, "{text:?} centred at {centre}");
    }
}

#[test]
fn monospace_metrics_skip_whitespace() {
    let m = MonospaceMetrics::default();
    assert!(m.glyph_box(' ').is_none());
    assert!(m.glyph_box('\n').is_none());
    let a = m.glyph_box('a').expect("visible glyph");
    assert!(a.bounding_radius() > 0.0);
}
