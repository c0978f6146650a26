//! The regeneration pipeline and its request coalescing.
//!
//! `generate` runs one full pass: candidate source, placement, slice
//! transforms, symmetry replication. `Regenerator` sits between bursty UI
//! input and that pass: it keeps only the newest requested snapshot and swaps
//! in a completely built scene on `flush`, so a half-built composition is
//! never observable.

use instant::Instant;
use rand::prelude::*;

use crate::constants::MAX_SAFE_SEED;
use crate::error::Result;
use crate::payload::{GlyphMetrics, GlyphSource, ShapeSource, Visual, WordSource};
use crate::placement::{place_items, Accepted, CandidateSource, PlacementReport};
use crate::settings::{KaleidoSettings, SceneContent};
use crate::slice::build_slice;
use crate::symmetry::{replicate, Composition};

/// Run one regeneration for `settings`, drawing all randomness from `rng`.
pub fn generate<M, R>(
    settings: &KaleidoSettings,
    metrics: &M,
    rng: &mut R,
) -> Result<(Composition<Visual>, PlacementReport)>
where
    M: GlyphMetrics + ?Sized,
    R: Rng + ?Sized,
{
    let (accepted, report) = match &settings.content {
        SceneContent::Shapes { shapes, count } => {
            if shapes.is_empty() {
                log::warn!("[placement] no shapes selected");
            }
            let mut source = ShapeSource::new(shapes.iter().copied());
            populate(settings, *count, &mut source, Visual::Shape, rng)
        }
        SceneContent::Glyphs { text } => {
            let mut source = GlyphSource::new(text, metrics);
            let total = source.len();
            populate(settings, total, &mut source, Visual::Glyph, rng)
        }
        SceneContent::Word { text, copies } => {
            let mut source = WordSource::new(text, metrics, *copies);
            populate(settings, *copies, &mut source, Visual::Word, rng)
        }
    };
    let master = build_slice(accepted, &settings.step, rng);
    let composition = replicate(master, settings.reflections)?;
    Ok((composition, report))
}

fn populate<S, R>(
    settings: &KaleidoSettings,
    target_count: usize,
    source: &mut S,
    wrap: fn(S::Payload) -> Visual,
    rng: &mut R,
) -> (Vec<Accepted<Visual>>, PlacementReport)
where
    S: CandidateSource,
    R: Rng + ?Sized,
{
    let config = settings.placement_config(target_count);
    let run = place_items(&config, source, &settings.effect, rng);
    let accepted = run.accepted.into_iter().map(|a| a.map(wrap)).collect();
    (accepted, run.report)
}

/// A fully built, displayable result of one regeneration.
#[derive(Clone, Debug)]
pub struct Scene {
    pub generation: u64,
    pub seed: u64,
    pub settings: KaleidoSettings,
    pub composition: Composition<Visual>,
    pub report: PlacementReport,
}

/// Last-writer-wins front door to [`generate`].
///
/// - `request` stores a snapshot, replacing any snapshot not yet realized
/// - `flush` realizes the newest snapshot and replaces the current scene whole
pub struct Regenerator<M> {
    metrics: M,
    seeds: StdRng,
    pending: Option<(u64, KaleidoSettings)>,
    last_generation: u64,
    scene: Option<Scene>,
}

impl<M: GlyphMetrics> Regenerator<M> {
    /// `seed` drives the seeds chosen for snapshots that don't carry their own.
    pub fn new(metrics: M, seed: u64) -> Self {
        Self {
            metrics,
            seeds: StdRng::seed_from_u64(seed),
            pending: None,
            last_generation: 0,
            scene: None,
        }
    }

    /// Swap glyph metrics (e.g. after a font finished loading).
    pub fn set_metrics(&mut self, metrics: M) {
        self.metrics = metrics;
    }

    /// Queue `settings` for the next flush; returns its generation number.
    pub fn request(&mut self, settings: KaleidoSettings) -> u64 {
        self.last_generation += 1;
        let generation = self.last_generation;
        if let Some((old, _)) = self.pending.replace((generation, settings.sanitized())) {
            log::debug!("[regen] generation {old} superseded by {generation}");
        }
        generation
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Realize the newest pending snapshot, if any.
    ///
    /// On error the previous scene stays in place.
    pub fn flush(&mut self) -> Result<Option<&Scene>> {
        let Some((generation, settings)) = self.pending.take() else {
            return Ok(None);
        };
        let seed = settings
            .seed
            .unwrap_or_else(|| self.seeds.gen_range(0..MAX_SAFE_SEED));
        let mut rng = StdRng::seed_from_u64(seed);
        let started = Instant::now();
        let (composition, report) = generate(&settings, &self.metrics, &mut rng)?;
        log::info!(
            "[regen] generation={} effect={} slices={} items={} in {:.2}ms",
            generation,
            settings.effect.kind().name(),
            composition.slices().len(),
            composition.item_count(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        self.scene = Some(Scene {
            generation,
            seed,
            settings,
            composition,
            report,
        });
        Ok(self.scene.as_ref())
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Drop the current scene and any pending request.
    pub fn clear(&mut self) {
        self.pending = None;
        self.scene = None;
    }
}
