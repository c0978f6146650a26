//! Bounded-retry, collision-avoiding placement of items for one slice.
//!
//! For every requested index the engine asks the [`CandidateSource`] for a
//! footprint, samples a fresh position from the active layout and accepts the
//! first candidate that does not overlap anything placed so far. Payloads are
//! realized only for accepted candidates. When the attempt budget runs out the
//! run's [`ExhaustionPolicy`] decides between dropping the index and forcing
//! the last attempted candidate in.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collision::{collides, Placement};
use crate::constants::PLACEMENT_ATTEMPTS;
use crate::effect::EffectParams;

/// What to do with an index whose every attempt collided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Skip the index; the slice may end up with fewer items than requested.
    Drop,
    /// Accept the last attempted candidate even though it overlaps.
    AcceptLast,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    pub target_count: usize,
    pub max_attempts: usize,
    pub on_exhaustion: ExhaustionPolicy,
}

impl PlacementConfig {
    pub fn new(target_count: usize, on_exhaustion: ExhaustionPolicy) -> Self {
        Self {
            target_count,
            max_attempts: PLACEMENT_ATTEMPTS,
            on_exhaustion,
        }
    }

    /// Shapes are decorative filler: exhausted indices are dropped.
    pub fn shapes(target_count: usize) -> Self {
        Self::new(target_count, ExhaustionPolicy::Drop)
    }

    /// Every visible character of the text must appear, overlapping if need be.
    pub fn glyphs(target_count: usize) -> Self {
        Self::new(target_count, ExhaustionPolicy::AcceptLast)
    }

    /// Budgets below one attempt are raised to one so `AcceptLast` always has
    /// a candidate to fall back on.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Footprint of a not-yet-built item plus whatever is needed to build it later.
#[derive(Clone, Debug)]
pub struct Proposal<S> {
    pub bounding_radius: f32,
    pub spec: S,
}

/// Supplies candidate footprints and builds payloads for accepted ones.
pub trait CandidateSource {
    type Spec;
    type Payload;

    /// Cheap footprint query for `index`, called once per attempt. Must not
    /// allocate renderer resources. `None` means the index has nothing to
    /// place and is skipped without consuming attempts.
    fn propose<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Option<Proposal<Self::Spec>>;

    /// Build the payload for an accepted candidate.
    fn realize<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        spec: Self::Spec,
        rng: &mut R,
    ) -> Self::Payload;
}

/// Accepted placements in acceptance order.
#[derive(Clone, Debug, Default)]
pub struct PlacedSet {
    items: Vec<Placement>,
}

impl PlacedSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.items
    }

    /// Pairwise check that no two accepted items overlap.
    pub fn is_overlap_free(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(i, a)| self.items[i + 1..].iter().all(|b| !a.overlaps(b)))
    }

    fn push(&mut self, placement: Placement) {
        self.items.push(placement);
    }
}

#[derive(Clone, Debug)]
pub struct Accepted<P> {
    /// Index requested from the source (not the position in the placed set).
    pub index: usize,
    pub placement: Placement,
    pub payload: P,
    /// Placed by [`ExhaustionPolicy::AcceptLast`] despite overlapping.
    pub forced: bool,
}

impl<P> Accepted<P> {
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Accepted<Q> {
        Accepted {
            index: self.index,
            placement: self.placement,
            payload: f(self.payload),
            forced: self.forced,
        }
    }
}

/// Counters describing how a placement run went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    pub requested: usize,
    pub accepted: usize,
    pub forced: usize,
    pub dropped: usize,
    pub skipped: usize,
    pub attempts: usize,
}

#[derive(Clone, Debug)]
pub struct PlacementRun<P> {
    pub placed: PlacedSet,
    pub accepted: Vec<Accepted<P>>,
    pub report: PlacementReport,
}

/// Place up to `config.target_count` items using `effect` for positions.
pub fn place_items<S, R>(
    config: &PlacementConfig,
    source: &mut S,
    effect: &EffectParams,
    rng: &mut R,
) -> PlacementRun<S::Payload>
where
    S: CandidateSource,
    R: Rng + ?Sized,
{
    let mut placed = PlacedSet::default();
    let mut accepted = Vec::with_capacity(config.target_count);
    let mut report = PlacementReport {
        requested: config.target_count,
        ..Default::default()
    };

    'items: for index in 0..config.target_count {
        let mut last = None;
        let mut winner = None;
        for _ in 0..config.max_attempts.max(1) {
            let Some(proposal) = source.propose(index, rng) else {
                report.skipped += 1;
                continue 'items;
            };
            let position = effect.distribute(index, config.target_count, rng);
            let candidate = Placement::new(position, proposal.bounding_radius);
            report.attempts += 1;
            if !collides(&candidate, placed.as_slice()) {
                winner = Some((candidate, proposal.spec));
                break;
            }
            last = Some((candidate, proposal.spec));
        }

        let (candidate, spec, forced) = match (winner, config.on_exhaustion) {
            (Some((c, s)), _) => (c, s, false),
            (None, ExhaustionPolicy::AcceptLast) => match last {
                Some((c, s)) => (c, s, true),
                None => {
                    report.dropped += 1;
                    continue;
                }
            },
            (None, ExhaustionPolicy::Drop) => {
                report.dropped += 1;
                continue;
            }
        };

        placed.push(candidate);
        let payload = source.realize(index, spec, rng);
        accepted.push(Accepted {
            index,
            placement: candidate,
            payload,
            forced,
        });
        report.accepted += 1;
        if forced {
            report.forced += 1;
        }
    }

    log::debug!(
        "[placement] effect={} requested={} accepted={} forced={} dropped={} skipped={} attempts={}",
        effect.kind().name(),
        report.requested,
        report.accepted,
        report.forced,
        report.dropped,
        report.skipped,
        report.attempts
    );

    PlacementRun {
        placed,
        accepted,
        report,
    }
}
