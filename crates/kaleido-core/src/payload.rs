//! Candidate sources for the placement engine.
//!
//! A source answers two questions: how big is the next candidate (a bounding
//! radius, cheap and allocation-free) and, once a candidate is accepted, what
//! the renderer should build for it. Three sources exist:
//!
//! - [`ShapeSource`]: random primitive shapes from the selected kinds
//! - [`GlyphSource`]: one item per visible character of a text
//! - [`WordSource`]: the whole text as a single item, placed several times

use fnv::FnvHashMap;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use crate::constants::{
    GLYPH_ADVANCE, GLYPH_DEPTH, GLYPH_SIZE, GLYPH_SPACING, SHAPE_RADIUS_FACTOR, SHAPE_SIZE_MIN,
    SHAPE_SIZE_SPAN,
};
use crate::placement::{CandidateSource, Proposal};

// ---------------- Shapes ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Sphere,
    Box,
    Cone,
    Cylinder,
    Torus,
    Tetrahedron,
    Octahedron,
    Icosahedron,
    TorusKnot,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Sphere,
        ShapeKind::Box,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Torus,
        ShapeKind::Tetrahedron,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
        ShapeKind::TorusKnot,
    ];

    /// Parse a shape checkbox value.
    pub fn from_name(name: &str) -> Option<Self> {
        ShapeKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Box => "box",
            ShapeKind::Cone => "cone",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Torus => "torus",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Icosahedron => "icosahedron",
            ShapeKind::TorusKnot => "torusKnot",
        }
    }

    /// Geometry the renderer should build for a shape of nominal `size`.
    pub fn geometry(self, size: f32) -> ShapeGeometry {
        match self {
            ShapeKind::Sphere => ShapeGeometry::Sphere {
                radius: size,
                width_segments: 32,
                height_segments: 16,
            },
            ShapeKind::Box => ShapeGeometry::Box {
                width: size,
                height: size,
                depth: size,
            },
            ShapeKind::Cone => ShapeGeometry::Cone {
                radius: size,
                height: size * 2.0,
                radial_segments: 32,
            },
            ShapeKind::Cylinder => ShapeGeometry::Cylinder {
                radius_top: size * 0.7,
                radius_bottom: size * 0.7,
                height: size * 1.5,
                radial_segments: 32,
            },
            ShapeKind::Torus => ShapeGeometry::Torus {
                radius: size,
                tube: size * 0.4,
                radial_segments: 16,
                tubular_segments: 100,
            },
            ShapeKind::Tetrahedron => ShapeGeometry::Tetrahedron { radius: size },
            ShapeKind::Octahedron => ShapeGeometry::Octahedron { radius: size },
            ShapeKind::Icosahedron => ShapeGeometry::Icosahedron { radius: size },
            ShapeKind::TorusKnot => ShapeGeometry::TorusKnot {
                radius: size,
                tube: size * 0.3,
                tubular_segments: 100,
                radial_segments: 16,
            },
        }
    }
}

/// Renderer-side geometry request for a primitive shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ShapeGeometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Tetrahedron {
        radius: f32,
    },
    Octahedron {
        radius: f32,
    },
    Icosahedron {
        radius: f32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapePayload {
    pub kind: ShapeKind,
    pub size: f32,
    pub color: [f32; 3],
    pub geometry: ShapeGeometry,
}

/// Random shapes drawn from a selection of kinds.
///
/// Each attempt draws a fresh size; the kind and colour are drawn only once
/// the candidate is accepted.
#[derive(Clone, Debug)]
pub struct ShapeSource {
    kinds: SmallVec<[ShapeKind; 9]>,
}

impl ShapeSource {
    pub fn new(kinds: impl IntoIterator<Item = ShapeKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }
}

impl CandidateSource for ShapeSource {
    type Spec = f32;
    type Payload = ShapePayload;

    fn propose<R: Rng + ?Sized>(&mut self, _index: usize, rng: &mut R) -> Option<Proposal<f32>> {
        if self.kinds.is_empty() {
            return None;
        }
        let size = SHAPE_SIZE_MIN + rng.gen::<f32>() * SHAPE_SIZE_SPAN;
        Some(Proposal {
            bounding_radius: size * SHAPE_RADIUS_FACTOR,
            spec: size,
        })
    }

    fn realize<R: Rng + ?Sized>(&mut self, _index: usize, size: f32, rng: &mut R) -> ShapePayload {
        let kind = self.kinds[rng.gen_range(0..self.kinds.len())];
        ShapePayload {
            kind,
            size,
            color: random_color(rng),
            geometry: kind.geometry(size),
        }
    }
}

#[inline]
fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    let r = rng.gen::<f32>();
    let g = rng.gen::<f32>();
    let b = rng.gen::<f32>();
    [r, g, b]
}

// ---------------- Glyphs ----------------

/// Axis-aligned extent of one extruded glyph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphBox {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl GlyphBox {
    /// Radius of the sphere circumscribing the box.
    pub fn bounding_radius(&self) -> f32 {
        self.half_extent().length()
    }

    pub fn half_extent(&self) -> Vec3 {
        0.5 * Vec3::new(self.width, self.height, self.depth)
    }
}

/// Font-derived glyph extents. `None` means the character has no outline
/// (whitespace, or missing from the font) and is skipped.
pub trait GlyphMetrics {
    fn glyph_box(&self, ch: char) -> Option<GlyphBox>;
}

impl<T: GlyphMetrics + ?Sized> GlyphMetrics for Box<T> {
    fn glyph_box(&self, ch: char) -> Option<GlyphBox> {
        (**self).glyph_box(ch)
    }
}

/// Fixed-width fallback used before a font has reported real metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub size: f32,
    pub depth: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: GLYPH_ADVANCE * GLYPH_SIZE,
            size: GLYPH_SIZE,
            depth: GLYPH_DEPTH,
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn glyph_box(&self, ch: char) -> Option<GlyphBox> {
        if ch.is_whitespace() || ch.is_control() {
            return None;
        }
        Some(GlyphBox {
            width: self.advance,
            height: self.size,
            depth: self.depth,
        })
    }
}

/// Per-character extents measured from a loaded font.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphTable {
    boxes: FnvHashMap<char, GlyphBox>,
}

impl GlyphTable {
    pub fn insert(&mut self, ch: char, glyph: GlyphBox) {
        self.boxes.insert(ch, glyph);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl FromIterator<(char, GlyphBox)> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = (char, GlyphBox)>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl GlyphMetrics for GlyphTable {
    fn glyph_box(&self, ch: char) -> Option<GlyphBox> {
        if ch.is_whitespace() {
            return None;
        }
        self.boxes.get(&ch).copied()
    }
}

/// Extruded-text geometry request, shared by every placed copy of a character.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlyphGeometry {
    pub ch: char,
    pub size: f32,
    pub depth: f32,
    pub bounds: GlyphBox,
}

/// Glyph geometry starts at its min corner; `offset` moves the box centre
/// onto the item position, where the bounding sphere is centred.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlyphPayload {
    pub geometry: Arc<GlyphGeometry>,
    pub offset: Vec3,
    pub color: [f32; 3],
}

#[derive(Debug, Default)]
struct GlyphPool {
    geometries: FnvHashMap<char, Arc<GlyphGeometry>>,
}

impl GlyphPool {
    fn get(&mut self, ch: char, bounds: GlyphBox) -> Arc<GlyphGeometry> {
        Arc::clone(self.geometries.entry(ch).or_insert_with(|| {
            Arc::new(GlyphGeometry {
                ch,
                size: GLYPH_SIZE,
                depth: GLYPH_DEPTH,
                bounds,
            })
        }))
    }
}

/// One candidate per character of `text`; index `i` is the `i`-th char.
pub struct GlyphSource<'m, M: GlyphMetrics + ?Sized> {
    chars: Vec<char>,
    metrics: &'m M,
    pool: GlyphPool,
}

impl<'m, M: GlyphMetrics + ?Sized> GlyphSource<'m, M> {
    pub fn new(text: &str, metrics: &'m M) -> Self {
        Self {
            chars: text.chars().collect(),
            metrics,
            pool: GlyphPool::default(),
        }
    }

    /// Number of indices to request (visible or not).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters that will produce an item.
    pub fn placeable_count(&self) -> usize {
        self.chars
            .iter()
            .filter(|&&ch| self.metrics.glyph_box(ch).is_some())
            .count()
    }
}

impl<'m, M: GlyphMetrics + ?Sized> CandidateSource for GlyphSource<'m, M> {
    type Spec = (char, GlyphBox);
    type Payload = GlyphPayload;

    fn propose<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        _rng: &mut R,
    ) -> Option<Proposal<(char, GlyphBox)>> {
        let ch = *self.chars.get(index)?;
        let bounds = self.metrics.glyph_box(ch)?;
        Some(Proposal {
            bounding_radius: bounds.bounding_radius(),
            spec: (ch, bounds),
        })
    }

    fn realize<R: Rng + ?Sized>(
        &mut self,
        _index: usize,
        (ch, bounds): (char, GlyphBox),
        rng: &mut R,
    ) -> GlyphPayload {
        GlyphPayload {
            geometry: self.pool.get(ch, bounds),
            offset: -bounds.half_extent(),
            color: random_color(rng),
        }
    }
}

// ---------------- Words ----------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordLetter {
    pub geometry: Arc<GlyphGeometry>,
    /// Min corner of the letter relative to the word centre.
    pub offset: Vec3,
    pub color: [f32; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordPayload {
    pub letters: Vec<WordLetter>,
    pub bounds: GlyphBox,
}

/// The whole text laid out left to right as one item, placed `copies` times.
///
/// Letters are laid out around the word centre so the bounding sphere of the
/// whole box covers every letter.
pub struct WordSource {
    layout: Vec<(char, GlyphBox, Vec3)>,
    bounds: GlyphBox,
    copies: usize,
    pool: GlyphPool,
}

impl WordSource {
    pub fn new<M: GlyphMetrics + ?Sized>(text: &str, metrics: &M, copies: usize) -> Self {
        let mut layout = Vec::new();
        let mut cursor = 0.0_f32;
        let mut bounds = GlyphBox {
            width: 0.0,
            height: 0.0,
            depth: 0.0,
        };
        for ch in text.chars() {
            let Some(glyph) = metrics.glyph_box(ch) else {
                continue;
            };
            layout.push((ch, glyph, Vec3::new(cursor, 0.0, 0.0)));
            bounds.width = cursor + glyph.width;
            bounds.height = bounds.height.max(glyph.height);
            bounds.depth = bounds.depth.max(glyph.depth);
            cursor += glyph.width + GLYPH_SPACING;
        }
        let centre = bounds.half_extent();
        for (_, _, offset) in &mut layout {
            *offset -= centre;
        }
        Self {
            layout,
            bounds,
            copies,
            pool: GlyphPool::default(),
        }
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn bounds(&self) -> GlyphBox {
        self.bounds
    }
}

impl CandidateSource for WordSource {
    type Spec = ();
    type Payload = WordPayload;

    fn propose<R: Rng + ?Sized>(&mut self, _index: usize, _rng: &mut R) -> Option<Proposal<()>> {
        if self.layout.is_empty() {
            return None;
        }
        Some(Proposal {
            bounding_radius: self.bounds.bounding_radius(),
            spec: (),
        })
    }

    fn realize<R: Rng + ?Sized>(&mut self, _index: usize, _spec: (), rng: &mut R) -> WordPayload {
        let pool = &mut self.pool;
        let letters = self
            .layout
            .iter()
            .map(|&(ch, glyph, offset)| WordLetter {
                geometry: pool.get(ch, glyph),
                offset,
                color: random_color(rng),
            })
            .collect();
        WordPayload {
            letters,
            bounds: self.bounds,
        }
    }
}

// ---------------- Composed payload ----------------

/// Payload of any item in a generated scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Visual {
    Shape(ShapePayload),
    Glyph(GlyphPayload),
    Word(WordPayload),
}
