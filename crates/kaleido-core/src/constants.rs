// Shared layout/placement tuning constants used by the web and native frontends.

// Placement
pub const PLACEMENT_ATTEMPTS: usize = 50; // tries per item before the exhaustion policy applies
pub const SPACE_SIZE: f32 = 20.0; // cubic extent of the static layout and tunnel depth

// Item counts
pub const SHAPE_OBJECT_COUNT: usize = 30; // shapes per slice
pub const WORD_COPIES: usize = 10; // whole-text copies per slice in word mode
pub const DEFAULT_REFLECTIONS: u32 = 6;

// Seeds
pub const MAX_SAFE_SEED: u64 = 1 << 53; // drawn seeds stay exact as JSON numbers in JS

// Shape sizing
pub const SHAPE_SIZE_MIN: f32 = 0.15;
pub const SHAPE_SIZE_SPAN: f32 = 0.5;
pub const SHAPE_RADIUS_FACTOR: f32 = 1.5; // bounding radius relative to shape size

// Glyph sizing (size/depth of the extruded text geometry)
pub const GLYPH_SIZE: f32 = 1.0;
pub const GLYPH_DEPTH: f32 = 0.2;
pub const GLYPH_ADVANCE: f32 = 0.6; // monospace fallback width
pub const GLYPH_SPACING: f32 = 0.1; // gap between letters of a word

// Layout defaults
pub const TUNNEL_RADIUS_MIN: f32 = 1.0;
pub const TUNNEL_RADIUS_MAX: f32 = 5.0;
pub const ZOOM_HALF_EXTENT: f32 = 2.5;
pub const ZOOM_Z_STEP: f32 = 0.8;
pub const SPHERE_RADIUS: f32 = 5.0;

// Boundary clamps applied to imported settings
pub const MAX_REFLECTIONS: u32 = 64;
pub const MAX_ITEMS: usize = 500;
pub const MAX_ATTEMPTS: usize = 1000;
pub const MAX_TEXT_CHARS: usize = 256;
