//! Spatial layouts ("effects") that map an item index to a candidate position.
//!
//! Each layout is a pure function of `(index, total, params)` plus a fixed
//! number of uniform draws from the caller's RNG, so a seeded generator yields
//! bit-identical layouts across runs. Draw counts per call:
//!
//! - tunnel: 3 (angle, radius, z)
//! - spiral: 2 (x jitter, y jitter; drawn even when `jitter` is zero)
//! - zoom: 2 (x, y)
//! - sphere: 2 (cos-phi sample, theta)
//! - static: 3 (x, y, z)

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::constants::{
    SPACE_SIZE, SPHERE_RADIUS, TUNNEL_RADIUS_MAX, TUNNEL_RADIUS_MIN, ZOOM_HALF_EXTENT,
    ZOOM_Z_STEP,
};

/// Name of a layout as selected in the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Tunnel,
    Spiral,
    Zoom,
    Sphere,
    Static,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Tunnel,
        EffectKind::Spiral,
        EffectKind::Zoom,
        EffectKind::Sphere,
        EffectKind::Static,
    ];

    /// Map a select value to a layout. Unknown names fall back to `Static`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tunnel" => EffectKind::Tunnel,
            "spiral" => EffectKind::Spiral,
            "zoom" => EffectKind::Zoom,
            "sphere" | "sphere-shell" => EffectKind::Sphere,
            _ => EffectKind::Static,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Tunnel => "tunnel",
            EffectKind::Spiral => "spiral",
            EffectKind::Zoom => "zoom",
            EffectKind::Sphere => "sphere",
            EffectKind::Static => "static",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TunnelParams {
    pub radius_min: f32,
    pub radius_max: f32,
    pub depth: f32,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            radius_min: TUNNEL_RADIUS_MIN,
            radius_max: TUNNEL_RADIUS_MAX,
            depth: SPACE_SIZE,
        }
    }
}

/// Multi-arm spiral receding into -Z.
///
/// - `arms`: number of interleaved arms; item `i` sits on arm `i % arms`
/// - `turns`: full revolutions swept from the first to the last item
/// - `radius_start`/`radius_end`: radius at t = 0 and t = 1
/// - `depth`: total recession along -Z
/// - `jitter`: width of the uniform x/y noise band
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpiralParams {
    pub arms: u32,
    pub turns: f32,
    pub radius_start: f32,
    pub radius_end: f32,
    pub depth: f32,
    pub jitter: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            arms: 1,
            turns: 1.85,
            radius_start: 0.0,
            radius_end: 7.25,
            depth: 11.6,
            jitter: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomParams {
    pub z_step: f32,
}

impl Default for ZoomParams {
    fn default() -> Self {
        Self {
            z_step: ZOOM_Z_STEP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SphereParams {
    pub radius: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticParams {
    pub spread: f32,
}

impl Default for StaticParams {
    fn default() -> Self {
        Self { spread: SPACE_SIZE }
    }
}

/// Parameters of the active layout. Exactly one variant is live per regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EffectParams {
    Tunnel(TunnelParams),
    Spiral(SpiralParams),
    Zoom(ZoomParams),
    Sphere(SphereParams),
    Static(StaticParams),
}

impl Default for EffectParams {
    fn default() -> Self {
        EffectParams::Static(StaticParams::default())
    }
}

impl EffectParams {
    /// Default parameters for a layout; selecting a layout selects its variant.
    pub fn for_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Tunnel => EffectParams::Tunnel(TunnelParams::default()),
            EffectKind::Spiral => EffectParams::Spiral(SpiralParams::default()),
            EffectKind::Zoom => EffectParams::Zoom(ZoomParams::default()),
            EffectKind::Sphere => EffectParams::Sphere(SphereParams::default()),
            EffectKind::Static => EffectParams::Static(StaticParams::default()),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Tunnel(_) => EffectKind::Tunnel,
            EffectParams::Spiral(_) => EffectKind::Spiral,
            EffectParams::Zoom(_) => EffectKind::Zoom,
            EffectParams::Sphere(_) => EffectKind::Sphere,
            EffectParams::Static(_) => EffectKind::Static,
        }
    }

    /// Sample a candidate position for item `index` of `total`.
    pub fn distribute<R: Rng + ?Sized>(&self, index: usize, total: usize, rng: &mut R) -> Vec3 {
        match self {
            EffectParams::Tunnel(p) => tunnel(p, rng),
            EffectParams::Spiral(p) => spiral(p, index, total, rng),
            EffectParams::Zoom(p) => zoom(p, index, rng),
            EffectParams::Sphere(p) => sphere_shell(p, rng),
            EffectParams::Static(p) => static_random(p, rng),
        }
    }

    /// Replace non-finite or out-of-range fields so every layout stays well defined.
    pub fn sanitized(self) -> Self {
        match self {
            EffectParams::Tunnel(p) => {
                let d = TunnelParams::default();
                let a = finite_or(p.radius_min, d.radius_min).max(0.0);
                let b = finite_or(p.radius_max, d.radius_max).max(0.0);
                EffectParams::Tunnel(TunnelParams {
                    radius_min: a.min(b),
                    radius_max: a.max(b),
                    depth: finite_or(p.depth, d.depth).abs(),
                })
            }
            EffectParams::Spiral(p) => {
                let d = SpiralParams::default();
                EffectParams::Spiral(SpiralParams {
                    arms: p.arms.max(1),
                    turns: finite_or(p.turns, d.turns),
                    radius_start: finite_or(p.radius_start, d.radius_start).max(0.0),
                    radius_end: finite_or(p.radius_end, d.radius_end).max(0.0),
                    depth: finite_or(p.depth, d.depth),
                    jitter: finite_or(p.jitter, d.jitter).abs(),
                })
            }
            EffectParams::Zoom(p) => EffectParams::Zoom(ZoomParams {
                z_step: finite_or(p.z_step, ZOOM_Z_STEP),
            }),
            EffectParams::Sphere(p) => EffectParams::Sphere(SphereParams {
                radius: finite_or(p.radius, SPHERE_RADIUS).abs(),
            }),
            EffectParams::Static(p) => EffectParams::Static(StaticParams {
                spread: finite_or(p.spread, SPACE_SIZE).abs(),
            }),
        }
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// One uniform draw mapped onto `[lo, hi)`. Equal bounds are legal.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.gen::<f32>()
}

/// Ring of items around the Z axis, spread through `depth`.
pub fn tunnel<R: Rng + ?Sized>(p: &TunnelParams, rng: &mut R) -> Vec3 {
    let angle = uniform(rng, 0.0, TAU);
    let radius = uniform(rng, p.radius_min, p.radius_max);
    let z = uniform(rng, -p.depth / 2.0, p.depth / 2.0);
    Vec3::new(angle.cos() * radius, angle.sin() * radius, z)
}

/// Deterministic spiral skeleton with additive x/y jitter.
pub fn spiral<R: Rng + ?Sized>(p: &SpiralParams, index: usize, total: usize, rng: &mut R) -> Vec3 {
    let arms = p.arms.max(1);
    let arm = (index % arms as usize) as f32;
    let t = index as f32 / total.saturating_sub(1).max(1) as f32;
    let angle = (TAU / arms as f32) * arm + t * p.turns * TAU;
    let radius = p.radius_start + t * (p.radius_end - p.radius_start);
    let jx = uniform(rng, -p.jitter / 2.0, p.jitter / 2.0);
    let jy = uniform(rng, -p.jitter / 2.0, p.jitter / 2.0);
    Vec3::new(angle.cos() * radius + jx, angle.sin() * radius + jy, -t * p.depth)
}

/// Items recede one `z_step` per index inside a fixed square window.
pub fn zoom<R: Rng + ?Sized>(p: &ZoomParams, index: usize, rng: &mut R) -> Vec3 {
    let x = uniform(rng, -ZOOM_HALF_EXTENT, ZOOM_HALF_EXTENT);
    let y = uniform(rng, -ZOOM_HALF_EXTENT, ZOOM_HALF_EXTENT);
    Vec3::new(x, y, -(index as f32) * p.z_step)
}

/// Area-uniform sample on a sphere of radius `p.radius`.
pub fn sphere_shell<R: Rng + ?Sized>(p: &SphereParams, rng: &mut R) -> Vec3 {
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let theta = uniform(rng, 0.0, TAU);
    debug_assert!((0.0..=PI).contains(&phi));
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    ) * p.radius
}

/// Independent uniform axes inside a cube of edge `p.spread`.
pub fn static_random<R: Rng + ?Sized>(p: &StaticParams, rng: &mut R) -> Vec3 {
    let h = p.spread / 2.0;
    Vec3::new(
        uniform(rng, -h, h),
        uniform(rng, -h, h),
        uniform(rng, -h, h),
    )
}
