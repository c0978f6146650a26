use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Per-index rotation and scale ramps applied on top of each item's random spin.
///
/// - `rotate_step`: radians added per index on each Euler axis
/// - `scale_step`: geometric scale ratio between consecutive items (1 = no ramp)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepParams {
    pub rotate_step: Vec3,
    pub scale_step: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            rotate_step: Vec3::ZERO,
            scale_step: 1.0,
        }
    }
}

impl StepParams {
    pub fn sanitized(self) -> Self {
        let rotate_step = if self.rotate_step.is_finite() {
            self.rotate_step
        } else {
            Vec3::ZERO
        };
        let scale_step = if self.scale_step.is_finite() && self.scale_step > 0.0 {
            self.scale_step
        } else {
            1.0
        };
        Self {
            rotate_step,
            scale_step,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    pub rotation_offset: Vec3,
    pub scale_multiplier: f32,
}

/// Deterministic rotation offset and scale multiplier for the item at `index`.
#[allow(clippy::float_cmp)]
pub fn derive_transform(index: usize, step: &StepParams) -> ItemTransform {
    let scale_multiplier = if step.scale_step == 1.0 {
        1.0
    } else {
        step.scale_step.powi(index.min(i32::MAX as usize) as i32)
    };
    ItemTransform {
        rotation_offset: step.rotate_step * index as f32,
        scale_multiplier,
    }
}

/// Independent per-item spin: three draws of U(0, π), one per axis.
pub fn random_spin<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let x = rng.gen::<f32>() * PI;
    let y = rng.gen::<f32>() * PI;
    let z = rng.gen::<f32>() * PI;
    Vec3::new(x, y, z)
}
