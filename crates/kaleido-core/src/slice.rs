use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

use crate::placement::Accepted;
use crate::transform::{derive_transform, random_spin, StepParams};

/// A render-ready item: rigid transform plus a shared, immutable payload.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceItem<P> {
    /// Index the item was requested under.
    pub index: usize,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub bounding_radius: f32,
    pub payload: Arc<P>,
}

impl<P> SliceItem<P> {
    /// Copy of this item rigidly rotated by `angle` radians about +Z.
    /// The payload `Arc` is shared; transforms are not.
    pub fn rotated_about_z(&self, angle: f32) -> Self {
        let q = Quat::from_rotation_z(angle);
        Self {
            index: self.index,
            position: q * self.position,
            rotation: (q * self.rotation).normalize(),
            scale: self.scale,
            bounding_radius: self.bounding_radius,
            payload: Arc::clone(&self.payload),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// One populated, unreflected arrangement of items.
#[derive(Clone, Debug, Serialize)]
pub struct Slice<P> {
    pub items: Vec<SliceItem<P>>,
}

impl<P> Default for Slice<P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P> Slice<P> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rotated_about_z(&self, angle: f32) -> Self {
        Self {
            items: self.items.iter().map(|it| it.rotated_about_z(angle)).collect(),
        }
    }
}

/// Turn accepted placements into slice items.
///
/// Each item gets a random spin (three draws, in acceptance order) plus the
/// deterministic ramp of [`derive_transform`] keyed by its position in the
/// accepted sequence.
pub fn build_slice<P, R>(accepted: Vec<Accepted<P>>, step: &StepParams, rng: &mut R) -> Slice<P>
where
    R: Rng + ?Sized,
{
    let items = accepted
        .into_iter()
        .enumerate()
        .map(|(order, a)| {
            let spin = random_spin(rng);
            let ramp = derive_transform(order, step);
            let euler = spin + ramp.rotation_offset;
            SliceItem {
                index: a.index,
                position: a.placement.position,
                rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
                scale: ramp.scale_multiplier,
                bounding_radius: a.placement.bounding_radius,
                payload: Arc::new(a.payload),
            }
        })
        .collect();
    Slice { items }
}
