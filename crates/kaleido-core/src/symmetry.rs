use bytemuck::{Pod, Zeroable};
use serde::Serialize;
use std::f32::consts::TAU;

use crate::error::{KaleidoError, Result};
use crate::slice::Slice;

/// Per-item record handed to a GPU renderer (one per item per slice).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ItemInstance {
    pub model: [[f32; 4]; 4],
    pub slice: u32,
    pub item: u32,
    pub _pad: [u32; 2],
}

/// The master slice plus `reflection_count - 1` rotated clones.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition<P> {
    pub reflection_count: u32,
    slices: Vec<Slice<P>>,
}

impl<P> Composition<P> {
    pub fn master(&self) -> &Slice<P> {
        &self.slices[0]
    }

    /// Clone `k` (1-based) sits at `slices()[k]`.
    pub fn clones(&self) -> &[Slice<P>] {
        &self.slices[1..]
    }

    pub fn slices(&self) -> &[Slice<P>] {
        &self.slices
    }

    /// Rotation of slice `k` about +Z.
    pub fn slice_angle(&self, k: usize) -> f32 {
        slice_angle(k as u32, self.reflection_count)
    }

    pub fn item_count(&self) -> usize {
        self.slices.iter().map(Slice::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.master().is_empty()
    }

    pub fn instances(&self) -> Vec<ItemInstance> {
        let mut out = Vec::with_capacity(self.item_count());
        for (k, slice) in self.slices.iter().enumerate() {
            for (i, item) in slice.items.iter().enumerate() {
                out.push(ItemInstance {
                    model: item.model_matrix().to_cols_array_2d(),
                    slice: k as u32,
                    item: i as u32,
                    _pad: [0; 2],
                });
            }
        }
        out
    }
}

#[inline]
fn slice_angle(k: u32, reflection_count: u32) -> f32 {
    TAU * k as f32 / reflection_count as f32
}

/// Replicate `master` around +Z into a full kaleidoscope.
///
/// Clone `k` is the master rotated by `2π·k/reflection_count`; no re-sampling.
/// A count of 1 yields the master alone; 0 is rejected.
pub fn replicate<P>(master: Slice<P>, reflection_count: u32) -> Result<Composition<P>> {
    if reflection_count == 0 {
        return Err(KaleidoError::InvalidParameter(
            "reflection count must be at least 1".into(),
        ));
    }
    let mut slices = Vec::with_capacity(reflection_count as usize);
    for k in 1..reflection_count {
        slices.push(master.rotated_about_z(slice_angle(k, reflection_count)));
    }
    slices.insert(0, master);
    Ok(Composition {
        reflection_count,
        slices,
    })
}
