use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A positioned footprint: the sphere an item occupies for collision purposes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub bounding_radius: f32,
}

impl Placement {
    pub fn new(position: Vec3, bounding_radius: f32) -> Self {
        Self {
            position,
            bounding_radius,
        }
    }

    /// Touching spheres (distance == sum of radii) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.position.distance(other.position) < self.bounding_radius + other.bounding_radius
    }
}

/// True iff `candidate` overlaps any already accepted placement. Linear scan.
#[inline]
pub fn collides(candidate: &Placement, placed: &[Placement]) -> bool {
    placed.iter().any(|p| candidate.overlaps(p))
}
