use geo::Rect;
use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, pointing at one region of one loaded tier.
#[derive(Debug, Clone)]
pub(super) struct BoundingBox {
    tier: usize,    // Index into the index's tier list
    idx: usize,     // Index of the region within its tier
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(super) fn new(tier: usize, idx: usize, bbox: Rect<f64>) -> Self {
        Self { tier, idx, bbox }
    }

    /// Position of the region as `(tier, index)`.
    #[inline] pub(super) fn slot(&self) -> (usize, usize) { (self.tier, self.idx) }

    #[inline] pub(super) fn bbox(&self) -> &Rect<f64> { &self.bbox }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}
