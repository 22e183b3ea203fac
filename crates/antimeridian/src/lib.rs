//! Antimeridian repair for lon/lat polygons.
//!
//! Polygons in world datasets that straddle the ±180° meridian are stored with
//! edges that jump from roughly +180 to roughly -180. Drawn in a linear
//! longitude space those edges smear across the whole map. [`repair_geometry`]
//! cuts such polygons along the seam into one part per side.
//!
//! Only the outer ring decides whether a polygon is split. Holes of a split
//! polygon are discarded and reported through [`RepairReport`].
pub mod split;

use geo::{Area, Geometry, LineString, MultiPolygon, Polygon};

pub use split::{crosses_antimeridian, crossing_latitude, split_ring, RingSplit, SEAM_THRESHOLD};

/// What a repair pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    /// Polygons whose outer ring crossed the seam and was split.
    pub split_polygons: usize,
    /// Holes discarded because their polygon was split.
    pub dropped_holes: usize,
    /// Total area of the discarded holes, in square degrees.
    pub dropped_hole_area: f64,
    /// Sides of a split that were too small to form a ring.
    pub degenerate_rings: usize,
}

impl RepairReport {
    /// True if the pass left the geometry untouched.
    #[inline] pub fn is_noop(&self) -> bool { self.split_polygons == 0 }

    fn merge(&mut self, other: &RepairReport) {
        self.split_polygons += other.split_polygons;
        self.dropped_holes += other.dropped_holes;
        self.dropped_hole_area += other.dropped_hole_area;
        self.degenerate_rings += other.degenerate_rings;
    }
}

/// Split a single polygon along the antimeridian.
///
/// A polygon whose outer ring does not cross is returned as the only element,
/// holes included. Otherwise one hole-free polygon per surviving side is returned.
pub fn repair_polygon(polygon: &Polygon<f64>) -> (Vec<Polygon<f64>>, RepairReport) {
    let mut report = RepairReport::default();
    let Some(split) = split_ring(polygon.exterior()) else {
        return (vec![polygon.clone()], report);
    };

    report.split_polygons = 1;
    report.degenerate_rings = split.degenerate;
    report.dropped_holes = polygon.interiors().len();
    report.dropped_hole_area = polygon.interiors().iter()
        .map(|hole| Polygon::new(hole.clone(), vec![]).unsigned_area())
        .sum();

    let parts = split.parts.into_iter()
        .map(|ring: LineString<f64>| Polygon::new(ring, vec![]))
        .collect();
    (parts, report)
}

/// Repair a geometry in place of the original.
///
/// `Polygon` stays a `Polygon` only when it comes out as exactly one part;
/// otherwise it is promoted to `MultiPolygon`. `MultiPolygon` inputs flatten
/// the parts of every member. Non-polygonal geometries pass through.
pub fn repair_geometry(geometry: Geometry<f64>) -> (Geometry<f64>, RepairReport) {
    match geometry {
        Geometry::Polygon(polygon) => {
            if !crosses_antimeridian(polygon.exterior()) {
                return (Geometry::Polygon(polygon), RepairReport::default());
            }
            let (mut parts, report) = repair_polygon(&polygon);
            let repaired = if parts.len() == 1 {
                Geometry::Polygon(parts.remove(0))
            } else {
                Geometry::MultiPolygon(MultiPolygon(parts))
            };
            (repaired, report)
        }
        Geometry::MultiPolygon(multi) => {
            if !multi.0.iter().any(|p| crosses_antimeridian(p.exterior())) {
                return (Geometry::MultiPolygon(multi), RepairReport::default());
            }
            let mut report = RepairReport::default();
            let mut polygons = Vec::with_capacity(multi.0.len() + 1);
            for polygon in &multi.0 {
                let (parts, r) = repair_polygon(polygon);
                report.merge(&r);
                polygons.extend(parts);
            }
            (Geometry::MultiPolygon(MultiPolygon(polygons)), report)
        }
        other => (other, RepairReport::default()),
    }
}
