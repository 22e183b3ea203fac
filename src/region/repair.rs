use antimeridian::{repair_geometry, RepairReport};
use tracing::{debug, warn};

use crate::region::Feature;

/// Dropped holes larger than this (square degrees) are worth a warning.
const HOLE_AREA_WARN: f64 = 1e-6;

/// Split a feature's polygons along the antimeridian. Never fails; features
/// without geometry pass through untouched.
pub fn repair(feature: Feature) -> Feature {
    repair_with_report(feature).0
}

/// [`repair`], also returning what changed.
pub fn repair_with_report(mut feature: Feature) -> (Feature, RepairReport) {
    let Some(geometry) = feature.geometry.take() else {
        return (feature, RepairReport::default());
    };

    let (geometry, report) = repair_geometry(geometry);
    feature.geometry = Some(geometry);

    if !report.is_noop() {
        let name = feature.property_str("name")
            .or_else(|| feature.property_str("NAME_2"))
            .or_else(|| feature.property_str("NAME_1"))
            .unwrap_or("<unnamed>")
            .to_string();
        debug!(feature = %name, split = report.split_polygons, "split polygon at antimeridian");
        if report.dropped_hole_area > HOLE_AREA_WARN {
            warn!(
                feature = %name,
                holes = report.dropped_holes,
                area = report.dropped_hole_area,
                "discarded holes of a polygon crossing the antimeridian"
            );
        }
    }
    (feature, report)
}
