use geo::{Area, Centroid, Contains, Geometry, InteriorPoint, Point, Polygon};

/// Where to put a region's text label: the centroid of its largest polygon,
/// or an interior point when the centroid falls outside (e.g. crescent shapes).
pub fn label_anchor(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    let largest: &Polygon<f64> = match geometry {
        Geometry::Polygon(p) => p,
        Geometry::MultiPolygon(mp) => mp.0.iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))?,
        _ => return None,
    };

    match largest.centroid() {
        Some(c) if largest.contains(&c) => Some(c),
        _ => largest.interior_point(),
    }
}
