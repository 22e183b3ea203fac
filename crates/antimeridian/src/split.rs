use geo::{Coord, LineString};

/// Longitude delta above which an edge is read as a seam crossing rather than
/// a long edge. Valid for region-sized rings, not for paths spanning half the globe.
pub const SEAM_THRESHOLD: f64 = 180.0;

/// Result of splitting one ring at the antimeridian.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSplit {
    /// Closed rings, positive-longitude side first when present.
    pub parts: Vec<LineString<f64>>,
    /// Sides that collected fewer than 3 points and were discarded.
    pub degenerate: usize,
}

/// Returns true if any edge of `ring` jumps more than 180° in longitude.
pub fn crosses_antimeridian(ring: &LineString<f64>) -> bool {
    ring.0.windows(2).any(|w| is_crossing(w[0], w[1]))
}

#[inline]
fn is_crossing(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() > SEAM_THRESHOLD
}

/// Latitude at which the edge `a -> b` meets the ±180° meridian.
///
/// The edge is interpolated in a shifted frame where longitudes live in
/// `(0, 360]`, so that the seam sits at 180 and the edge is short.
pub fn crossing_latitude(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let shift = |x: f64| if x > 0.0 { x } else { x + 360.0 };
    let (lng1, lng2) = (shift(a.x), shift(b.x));
    let d_lng = lng2 - lng1;

    // Both ends sit on the seam itself (e.g. +180 and -180).
    if d_lng.abs() < 1e-10 {
        return (a.y + b.y) / 2.0;
    }

    let t = (180.0 - lng1) / d_lng;
    a.y + t * (b.y - a.y)
}

/// Split a closed ring into one ring per side of the antimeridian.
///
/// Returns `None` when the ring has no crossing edge.
pub fn split_ring(ring: &LineString<f64>) -> Option<RingSplit> {
    if !crosses_antimeridian(ring) {
        return None;
    }

    let mut pos_segments: Vec<Vec<Coord<f64>>> = Vec::new();
    let mut neg_segments: Vec<Vec<Coord<f64>>> = Vec::new();
    let mut cur_pos: Vec<Coord<f64>> = Vec::new();
    let mut cur_neg: Vec<Coord<f64>> = Vec::new();

    for w in ring.0.windows(2) {
        let (p, next) = (w[0], w[1]);
        let is_pos = p.x >= 0.0;

        if is_pos { cur_pos.push(p) } else { cur_neg.push(p) }

        if is_crossing(p, next) {
            let lat = crossing_latitude(p, next);
            let east = Coord { x: 180.0, y: lat };
            let west = Coord { x: -180.0, y: lat };
            if is_pos {
                cur_pos.push(east);
                pos_segments.push(std::mem::take(&mut cur_pos));
                cur_neg.push(west);
            } else {
                cur_neg.push(west);
                neg_segments.push(std::mem::take(&mut cur_neg));
                cur_pos.push(east);
            }
        }
    }
    if !cur_pos.is_empty() { pos_segments.push(cur_pos) }
    if !cur_neg.is_empty() { neg_segments.push(cur_neg) }

    let mut split = RingSplit { parts: Vec::with_capacity(2), degenerate: 0 };
    for segments in [pos_segments, neg_segments] {
        let mut merged: Vec<Coord<f64>> = segments.into_iter().flatten().collect();
        if merged.is_empty() {
            continue;
        }
        if merged.len() < 3 {
            split.degenerate += 1;
            continue;
        }
        // close the ring
        if merged[0] != merged[merged.len() - 1] {
            merged.push(merged[0]);
        }
        split.parts.push(LineString(merged));
    }
    Some(split)
}
