use geo::{BoundingRect, Contains, Coord, Geometry, Point, Rect};
use rstar::{RTree, AABB};

use crate::{
    geom::BoundingBox,
    region::{Region, Regions},
};

/// Point-in-region lookup over a set of loaded tiers.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    tiers: Vec<Regions>,
    rtree: RTree<BoundingBox>,
}

impl RegionIndex {
    /// Index every region of the given tiers. Regions without extent are skipped.
    pub fn new(tiers: Vec<Regions>) -> Self {
        let boxes = tiers.iter().enumerate()
            .flat_map(|(t, regions)| regions.iter().enumerate()
                .filter_map(move |(i, region)| region.geometry.bounding_rect()
                    .map(|bbox| BoundingBox::new(t, i, bbox))))
            .collect();
        Self { rtree: RTree::bulk_load(boxes), tiers }
    }

    /// Number of indexed regions.
    #[inline] pub fn len(&self) -> usize { self.rtree.size() }

    #[inline] pub fn is_empty(&self) -> bool { self.rtree.size() == 0 }

    fn region(&self, bb: &BoundingBox) -> &Region {
        let (tier, idx) = bb.slot();
        &self.tiers[tier][idx]
    }

    /// Every region containing the point, countries first, then by name.
    pub fn locate(&self, lon: f64, lat: f64) -> Vec<&Region> {
        let pt = Point::new(lon, lat);
        let env = AABB::from_point([lon, lat]);

        let mut hits: Vec<&Region> = self.rtree
            .locate_in_envelope_intersecting(&env)
            .map(|bb| self.region(bb))
            .filter(|region| contains(&region.geometry, &pt))
            .collect();
        hits.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        hits
    }

    /// Bounding rectangle of everything indexed.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.rtree.iter()
            .map(|bb| *bb.bbox())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }
}

fn contains(geometry: &Geometry<f64>, pt: &Point<f64>) -> bool {
    match geometry {
        Geometry::Polygon(p) => p.contains(pt),
        Geometry::MultiPolygon(mp) => mp.contains(pt),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::testing::{country, square, subdivision};
    use crate::region::{Region, RegionKind};

    fn tiers() -> Vec<Regions> {
        let countries: Regions = vec![
            Region { geometry: square(0.0, 0.0, 10.0, 10.0), ..country("Westland", "WST") },
            Region { geometry: square(10.0, 0.0, 20.0, 10.0), ..country("Eastland", "EST") },
        ].into();
        let admin1: Regions = vec![
            Region { geometry: square(0.0, 0.0, 5.0, 5.0), ..subdivision("South", "Westland", "WST") },
        ].into();
        vec![admin1, countries]
    }

    #[test]
    fn locate_orders_by_tier() {
        let index = RegionIndex::new(tiers());
        assert_eq!(index.len(), 3);

        let hits = index.locate(2.0, 2.0);
        let names: Vec<_> = hits.iter().map(|r| (r.kind, r.name.as_str())).collect();
        assert_eq!(names, [(RegionKind::Country, "Westland"), (RegionKind::Subdivision, "South")]);

        assert_eq!(index.locate(15.0, 5.0)[0].name, "Eastland");
        assert!(index.locate(50.0, 50.0).is_empty());
    }

    #[test]
    fn bounds_cover_all_regions() {
        let bounds = RegionIndex::new(tiers()).bounds().unwrap();
        assert_eq!(bounds.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), Coord { x: 20.0, y: 10.0 });
        assert!(RegionIndex::new(vec![]).bounds().is_none());
    }
}
