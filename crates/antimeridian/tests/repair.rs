// Integration tests for repair_geometry:
//   identity on seam-free input, splitting of crossing rings, type promotion,
//   multipolygon flattening and hole reporting.

use antimeridian::repair_geometry;
use geo::{coord, Coord, Geometry, LineString, MultiPolygon, Point, Polygon};

fn ring(points: &[(f64, f64)]) -> LineString<f64> {
    LineString(points.iter().map(|&(x, y)| Coord { x, y }).collect())
}

/// A 2° × 20° box centred on the seam, stored with jumps between 179 and -179.
fn seam_box() -> Polygon<f64> {
    Polygon::new(
        ring(&[(179.0, 10.0), (-179.0, 10.0), (-179.0, -10.0), (179.0, -10.0), (179.0, 10.0)]),
        vec![],
    )
}

fn parts(geometry: &Geometry<f64>) -> Vec<Polygon<f64>> {
    match geometry {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(mp) => mp.0.clone(),
        other => panic!("unexpected geometry {other:?}"),
    }
}

#[test]
fn seam_free_polygon_is_identity() {
    let poly = Polygon::new(
        ring(&[(5.0, 45.0), (15.0, 45.0), (15.0, 55.0), (5.0, 55.0), (5.0, 45.0)]),
        vec![ring(&[(8.0, 48.0), (9.0, 48.0), (9.0, 49.0), (8.0, 48.0)])],
    );
    let (repaired, report) = repair_geometry(Geometry::Polygon(poly.clone()));
    assert_eq!(repaired, Geometry::Polygon(poly));
    assert!(report.is_noop());
}

#[test]
fn seam_free_multipolygon_is_identity() {
    let mp = MultiPolygon(vec![
        Polygon::new(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]), vec![]),
        Polygon::new(ring(&[(-170.0, 0.0), (-160.0, 0.0), (-160.0, 5.0), (-170.0, 0.0)]), vec![]),
    ]);
    let (repaired, report) = repair_geometry(Geometry::MultiPolygon(mp.clone()));
    assert_eq!(repaired, Geometry::MultiPolygon(mp));
    assert!(report.is_noop());
}

#[test]
fn crossing_box_splits_into_two_closed_rings() {
    let (repaired, report) = repair_geometry(Geometry::Polygon(seam_box()));

    let Geometry::MultiPolygon(mp) = &repaired else { panic!("expected promotion to MultiPolygon") };
    assert_eq!(mp.0.len(), 2);
    assert_eq!(report.split_polygons, 1);

    for poly in &mp.0 {
        let coords = &poly.exterior().0;
        assert!(coords.len() >= 4);
        assert_eq!(coords.first(), coords.last());
        let east = coords.iter().all(|c| (0.0..=180.0).contains(&c.x));
        let west = coords.iter().all(|c| (-180.0..=0.0).contains(&c.x));
        assert!(east ^ west, "ring straddles the seam: {coords:?}");
    }
}

#[test]
fn crossing_points_are_interpolated_on_the_seam() {
    let (repaired, _) = repair_geometry(Geometry::Polygon(seam_box()));
    let polys = parts(&repaired);
    let east = &polys[0].exterior().0;
    assert!(east.contains(&coord! { x: 180.0, y: 10.0 }));
    assert!(east.contains(&coord! { x: 180.0, y: -10.0 }));
    let west = &polys[1].exterior().0;
    assert!(west.contains(&coord! { x: -180.0, y: 10.0 }));
    assert!(west.contains(&coord! { x: -180.0, y: -10.0 }));
}

#[test]
fn holes_of_crossing_polygon_are_dropped_and_reported() {
    let mut poly = seam_box();
    poly.interiors_push(ring(&[(179.2, 1.0), (179.8, 1.0), (179.8, 2.0), (179.2, 2.0), (179.2, 1.0)]));

    let (repaired, report) = repair_geometry(Geometry::Polygon(poly));
    assert!(parts(&repaired).iter().all(|p| p.interiors().is_empty()));
    assert_eq!(report.dropped_holes, 1);
    assert!((report.dropped_hole_area - 0.6).abs() < 1e-9);
}

#[test]
fn multipolygon_flattens_split_members() {
    let untouched = Polygon::new(ring(&[(10.0, 10.0), (11.0, 10.0), (11.0, 11.0), (10.0, 10.0)]), vec![]);
    let mp = MultiPolygon(vec![untouched.clone(), seam_box()]);

    let (repaired, report) = repair_geometry(Geometry::MultiPolygon(mp));
    let polys = parts(&repaired);
    assert_eq!(polys.len(), 3);
    assert_eq!(polys[0], untouched);
    assert_eq!(report.split_polygons, 1);
}

#[test]
fn single_sided_result_stays_polygon() {
    // Crosses once around the pole, so only the eastern side survives.
    let poly = Polygon::new(ring(&[(0.0, 80.0), (120.0, 80.0), (-120.0, 80.0), (0.0, 80.0)]), vec![]);
    let (repaired, report) = repair_geometry(Geometry::Polygon(poly));
    assert!(matches!(repaired, Geometry::Polygon(_)));
    assert_eq!(report.degenerate_rings, 1);
}

#[test]
fn non_polygonal_geometry_passes_through() {
    let point = Geometry::Point(Point::new(179.5, 0.0));
    let (repaired, report) = repair_geometry(point.clone());
    assert_eq!(repaired, point);
    assert!(report.is_noop());
}
