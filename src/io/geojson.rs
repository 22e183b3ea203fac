use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use crate::region::Feature;

/// Read features from GeoJSON FeatureCollection bytes.
pub fn read_feature_collection(bytes: &[u8]) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    features_from_value(&value)
}

/// Read features from an already parsed FeatureCollection.
pub fn features_from_value(value: &Value) -> Result<Vec<Feature>> {
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("Invalid FeatureCollection: missing features array"))?;

    features.iter().enumerate()
        .map(|(idx, f)| feature_from_value(f).with_context(|| format!("feature #{idx}")))
        .collect()
}

/// Parse a single GeoJSON Feature.
pub fn feature_from_value(value: &Value) -> Result<Feature> {
    let properties = match &value["properties"] {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    Ok(Feature {
        id: value.get("id").filter(|v| !v.is_null()).cloned(),
        geometry: geometry_from_value(&value["geometry"])?,
        properties,
    })
}

/// Parse a GeoJSON geometry object.
/// Only Polygon and MultiPolygon are kept; null or other types yield `None`.
pub fn geometry_from_value(value: &Value) -> Result<Option<Geometry<f64>>> {
    if value.is_null() {
        return Ok(None);
    }
    let coords = || value["coordinates"].as_array()
        .ok_or_else(|| anyhow!("Invalid geometry: missing coordinates"));

    match value["type"].as_str() {
        Some("Polygon") => Ok(Some(Geometry::Polygon(parse_polygon_coords(coords()?)?))),
        Some("MultiPolygon") => {
            let polygons = coords()?.iter()
                .map(|p| p.as_array()
                    .ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array"))
                    .and_then(|rings| parse_polygon_coords(rings)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(Geometry::MultiPolygon(MultiPolygon(polygons))))
        }
        Some(_) => Ok(None),
        None => bail!("Invalid geometry: missing type"),
    }
}

/// Parse polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: ring is not an array"))
            .and_then(|points| parse_ring_coords(points))
    });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from `[[x, y], [x, y], ...]`, closing it if needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len() + 1);

    for coord_pair in coords {
        let pair = coord_pair.as_array()
            .filter(|a| a.len() >= 2)
            .ok_or_else(|| anyhow!("Invalid coordinate: expected [x, y]"))?;
        let x = pair[0].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = pair[1].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }
    Ok(LineString(points))
}

/// Convert a polygonal geometry to a GeoJSON geometry value.
pub fn geometry_to_value(geometry: &Geometry<f64>) -> Result<Value> {
    fn ring(ls: &LineString<f64>) -> Vec<[f64; 2]> {
        ls.coords().map(|c| [c.x, c.y]).collect()
    }
    fn polygon(p: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
        std::iter::once(p.exterior()).chain(p.interiors()).map(ring).collect()
    }

    match geometry {
        Geometry::Polygon(p) => Ok(json!({ "type": "Polygon", "coordinates": polygon(p) })),
        Geometry::MultiPolygon(mp) => Ok(json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(polygon).collect::<Vec<_>>(),
        })),
        _ => bail!("Only Polygon and MultiPolygon geometries can be written"),
    }
}

/// Convert a feature back to a GeoJSON Feature value.
pub fn feature_to_value(feature: &Feature) -> Result<Value> {
    let geometry = match &feature.geometry {
        Some(g) => geometry_to_value(g)?,
        None => Value::Null,
    };
    let mut value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": feature.properties,
    });
    if let Some(id) = &feature.id {
        value["id"] = id.clone();
    }
    Ok(value)
}

/// Write features as GeoJSON FeatureCollection bytes.
pub fn write_feature_collection(features: &[Feature]) -> Result<Vec<u8>> {
    let features = features.iter().map(feature_to_value).collect::<Result<Vec<_>>>()?;
    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    serde_json::to_vec(&feature_collection).context("Failed to serialize GeoJSON to bytes")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAVARIA: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "id": 7,
              "properties": { "NAME_0": "Germany", "NAME_1": "Bayern" },
              "geometry": { "type": "Polygon", "coordinates": [
                  [[10, 48], [12, 48], [12, 50], [10, 50]],
                  [[11, 49], [11.5, 49], [11.5, 49.5], [11, 49]]
              ] } },
            { "type": "Feature", "properties": { "NAME_1": "Nowhere" }, "geometry": null },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Point", "coordinates": [1, 2] } }
        ]
    }"#;

    #[test]
    fn reads_polygons_and_closes_rings() {
        let features = read_feature_collection(BAVARIA.as_bytes()).unwrap();
        assert_eq!(features.len(), 3);

        let Some(Geometry::Polygon(p)) = &features[0].geometry else { panic!("expected polygon") };
        assert_eq!(p.exterior().0.len(), 5);
        assert_eq!(p.exterior().0.first(), p.exterior().0.last());
        assert_eq!(p.interiors().len(), 1);
        assert_eq!(features[0].id, Some(json!(7)));
        assert_eq!(features[0].property_str("NAME_1"), Some("Bayern"));
    }

    #[test]
    fn null_and_non_polygonal_geometries_are_none() {
        let features = read_feature_collection(BAVARIA.as_bytes()).unwrap();
        assert!(features[1].geometry.is_none());
        assert!(features[2].geometry.is_none());
    }

    #[test]
    fn multipolygon_survives_write_and_read() {
        let text = r#"{ "type": "MultiPolygon", "coordinates": [
            [[[0, 0], [1, 0], [1, 1], [0, 0]]],
            [[[5, 5], [6, 5], [6, 6], [5, 5]]]
        ] }"#;
        let geometry = geometry_from_value(&serde_json::from_str(text).unwrap()).unwrap().unwrap();
        let written = geometry_to_value(&geometry).unwrap();
        assert_eq!(written["type"], "MultiPolygon");
        assert_eq!(geometry_from_value(&written).unwrap(), Some(geometry));
    }

    #[test]
    fn bad_coordinates_are_errors() {
        let text = r#"{ "type": "Polygon", "coordinates": [[[0, "a"], [1, 0]]] }"#;
        assert!(geometry_from_value(&serde_json::from_str(text).unwrap()).is_err());
        assert!(read_feature_collection(b"{\"type\": \"FeatureCollection\"}").is_err());
    }
}
