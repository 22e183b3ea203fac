use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use crate::region::Feature;

/// Quantization transform of a topology: `scale` then `translate`.
#[derive(Debug, Clone, Copy)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

/// Read the named object of a TopoJSON topology as features.
pub fn read_topology(bytes: &[u8], object: &str) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse TopoJSON bytes")?;
    features_from_topology(&value, object)
}

/// Decode the named object of an already parsed topology. A topology with a
/// single object yields that object whatever its name.
/// A GeometryCollection yields one feature per member geometry.
pub fn features_from_topology(topology: &Value, object: &str) -> Result<Vec<Feature>> {
    if topology["type"].as_str() != Some("Topology") {
        bail!("Invalid TopoJSON: type is not Topology");
    }
    let transform = parse_transform(&topology["transform"])?;
    let arcs = decode_arcs(&topology["arcs"], transform)?;

    let objects = topology["objects"].as_object()
        .ok_or_else(|| anyhow!("Invalid TopoJSON: missing objects"))?;
    let object = objects.get(object)
        .or_else(|| if objects.len() == 1 { objects.values().next() } else { None })
        .ok_or_else(|| anyhow!("TopoJSON has no object named {object:?}"))?;

    match object["type"].as_str() {
        Some("GeometryCollection") => object["geometries"].as_array()
            .ok_or_else(|| anyhow!("Invalid GeometryCollection: missing geometries"))?
            .iter().enumerate()
            .map(|(idx, g)| to_feature(g, &arcs).with_context(|| format!("geometry #{idx}")))
            .collect(),
        _ => Ok(vec![to_feature(object, &arcs)?]),
    }
}

fn parse_transform(value: &Value) -> Result<Option<Transform>> {
    if value.is_null() {
        return Ok(None);
    }
    let pair = |key: &str| -> Result<[f64; 2]> {
        let a = value[key].as_array()
            .filter(|a| a.len() == 2)
            .ok_or_else(|| anyhow!("Invalid transform: {key} must be [x, y]"))?;
        match (a[0].as_f64(), a[1].as_f64()) {
            (Some(x), Some(y)) => Ok([x, y]),
            _ => bail!("Invalid transform: {key} must be numeric"),
        }
    };
    Ok(Some(Transform { scale: pair("scale")?, translate: pair("translate")? }))
}

/// Decode arcs into absolute lon/lat coordinates. Quantized topologies store
/// each position as a delta from the previous one.
fn decode_arcs(value: &Value, transform: Option<Transform>) -> Result<Vec<Vec<Coord<f64>>>> {
    let arcs = value.as_array().ok_or_else(|| anyhow!("Invalid TopoJSON: missing arcs"))?;

    arcs.iter().map(|arc| -> Result<Vec<Coord<f64>>> {
        let positions = arc.as_array().ok_or_else(|| anyhow!("Invalid arc: not an array"))?;
        let (mut x, mut y) = (0.0, 0.0);
        positions.iter().map(|pos| -> Result<Coord<f64>> {
            let (px, py) = match pos.as_array().map(|p| p.as_slice()) {
                Some([px, py, ..]) => (
                    px.as_f64().ok_or_else(|| anyhow!("Invalid arc position"))?,
                    py.as_f64().ok_or_else(|| anyhow!("Invalid arc position"))?,
                ),
                _ => bail!("Invalid arc position: expected [x, y]"),
            };
            Ok(match transform {
                Some(t) => {
                    x += px;
                    y += py;
                    Coord { x: x * t.scale[0] + t.translate[0], y: y * t.scale[1] + t.translate[1] }
                }
                None => Coord { x: px, y: py },
            })
        }).collect()
    }).collect()
}

fn to_feature(geometry: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<Feature> {
    let properties = match &geometry["properties"] {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    let shape = match geometry["type"].as_str() {
        Some("Polygon") => Some(Geometry::Polygon(polygon(&geometry["arcs"], arcs)?)),
        Some("MultiPolygon") => {
            let polygons = geometry["arcs"].as_array()
                .ok_or_else(|| anyhow!("Invalid MultiPolygon: missing arcs"))?
                .iter()
                .map(|p| polygon(p, arcs))
                .collect::<Result<Vec<_>>>()?;
            Some(Geometry::MultiPolygon(MultiPolygon(polygons)))
        }
        _ => None,
    };
    Ok(Feature {
        id: geometry.get("id").filter(|v| !v.is_null()).cloned(),
        geometry: shape,
        properties,
    })
}

fn polygon(rings: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>> {
    let rings = rings.as_array().ok_or_else(|| anyhow!("Invalid Polygon: missing arcs"))?;
    let mut rings = rings.iter().map(|r| ring(r, arcs));
    let exterior = rings.next()
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))??;
    Ok(Polygon::new(exterior, rings.collect::<Result<Vec<_>>>()?))
}

/// Stitch a ring from arc references. A negative reference `~i` walks arc `i`
/// backwards; consecutive arcs share their junction point.
fn ring(refs: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let refs = refs.as_array().ok_or_else(|| anyhow!("Invalid ring: not an array"))?;
    let mut points: Vec<Coord<f64>> = Vec::new();

    for r in refs {
        let i = r.as_i64().ok_or_else(|| anyhow!("Invalid arc reference"))?;
        let (idx, reversed) = if i < 0 { ((!i) as usize, true) } else { (i as usize, false) };
        let arc = arcs.get(idx).ok_or_else(|| anyhow!("Arc reference {i} out of bounds"))?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }

    if let Some(&first) = points.first() {
        if points[points.len() - 1] != first {
            points.push(first);
        }
        while points.len() < 4 {
            points.push(first);
        }
    }
    Ok(LineString(points))
}
