mod geojson;
mod topojson;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::region::Feature;

pub use geojson::{
    feature_from_value, feature_to_value, features_from_value, geometry_from_value,
    geometry_to_value, read_feature_collection, write_feature_collection,
};
pub use topojson::{features_from_topology, read_topology};

/// Read features from either a GeoJSON FeatureCollection or a TopoJSON
/// topology, chosen by the document's `type`. `object` names the topology
/// object to decode and is ignored for GeoJSON.
pub fn read_features(bytes: &[u8], object: &str) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse feature document")?;
    match value["type"].as_str() {
        Some("FeatureCollection") => features_from_value(&value),
        Some("Topology") => features_from_topology(&value, object),
        Some(other) => bail!("Unsupported feature document type {other:?}"),
        None => bail!("Feature document has no type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_document_type() {
        let fc = br#"{ "type": "FeatureCollection", "features": [] }"#;
        assert!(read_features(fc, "countries").unwrap().is_empty());

        let topo = br#"{ "type": "Topology", "arcs": [], "objects": { "countries": { "type": "GeometryCollection", "geometries": [] } } }"#;
        assert!(read_features(topo, "countries").unwrap().is_empty());

        assert!(read_features(br#"{ "type": "Point" }"#, "countries").is_err());
        assert!(read_features(b"not json", "countries").is_err());
    }
}
