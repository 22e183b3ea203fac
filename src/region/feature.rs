use geo::Geometry;
use serde_json::{Map, Value};

/// A decoded feature: optional geometry plus its raw property bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub id: Option<Value>,
    pub geometry: Option<Geometry<f64>>,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry<f64>>, properties: Map<String, Value>) -> Self {
        Self { id: None, geometry, properties }
    }

    /// Non-empty string property. GADM uses "NA" for absent values.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "NA")
    }

    /// True if the geometry is a polygon or multipolygon.
    pub fn is_polygonal(&self) -> bool {
        matches!(self.geometry, Some(Geometry::Polygon(_) | Geometry::MultiPolygon(_)))
    }
}
