mod feature;
mod kind;
mod repair;

use std::sync::Arc;

use geo::{Geometry, MultiPolygon};

pub use feature::Feature;
pub use kind::RegionKind;
pub use repair::{repair, repair_with_report};

/// A loaded tier: shared, immutable, cheap to hand out.
pub type Regions = Arc<[Region]>;

/// One administrative region at any tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub name: String,
    pub country: String,                // Country name as the source tier spells it
    pub admin1_name: Option<String>,    // Parent subdivision, districts only
    pub iso3: Option<String>,
    pub native_name: Option<String>,
    pub designation: Option<String>,    // e.g. "State", "County"
    pub geometry: Geometry<f64>,        // Polygon or MultiPolygon
}

/// Identity of a region. Names are only unique within a country and parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionKey {
    pub kind: RegionKind,
    pub name: String,
    pub country: String,
    pub admin1_name: Option<String>,
}

impl Region {
    pub fn key(&self) -> RegionKey {
        RegionKey {
            kind: self.kind,
            name: self.name.clone(),
            country: self.country.clone(),
            admin1_name: self.admin1_name.clone(),
        }
    }

    /// Human-readable path, most specific part first.
    pub fn display_name(&self) -> String {
        match (self.kind, &self.admin1_name) {
            (RegionKind::Country, _) => self.name.clone(),
            (RegionKind::District, Some(admin1)) => format!("{}, {}, {}", self.name, admin1, self.country),
            _ => format!("{}, {}", self.name, self.country),
        }
    }

    /// The geometry as a multipolygon, whatever its stored shape.
    pub fn polygons(&self) -> MultiPolygon<f64> {
        match &self.geometry {
            Geometry::Polygon(p) => MultiPolygon(vec![p.clone()]),
            Geometry::MultiPolygon(mp) => mp.clone(),
            _ => MultiPolygon(vec![]),
        }
    }
}
