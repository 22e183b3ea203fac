use ahash::AHashMap;
use anyhow::Result;
use futures::future::join_all;
use geo::{Geometry, Point};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    catalog::{RegionCatalog, RegionSource},
    codes,
    geom::label_anchor,
    io,
    overlay::OverlayRecord,
    region::{Region, RegionKind, Regions},
};

/// An overlay with its geometry back in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub record: OverlayRecord,
    pub geometry: Geometry<f64>,
    /// Where the overlay's label goes
    pub anchor: Option<Point<f64>>,
}

impl Overlay {
    fn new(record: OverlayRecord, geometry: Geometry<f64>) -> Self {
        Self { anchor: label_anchor(&geometry), record, geometry }
    }

    /// GeoJSON Feature carrying the record's keys and style as properties.
    pub fn to_feature_value(&self) -> Result<Value> {
        let mut record = self.record.clone();
        record.feature = None;
        let mut properties = serde_json::to_value(&record)?;
        if let Some(anchor) = self.anchor {
            properties["labelAnchor"] = json!([anchor.x(), anchor.y()]);
        }
        Ok(json!({
            "type": "Feature",
            "geometry": io::geometry_to_value(&self.geometry)?,
            "properties": properties,
        }))
    }
}

/// Surviving overlays, in input order, and how many records were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub overlays: Vec<Overlay>,
    pub dropped: usize,
}

/// Fill in a record's region keys from its legacy composite name and its
/// ISO3 from the country name. `None` if the record cannot be looked up.
/// Records with inline geometry come back unchanged.
pub fn normalize(mut record: OverlayRecord) -> Option<OverlayRecord> {
    if record.feature.is_some() {
        return Some(record);
    }

    if let Some(name) = record.name.as_deref() {
        let (region, admin1, country) = match record.kind {
            RegionKind::Country => (Some(name), None, Some(name)),
            RegionKind::Subdivision => match name.rsplit_once(", ") {
                Some((region, country)) => (Some(region), None, Some(country)),
                None => (None, None, None),
            },
            RegionKind::District => match name.rsplit_once(", ")
                .and_then(|(rest, country)| rest.rsplit_once(", ").map(|(r, a)| (r, a, country)))
            {
                Some((region, admin1, country)) => (Some(region), Some(admin1), Some(country)),
                None => (None, None, None),
            },
        };
        let fill = |slot: &mut Option<String>, value: Option<&str>| {
            if slot.is_none() {
                *slot = value.map(|v| v.trim().to_string());
            }
        };
        fill(&mut record.region_name, region);
        fill(&mut record.admin1_name, admin1);
        fill(&mut record.country_name, country);
    }

    if record.kind == RegionKind::Country && record.country_name.is_none() {
        record.country_name = record.region_name.clone();
    }
    if record.iso3.is_none() {
        record.iso3 = record.country_name.as_deref()
            .and_then(codes::resolve_iso3)
            .map(str::to_string);
    }

    let complete = record.region_name.is_some()
        && match record.kind {
            RegionKind::Country => true,
            RegionKind::Subdivision => record.iso3.is_some(),
            RegionKind::District => record.iso3.is_some() && record.admin1_name.is_some(),
        };
    complete.then_some(record)
}

/// Which tier a normalized record is found in.
fn tier_key(record: &OverlayRecord) -> Option<(RegionKind, String)> {
    match record.kind {
        RegionKind::Country => Some((RegionKind::Country, String::new())),
        kind => record.iso3.clone().map(|iso3| (kind, iso3)),
    }
}

fn matches(record: &OverlayRecord, region: &Region) -> bool {
    let Some(name) = record.region_name.as_deref() else { return false };
    match record.kind {
        RegionKind::Country => region.name == codes::normalize(name),
        RegionKind::Subdivision => region.name == name,
        RegionKind::District => region.name == name && region.admin1_name == record.admin1_name,
    }
}

/// Turns persisted overlay records back into geometry by driving the catalog.
pub struct OverlayResolver<S> {
    catalog: RegionCatalog<S>,
}

impl<S: RegionSource> OverlayResolver<S> {
    pub fn new(catalog: RegionCatalog<S>) -> Self { Self { catalog } }

    pub async fn resolve(&self, records: Vec<OverlayRecord>) -> Resolution {
        let total = records.len();
        let records: Vec<OverlayRecord> = records.into_iter().filter_map(normalize).collect();

        // every tier any record needs, loaded concurrently; a district also needs
        // its country's subdivisions
        let mut needed: Vec<(RegionKind, String)> = Vec::new();
        for (kind, iso3) in records.iter().filter(|r| r.feature.is_none()).filter_map(tier_key) {
            let parent = (kind == RegionKind::District).then(|| (RegionKind::Subdivision, iso3.clone()));
            for key in parent.into_iter().chain([(kind, iso3)]) {
                if !needed.contains(&key) {
                    needed.push(key);
                }
            }
        }
        let loaded = join_all(needed.iter().map(|(kind, iso3)| self.catalog.load(*kind, iso3))).await;
        let tiers: AHashMap<(RegionKind, String), Regions> = needed.into_iter().zip(loaded).collect();

        let mut overlays = Vec::with_capacity(records.len());
        for record in records {
            if let Some(feature) = &record.feature {
                match io::feature_from_value(feature).ok().and_then(|f| f.geometry) {
                    Some(geometry) => overlays.push(Overlay::new(record, geometry)),
                    None => debug!(id = %record.id, "overlay has an unreadable inline feature"),
                }
                continue;
            }

            let found = tier_key(&record)
                .and_then(|key| tiers.get(&key))
                .and_then(|tier| tier.iter().find(|region| matches(&record, region)));
            match found {
                Some(region) => {
                    let geometry = region.geometry.clone();
                    overlays.push(Overlay::new(record, geometry));
                }
                None => debug!(id = %record.id, region = ?record.region_name, "overlay region not found"),
            }
        }

        let dropped = total - overlays.len();
        if dropped > 0 {
            debug!(dropped, "dropped overlays that could not be resolved");
        }
        Resolution { overlays, dropped }
    }
}
