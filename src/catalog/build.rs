use tracing::debug;

use crate::{
    codes,
    region::{repair, Feature, Region, RegionKind},
};

/// Property names one admin tier is read from.
struct TierFields {
    name: &'static str,
    parent: Option<&'static str>,
    native: &'static str,
    designation: &'static str,
}

const ADMIN1: TierFields = TierFields { name: "NAME_1", parent: None, native: "NL_NAME_1", designation: "ENGTYPE_1" };
const ADMIN2: TierFields = TierFields { name: "NAME_2", parent: Some("NAME_1"), native: "NL_NAME_2", designation: "ENGTYPE_2" };

/// Polygonal features only, split at the antimeridian.
fn repaired(feature: Feature) -> Option<Feature> {
    feature.is_polygonal().then(|| repair(feature))
}

/// Build the country tier from the world layer.
pub(crate) fn countries(features: Vec<Feature>, excluded: &[String]) -> Vec<Region> {
    let mut regions = Vec::with_capacity(features.len());
    for feature in features {
        let Some(raw) = feature.property_str("name") else { continue };
        if excluded.iter().any(|e| e == raw) {
            continue;
        }
        let name = codes::normalize(raw);
        let Some(feature) = repaired(feature) else { continue };
        let Some(geometry) = feature.geometry else { continue };

        regions.push(Region {
            kind: RegionKind::Country,
            iso3: codes::to_iso3(&name).map(str::to_string),
            country: name.clone(),
            name,
            admin1_name: None,
            native_name: None,
            designation: None,
            geometry,
        });
    }
    regions
}

/// Build one admin tier of one country. Features missing their name fields are skipped.
pub(crate) fn tier(kind: RegionKind, iso3: &str, features: Vec<Feature>) -> Vec<Region> {
    let fields = match kind {
        RegionKind::Subdivision => &ADMIN1,
        RegionKind::District => &ADMIN2,
        RegionKind::Country => return Vec::new(),
    };
    let fallback_country = codes::to_country_name(iso3);

    let mut regions = Vec::with_capacity(features.len());
    let mut skipped = 0usize;
    for feature in features {
        let name = feature.property_str(fields.name).map(str::to_string);
        let parent = match fields.parent {
            Some(key) => feature.property_str(key).map(|s| Some(s.to_string())),
            None => Some(None),
        };
        let country = feature.property_str("NAME_0").or(fallback_country).map(str::to_string);
        let native_name = feature.property_str(fields.native).map(str::to_string);
        let designation = feature.property_str(fields.designation).map(str::to_string);

        let (Some(name), Some(admin1_name), Some(country)) = (name, parent, country) else {
            skipped += 1;
            continue;
        };
        let Some(geometry) = repaired(feature).and_then(|f| f.geometry) else {
            skipped += 1;
            continue;
        };

        regions.push(Region {
            kind,
            name,
            country,
            admin1_name,
            iso3: Some(iso3.to_string()),
            native_name,
            designation,
            geometry,
        });
    }
    if skipped > 0 {
        debug!(%kind, iso3, skipped, "skipped features without usable names or geometry");
    }
    regions
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::region::testing::square;

    fn feature(props: Value) -> Feature {
        let Value::Object(props) = props else { unreachable!() };
        Feature::new(Some(square(0.0, 0.0, 1.0, 1.0)), props)
    }

    #[test]
    fn countries_are_canonicalized_and_filtered() {
        let regions = countries(vec![
            feature(json!({ "name": "Germany" })),
            feature(json!({ "name": "Czech Republic" })),
            feature(json!({ "name": "Antarctica" })),
            feature(json!({ "name": "" })),
            feature(json!({})),
        ], &["Antarctica".to_string()]);

        let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Germany", "Czechia"]);
        assert_eq!(regions[0].iso3.as_deref(), Some("DEU"));
        assert_eq!(regions[1].iso3.as_deref(), Some("CZE"));
        assert_eq!(regions[0].country, "Germany");
    }

    #[test]
    fn admin1_fields() {
        let regions = tier(RegionKind::Subdivision, "DEU", vec![
            feature(json!({ "NAME_0": "Germany", "NAME_1": "Bayern", "NL_NAME_1": "NA", "ENGTYPE_1": "State" })),
            feature(json!({ "NAME_1": "Berlin" })),
            feature(json!({ "NAME_0": "Germany" })),
        ]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "Bayern");
        assert_eq!(regions[0].native_name, None);
        assert_eq!(regions[0].designation.as_deref(), Some("State"));
        assert_eq!(regions[0].admin1_name, None);
        // falls back to the canonical name for the code
        assert_eq!(regions[1].country, "Germany");
        assert_eq!(regions[1].iso3.as_deref(), Some("DEU"));
    }

    #[test]
    fn admin2_requires_a_parent() {
        let regions = tier(RegionKind::District, "BWA", vec![
            feature(json!({ "NAME_0": "Botswana", "NAME_1": "North-East", "NAME_2": "Francistown" })),
            feature(json!({ "NAME_0": "Botswana", "NAME_2": "Orphan" })),
        ]);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::District);
        assert_eq!(regions[0].admin1_name.as_deref(), Some("North-East"));
        assert_eq!(regions[0].display_name(), "Francistown, North-East, Botswana");
    }

    #[test]
    fn features_without_polygons_are_skipped() {
        let Value::Object(props) = json!({ "NAME_0": "Germany", "NAME_1": "Nowhere" }) else { unreachable!() };
        assert!(tier(RegionKind::Subdivision, "DEU", vec![Feature::new(None, props)]).is_empty());
    }
}
