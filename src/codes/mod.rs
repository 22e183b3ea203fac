//! Country name ↔ ISO3 resolution.
//!
//! Canonical names are the ones used by the world-atlas country layer. Lookups
//! are exact on that canonical form; run input through [`normalize`] first.
mod table;

use std::sync::OnceLock;

use ahash::AHashMap;

use table::{ALIASES, COUNTRIES};

struct Tables {
    to_iso3: AHashMap<&'static str, &'static str>,
    to_name: AHashMap<&'static str, &'static str>,
    aliases: AHashMap<&'static str, &'static str>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut to_name = AHashMap::with_capacity(COUNTRIES.len());
        for &(name, code) in COUNTRIES {
            // first listed name is the primary one
            to_name.entry(code).or_insert(name);
        }
        Tables {
            to_iso3: COUNTRIES.iter().copied().collect(),
            to_name,
            aliases: ALIASES.iter().copied().collect(),
        }
    })
}

/// ISO3 code for a canonical country name.
pub fn to_iso3(country_name: &str) -> Option<&'static str> {
    tables().to_iso3.get(country_name).copied()
}

/// Primary canonical country name for an ISO3 code.
pub fn to_country_name(iso3: &str) -> Option<&'static str> {
    tables().to_name.get(iso3).copied()
}

/// Canonical spelling of a country name. Unknown names come back trimmed.
pub fn normalize(raw_name: &str) -> String {
    let name = raw_name.trim();
    tables().aliases.get(name).copied().unwrap_or(name).to_string()
}

/// Normalize, then look up the code.
pub fn resolve_iso3(raw_name: &str) -> Option<&'static str> {
    to_iso3(&normalize(raw_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_reverse() {
        assert_eq!(to_iso3("Germany"), Some("DEU"));
        assert_eq!(to_country_name("DEU"), Some("Germany"));
        assert_eq!(to_iso3("United States of America"), Some("USA"));
    }

    #[test]
    fn shared_codes_reverse_to_primary_name() {
        assert_eq!(to_iso3("Somaliland"), Some("SOM"));
        assert_eq!(to_country_name("SOM"), Some("Somalia"));
        assert_eq!(to_iso3("N. Cyprus"), Some("CYP"));
        assert_eq!(to_country_name("CYP"), Some("Cyprus"));
    }

    #[test]
    fn aliases_normalize_to_canonical() {
        assert_eq!(normalize("United States"), "United States of America");
        assert_eq!(normalize("  Czech Republic "), "Czechia");
        assert_eq!(normalize("France"), "France");
        assert_eq!(resolve_iso3("Ivory Coast"), Some("CIV"));
    }

    #[test]
    fn unknown_names_yield_none() {
        assert_eq!(to_iso3("Atlantis"), None);
        assert_eq!(to_country_name("ZZZ"), None);
        assert_eq!(normalize("Atlantis"), "Atlantis");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(to_iso3("germany"), None);
    }

    #[test]
    fn every_alias_targets_a_known_country() {
        for &(alias, target) in ALIASES {
            assert!(to_iso3(target).is_some(), "alias {alias} -> unknown {target}");
        }
    }
}
