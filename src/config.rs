use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Runtime configuration. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub sources: SourceConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
}

/// Remote locations of the region tiers. Tier URLs are templates with `{iso3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceConfig {
    /// TopoJSON world layer
    pub countries_url: String,
    /// Name of the topology object holding the countries
    pub countries_object: String,
    pub admin1_url: String,
    pub admin2_url: String,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            countries_url: "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-50m.json".into(),
            countries_object: "countries".into(),
            admin1_url: "https://raw.githubusercontent.com/stephanietuerk/admin-boundaries/master/lo-res/Admin1_simp10/gadm36_{iso3}_1.json".into(),
            admin2_url: "https://raw.githubusercontent.com/stephanietuerk/admin-boundaries/master/lo-res/Admin2_simp05/gadm36_{iso3}_2.json".into(),
            user_agent: concat!("mapregion/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl SourceConfig {
    /// Tier URL with the code substituted.
    pub fn tier_url(&self, template: &str, iso3: &str) -> String {
        template.replace("{iso3}", iso3)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Per-fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Country names left out of the country tier
    pub excluded_countries: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { fetch_timeout_secs: 30, excluded_countries: vec!["Antarctica".into()] }
    }
}

impl CatalogConfig {
    pub fn fetch_timeout(&self) -> Duration { Duration::from_secs(self.fetch_timeout_secs) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self { Self { limit: 12 } }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse config")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
