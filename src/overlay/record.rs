use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::region::RegionKind;

/// Version written into every persisted state.
pub const STATE_VERSION: u32 = 1;

/// How an overlay is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill_color: "#3b82f6".into(),
            fill_opacity: 0.2,
            stroke_color: "#3b82f6".into(),
            stroke_width: 2.0,
            stroke_opacity: 0.8,
            dash_array: None,
        }
    }
}

/// An overlay as persisted. Geometry is normally left out and looked up
/// again from the region keys when the state is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRecord {
    #[serde(default)]
    pub id: Value,
    pub kind: RegionKind,
    /// Composite display name written by older versions, e.g. "Bavaria, Germany"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
    #[serde(flatten)]
    pub style: OverlayStyle,
    /// GeoJSON Feature, when the geometry was stored inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Value>,
}

impl OverlayRecord {
    /// A key-only record for a region, default style.
    pub fn new(id: impl Into<Value>, kind: RegionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            region_name: None,
            country_name: None,
            admin1_name: None,
            iso3: None,
            style: OverlayStyle::default(),
            feature: None,
        }
    }
}

/// Everything a user saves: overlays plus their free-floating labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    #[serde(default)]
    pub overlays: Vec<OverlayRecord>,
    /// Passed through untouched
    #[serde(default)]
    pub labels: Vec<Value>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self { version: STATE_VERSION, overlays: Vec::new(), labels: Vec::new() }
    }
}

impl PersistedState {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to parse persisted state")
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("Failed to serialize persisted state")
    }

    #[inline] pub fn is_current(&self) -> bool { self.version == STATE_VERSION }
}
