use std::{
    future::Future,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use ahash::AHashMap;

use crate::{catalog::FetchError, io, region::{Feature, RegionKind}};

/// Where region tiers come from. Implementations only fetch and decode;
/// caching and deduplication live in the catalog.
pub trait RegionSource: Send + Sync + 'static {
    /// The world country layer.
    fn fetch_countries(&self) -> impl Future<Output = Result<Vec<Feature>, FetchError>> + Send;

    /// One admin tier (subdivision or district) of one country.
    fn fetch_tier(&self, kind: RegionKind, iso3: &str)
        -> impl Future<Output = Result<Vec<Feature>, FetchError>> + Send;
}

/// Pack-relative path of a tier file, e.g. "admin1/DEU.json".
pub(crate) fn tier_path(kind: RegionKind, iso3: &str) -> String {
    match kind {
        RegionKind::Country => "countries.json".to_string(),
        RegionKind::Subdivision => format!("admin1/{iso3}.json"),
        RegionKind::District => format!("admin2/{iso3}.json"),
    }
}

/// Tier files on local disk:
/// `countries.json`, `admin1/<ISO3>.json` and `admin2/<ISO3>.json` under one root.
#[derive(Debug, Clone)]
pub struct DiskSource {
    root: PathBuf,
    countries_object: String,   // TopoJSON object holding the country layer
}

impl DiskSource {
    pub fn new(root: impl Into<PathBuf>, countries_object: impl Into<String>) -> Self {
        Self { root: root.into(), countries_object: countries_object.into() }
    }

    async fn read(&self, rel: &str, object: &str) -> Result<Vec<Feature>, FetchError> {
        let path = self.root.join(rel);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(path.display().to_string()))
            }
            Err(e) => return Err(FetchError::Transport(format!("{}: {e}", path.display()))),
        };
        io::read_features(&bytes, object)
            .map_err(|e| FetchError::Parse(format!("{}: {e:#}", path.display())))
    }
}

impl RegionSource for DiskSource {
    async fn fetch_countries(&self) -> Result<Vec<Feature>, FetchError> {
        self.read(&tier_path(RegionKind::Country, ""), &self.countries_object).await
    }

    async fn fetch_tier(&self, kind: RegionKind, iso3: &str) -> Result<Vec<Feature>, FetchError> {
        self.read(&tier_path(kind, iso3), "").await
    }
}

/// In-memory tiers. Counts every fetch so callers can observe caching.
#[derive(Debug, Default)]
pub struct MemSource {
    countries: Option<Vec<Feature>>,
    tiers: AHashMap<(RegionKind, String), Result<Vec<Feature>, FetchError>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl MemSource {
    pub fn new() -> Self { Self::default() }

    pub fn with_countries(mut self, features: Vec<Feature>) -> Self {
        self.countries = Some(features);
        self
    }

    pub fn with_tier(mut self, kind: RegionKind, iso3: &str, features: Vec<Feature>) -> Self {
        self.tiers.insert((kind, iso3.to_string()), Ok(features));
        self
    }

    /// Make a tier fetch fail with `error`.
    pub fn with_error(mut self, kind: RegionKind, iso3: &str, error: FetchError) -> Self {
        self.tiers.insert((kind, iso3.to_string()), Err(error));
        self
    }

    /// Sleep before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches served so far, successful or not.
    pub fn fetch_count(&self) -> usize { self.fetches.load(Ordering::SeqCst) }

    async fn begin(&self) {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl RegionSource for MemSource {
    async fn fetch_countries(&self) -> Result<Vec<Feature>, FetchError> {
        self.begin().await;
        self.countries.clone().ok_or_else(|| FetchError::NotFound("countries".into()))
    }

    async fn fetch_tier(&self, kind: RegionKind, iso3: &str) -> Result<Vec<Feature>, FetchError> {
        self.begin().await;
        self.tiers.get(&(kind, iso3.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(tier_path(kind, iso3))))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const GERMANY_ADMIN1: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "NAME_0": "Germany", "NAME_1": "Bayern" },
          "geometry": { "type": "Polygon", "coordinates": [[[10, 48], [12, 48], [12, 50], [10, 48]]] } }
    ] }"#;

    #[test]
    fn tier_paths() {
        assert_eq!(tier_path(RegionKind::Country, ""), "countries.json");
        assert_eq!(tier_path(RegionKind::Subdivision, "DEU"), "admin1/DEU.json");
        assert_eq!(tier_path(RegionKind::District, "DEU"), "admin2/DEU.json");
    }

    #[tokio::test]
    async fn disk_source_reads_tiers_and_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("admin1")).unwrap();
        fs::write(dir.path().join("admin1/DEU.json"), GERMANY_ADMIN1).unwrap();
        fs::write(dir.path().join("countries.json"), "{ not json").unwrap();

        let source = DiskSource::new(dir.path(), "countries");
        let features = source.fetch_tier(RegionKind::Subdivision, "DEU").await.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].property_str("NAME_1"), Some("Bayern"));

        let missing = source.fetch_tier(RegionKind::District, "DEU").await.unwrap_err();
        assert!(matches!(missing, FetchError::NotFound(_)));

        let broken = source.fetch_countries().await.unwrap_err();
        assert!(matches!(broken, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn disk_source_reads_the_configured_countries_object() {
        let topology = r#"{ "type": "Topology",
            "arcs": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]],
            "objects": {
                "land": { "type": "GeometryCollection", "geometries": [
                    { "type": "Polygon", "arcs": [[0]] }
                ] },
                "admin0": { "type": "GeometryCollection", "geometries": [
                    { "type": "Polygon", "arcs": [[0]], "properties": { "name": "West" } },
                    { "type": "Polygon", "arcs": [[0]], "properties": { "name": "East" } }
                ] }
            } }"#;
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("countries.json"), topology).unwrap();

        let features = DiskSource::new(dir.path(), "admin0").fetch_countries().await.unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].property_str("name"), Some("East"));

        let missing = DiskSource::new(dir.path(), "countries").fetch_countries().await.unwrap_err();
        assert!(matches!(missing, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn mem_source_counts_fetches() {
        let source = MemSource::new()
            .with_tier(RegionKind::Subdivision, "DEU", vec![Feature::default()])
            .with_error(RegionKind::District, "DEU", FetchError::Transport("reset".into()));

        assert_eq!(source.fetch_tier(RegionKind::Subdivision, "DEU").await.unwrap().len(), 1);
        assert!(matches!(
            source.fetch_tier(RegionKind::District, "DEU").await,
            Err(FetchError::Transport(_))
        ));
        assert!(matches!(
            source.fetch_tier(RegionKind::District, "FRA").await,
            Err(FetchError::NotFound(_))
        ));
        assert!(source.fetch_countries().await.is_err());
        assert_eq!(source.fetch_count(), 4);
    }
}
