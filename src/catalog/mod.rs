//! Lazily populated, deduplicated region tiers.
//!
//! The catalog owns one slot per `(tier, ISO3)`. A slot is either loading,
//! holding a shared handle to the spawned fetch task, or loaded. Callers that
//! arrive while a fetch is in flight await the same handle, so a code is never
//! fetched twice concurrently. Failed tier fetches settle as empty and stay
//! that way until [`RegionCatalog::clear_cache`].
mod build;
mod error;
#[cfg(feature = "download")]
mod http;
mod source;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    config::CatalogConfig,
    region::{RegionKind, Regions},
};

pub use error::{FetchError, FetchErrorKind, FetchFailure};
#[cfg(feature = "download")]
pub use http::HttpSource;
pub use source::{DiskSource, MemSource, RegionSource};

type Pending = Shared<BoxFuture<'static, Regions>>;

enum Slot {
    Loading(Pending),
    Loaded(Regions),
}

#[derive(Default)]
struct CatalogState {
    tiers: [AHashMap<String, Slot>; 3],    // Indexed by RegionKind; countries use the "" key
    failures: AHashMap<(RegionKind, String), FetchErrorKind>,
    generation: u64,                        // Bumped by clear_cache; stale fetches don't settle
    revision: u64,                          // Bumped whenever the loaded corpus changes
}

fn lock(state: &Mutex<CatalogState>) -> MutexGuard<'_, CatalogState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slot_key(kind: RegionKind, iso3: &str) -> String {
    match kind {
        RegionKind::Country => String::new(),
        _ => iso3.trim().to_ascii_uppercase(),
    }
}

fn empty() -> Regions { Vec::new().into() }

/// Region counts of the settled slots of one tier.
fn settled(tier: &AHashMap<String, Slot>) -> impl Iterator<Item = usize> + '_ {
    tier.values().filter_map(|slot| match slot {
        Slot::Loaded(regions) => Some(regions.len()),
        Slot::Loading(_) => None,
    })
}

/// Counters describing what the catalog currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub countries_loaded: bool,
    pub admin1_countries: usize,
    pub admin1_features: usize,
    pub admin2_countries: usize,
    pub admin2_features: usize,
    pub in_flight: usize,
    pub failures: usize,
}

/// Every settled tier together with the revision they were read at.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub revision: u64,
    pub tiers: Vec<Regions>,
}

/// Handle to the shared region cache. Clones share state.
pub struct RegionCatalog<S> {
    source: Arc<S>,
    state: Arc<Mutex<CatalogState>>,
    config: Arc<CatalogConfig>,
}

impl<S> Clone for RegionCatalog<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RegionSource> RegionCatalog<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CatalogConfig::default())
    }

    pub fn with_config(source: S, config: CatalogConfig) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(CatalogState::default())),
            config: Arc::new(config),
        }
    }

    #[inline] pub fn source(&self) -> &S { &self.source }

    #[inline] pub fn config(&self) -> &CatalogConfig { &self.config }

    /// The world country layer. A failed fetch is not cached; the next call retries.
    pub async fn load_countries(&self) -> Regions {
        self.load(RegionKind::Country, "").await
    }

    /// Subdivisions of one country.
    pub async fn load_admin1(&self, iso3: &str) -> Regions {
        self.load(RegionKind::Subdivision, iso3).await
    }

    /// Districts of one country.
    pub async fn load_admin2(&self, iso3: &str) -> Regions {
        self.load(RegionKind::District, iso3).await
    }

    /// Load any tier, joining a fetch already in flight for the same code.
    /// `iso3` is ignored for countries.
    pub async fn load(&self, kind: RegionKind, iso3: &str) -> Regions {
        let key = slot_key(kind, iso3);
        if kind != RegionKind::Country && key.is_empty() {
            return empty();
        }

        let pending = {
            let mut state = lock(&self.state);
            match state.tiers[kind.index()].get(&key) {
                Some(Slot::Loaded(regions)) => return regions.clone(),
                Some(Slot::Loading(pending)) => pending.clone(),
                None => {
                    let pending = self.spawn_fetch(kind, key.clone(), state.generation);
                    state.tiers[kind.index()].insert(key, Slot::Loading(pending.clone()));
                    pending
                }
            }
        };
        pending.await
    }

    /// Run the fetch as its own task so it settles the cache even if every
    /// caller stops waiting.
    fn spawn_fetch(&self, kind: RegionKind, key: String, generation: u64) -> Pending {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let config = Arc::clone(&self.config);
        let task_key = key.clone();

        let task = tokio::spawn(async move {
            let timeout = config.fetch_timeout();
            let fetched = match kind {
                RegionKind::Country => tokio::time::timeout(timeout, source.fetch_countries()).await,
                _ => tokio::time::timeout(timeout, source.fetch_tier(kind, &task_key)).await,
            };
            let outcome = fetched
                .unwrap_or_else(|_| Err(FetchError::Timeout(timeout)))
                .map(|features| match kind {
                    RegionKind::Country => build::countries(features, &config.excluded_countries),
                    _ => build::tier(kind, &task_key, features),
                });
            settle(&state, kind, &task_key, generation, outcome)
        });

        let state = Arc::clone(&self.state);
        async move {
            match task.await {
                Ok(regions) => regions,
                Err(e) => {
                    let error = FetchError::Transport(format!("fetch task failed: {e}"));
                    settle(&state, kind, &key, generation, Err(error))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Start admin1 and admin2 loads for every code not already cached or in
    /// flight. Blank codes are skipped.
    pub fn prefetch<I, T>(&self, iso3s: I) -> Vec<JoinHandle<()>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut handles = Vec::new();
        for iso3 in iso3s {
            let key = slot_key(RegionKind::Subdivision, iso3.as_ref());
            if key.is_empty() {
                continue;
            }
            for kind in [RegionKind::Subdivision, RegionKind::District] {
                if lock(&self.state).tiers[kind.index()].contains_key(&key) {
                    continue;
                }
                let catalog = self.clone();
                let key = key.clone();
                handles.push(tokio::spawn(async move {
                    catalog.load(kind, &key).await;
                }));
            }
        }
        handles
    }

    /// Forget every tier, in-flight tracker and failure. Fetches still running
    /// resolve for their callers but do not repopulate the cache.
    pub fn clear_cache(&self) {
        let mut state = lock(&self.state);
        for tier in state.tiers.iter_mut() {
            tier.clear();
        }
        state.failures.clear();
        state.generation += 1;
        state.revision += 1;
        info!(generation = state.generation, "region cache cleared");
    }
}

impl<S> RegionCatalog<S> {
    /// A settled tier, without loading anything.
    pub fn peek(&self, kind: RegionKind, iso3: &str) -> Option<Regions> {
        match lock(&self.state).tiers[kind.index()].get(&slot_key(kind, iso3)) {
            Some(Slot::Loaded(regions)) => Some(regions.clone()),
            _ => None,
        }
    }

    /// The country tier, if it has loaded.
    pub fn countries(&self) -> Option<Regions> {
        self.peek(RegionKind::Country, "")
    }

    /// True once a tier has settled, whether or not it found regions.
    pub fn is_loaded(&self, kind: RegionKind, iso3: &str) -> bool {
        self.peek(kind, iso3).is_some()
    }

    /// Changes whenever the set of loaded regions changes.
    pub fn revision(&self) -> u64 {
        lock(&self.state).revision
    }

    /// All settled, non-empty tiers.
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = lock(&self.state);
        let tiers = state.tiers.iter()
            .flat_map(|tier| tier.values())
            .filter_map(|slot| match slot {
                Slot::Loaded(regions) if !regions.is_empty() => Some(regions.clone()),
                _ => None,
            })
            .collect();
        CatalogSnapshot { revision: state.revision, tiers }
    }

    pub fn cache_stats(&self) -> CacheStats {
        let state = lock(&self.state);
        let tiers = &state.tiers;

        CacheStats {
            countries_loaded: settled(&tiers[RegionKind::Country.index()]).next().is_some(),
            admin1_countries: settled(&tiers[RegionKind::Subdivision.index()]).count(),
            admin1_features: settled(&tiers[RegionKind::Subdivision.index()]).sum(),
            admin2_countries: settled(&tiers[RegionKind::District.index()]).count(),
            admin2_features: settled(&tiers[RegionKind::District.index()]).sum(),
            in_flight: state.tiers.iter()
                .flat_map(|tier| tier.values())
                .filter(|slot| matches!(slot, Slot::Loading(_)))
                .count(),
            failures: state.failures.len(),
        }
    }

    /// Every recorded fetch failure, sorted by tier then code.
    pub fn failures(&self) -> Vec<FetchFailure> {
        let mut failures: Vec<FetchFailure> = lock(&self.state).failures.iter()
            .map(|((kind, key), error)| FetchFailure {
                kind: *kind,
                iso3: (!key.is_empty()).then(|| key.clone()),
                error: *error,
            })
            .collect();
        failures.sort_by(|a, b| (a.kind, &a.iso3).cmp(&(b.kind, &b.iso3)));
        failures
    }
}

/// Record the outcome of a fetch and hand back what callers should see.
fn settle(
    state: &Mutex<CatalogState>,
    kind: RegionKind,
    key: &str,
    generation: u64,
    outcome: Result<Vec<crate::region::Region>, FetchError>,
) -> Regions {
    let mut state = lock(state);
    let current = state.generation == generation;

    match outcome {
        Ok(regions) => {
            let regions: Regions = regions.into();
            debug!(%kind, iso3 = key, count = regions.len(), current, "tier loaded");
            if current {
                state.failures.remove(&(kind, key.to_string()));
                state.tiers[kind.index()].insert(key.to_string(), Slot::Loaded(regions.clone()));
                if !regions.is_empty() {
                    state.revision += 1;
                }
            }
            regions
        }
        Err(error) => {
            match error.kind() {
                FetchErrorKind::NotFound => debug!(%kind, iso3 = key, %error, "tier not available"),
                FetchErrorKind::TransportFailure => warn!(%kind, iso3 = key, %error, "tier fetch failed"),
            }
            if current {
                state.failures.insert((kind, key.to_string()), error.kind());
                if kind == RegionKind::Country {
                    state.tiers[kind.index()].remove(key);
                } else {
                    state.tiers[kind.index()].insert(key.to_string(), Slot::Loaded(empty()));
                }
            }
            empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::region::{testing::square, Feature};

    fn feature(props: Value) -> Feature {
        let Value::Object(props) = props else { unreachable!() };
        Feature::new(Some(square(10.0, 48.0, 12.0, 50.0)), props)
    }

    fn germany() -> MemSource {
        MemSource::new()
            .with_countries(vec![
                feature(json!({ "name": "Germany" })),
                feature(json!({ "name": "Antarctica" })),
            ])
            .with_tier(RegionKind::Subdivision, "DEU", vec![
                feature(json!({ "NAME_0": "Germany", "NAME_1": "Bayern" })),
                feature(json!({ "NAME_0": "Germany", "NAME_1": "Berlin" })),
            ])
            .with_tier(RegionKind::District, "DEU", vec![
                feature(json!({ "NAME_0": "Germany", "NAME_1": "Bayern", "NAME_2": "Oberbayern" })),
            ])
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let catalog = RegionCatalog::new(germany().with_delay(Duration::from_millis(50)));

        let (a, b) = tokio::join!(catalog.load_admin1("DEU"), catalog.load_admin1("DEU"));
        assert_eq!(catalog.source().fetch_count(), 1);
        assert_eq!(a.len(), 2);
        assert!(Arc::ptr_eq(&a, &b));

        let c = catalog.load_admin1("deu").await;
        assert!(Arc::ptr_eq(&a, &c));
        assert_eq!(catalog.source().fetch_count(), 1);
    }

    #[tokio::test]
    async fn not_found_is_cached_as_empty() {
        let catalog = RegionCatalog::new(germany());

        assert!(catalog.load_admin2("AAA").await.is_empty());
        assert!(catalog.load_admin2("AAA").await.is_empty());
        assert_eq!(catalog.source().fetch_count(), 1);

        assert_eq!(catalog.failures(), vec![FetchFailure {
            kind: RegionKind::District,
            iso3: Some("AAA".into()),
            error: FetchErrorKind::NotFound,
        }]);
        assert_eq!(catalog.cache_stats().admin2_countries, 1);
    }

    #[tokio::test]
    async fn transport_failures_settle_like_not_found() {
        let source = germany()
            .with_error(RegionKind::Subdivision, "FRA", FetchError::Transport("reset".into()));
        let catalog = RegionCatalog::new(source);

        assert!(catalog.load_admin1("FRA").await.is_empty());
        assert!(catalog.load_admin1("FRA").await.is_empty());
        assert_eq!(catalog.source().fetch_count(), 1);
        assert_eq!(catalog.failures()[0].error, FetchErrorKind::TransportFailure);
    }

    #[tokio::test]
    async fn countries_load_once() {
        let catalog = RegionCatalog::new(germany());

        let a = catalog.load_countries().await;
        let b = catalog.load_countries().await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(catalog.source().fetch_count(), 1);
        // Antarctica is excluded by default
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].iso3.as_deref(), Some("DEU"));
        assert!(catalog.countries().is_some());
    }

    #[tokio::test]
    async fn country_failures_are_retried() {
        let catalog = RegionCatalog::new(MemSource::new());

        assert!(catalog.load_countries().await.is_empty());
        assert!(catalog.load_countries().await.is_empty());
        assert_eq!(catalog.source().fetch_count(), 2);
        assert!(catalog.countries().is_none());
        assert_eq!(catalog.failures().len(), 1);
    }

    #[tokio::test]
    async fn slow_fetches_time_out() {
        let config = CatalogConfig { fetch_timeout_secs: 0, ..CatalogConfig::default() };
        let catalog = RegionCatalog::with_config(germany().with_delay(Duration::from_secs(5)), config);

        assert!(catalog.load_admin1("DEU").await.is_empty());
        assert_eq!(catalog.failures()[0].error, FetchErrorKind::TransportFailure);
        assert!(catalog.is_loaded(RegionKind::Subdivision, "DEU"));
    }

    #[tokio::test]
    async fn clearing_during_a_fetch_does_not_repopulate() {
        let catalog = RegionCatalog::new(germany().with_delay(Duration::from_millis(50)));

        let loader = catalog.clone();
        let handle = tokio::spawn(async move { loader.load_admin1("DEU").await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(catalog.cache_stats().in_flight, 1);

        catalog.clear_cache();
        assert_eq!(handle.await.unwrap().len(), 2);
        assert!(catalog.peek(RegionKind::Subdivision, "DEU").is_none());
        assert_eq!(catalog.cache_stats(), CacheStats::default());

        catalog.load_admin1("DEU").await;
        assert_eq!(catalog.source().fetch_count(), 2);
    }

    #[tokio::test]
    async fn prefetch_loads_both_tiers_once() {
        let catalog = RegionCatalog::new(germany());

        for handle in catalog.prefetch(["DEU", "ZZZ", ""]) {
            handle.await.unwrap();
        }
        assert_eq!(catalog.source().fetch_count(), 4);
        assert!(catalog.prefetch(["DEU"]).is_empty());

        let stats = catalog.cache_stats();
        assert_eq!(stats.admin1_countries, 2);
        assert_eq!(stats.admin1_features, 2);
        assert_eq!(stats.admin2_features, 1);
        assert_eq!(stats.failures, 2);
        assert!(!stats.countries_loaded);
    }

    #[tokio::test]
    async fn revision_tracks_corpus_growth() {
        let catalog = RegionCatalog::new(germany());
        let start = catalog.revision();

        catalog.load_admin2("AAA").await;
        assert_eq!(catalog.revision(), start);

        catalog.load_admin1("DEU").await;
        let snapshot = catalog.snapshot();
        assert!(snapshot.revision > start);
        assert_eq!(snapshot.tiers.len(), 1);
    }

    #[test]
    fn stats_serialize_in_camel_case() {
        let value = serde_json::to_value(CacheStats::default()).unwrap();
        assert_eq!(value["countriesLoaded"], json!(false));
        assert_eq!(value["admin2Features"], json!(0));
        assert_eq!(value["inFlight"], json!(0));
    }
}
