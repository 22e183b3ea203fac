pub mod children;
pub mod locate;
pub mod resolve;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use mapregion::{
    search::{prefetch_codes, SearchItem},
    RegionCatalog, RegionSource, SearchIndex,
};
use tracing::debug;

/// Search, then fetch the deeper tiers the results point at and search again,
/// up to `rounds` times or until nothing new arrives.
pub(crate) async fn settled_search<S: RegionSource>(
    catalog: &RegionCatalog<S>,
    query: &str,
    limit: usize,
    rounds: usize,
) -> Result<(SearchIndex, Vec<SearchItem>)> {
    catalog.load_countries().await;
    let mut index = SearchIndex::from_catalog(catalog, limit);
    let mut results = index.search(query);

    for round in 0..rounds {
        let handles = catalog.prefetch(prefetch_codes(&results));
        if handles.is_empty() {
            break;
        }
        debug!(round, loads = handles.len(), "fetching deeper tiers");
        for handle in handles {
            handle.await.context("tier load task failed")?;
        }
        if !index.refresh(catalog) {
            break;
        }
        results = index.search(query);
    }
    Ok((index, results))
}
