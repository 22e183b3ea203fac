use anyhow::Result;
use futures::future::join_all;
use mapregion::{RegionCatalog, RegionKind, RegionSource};
use serde_json::json;

use crate::cli::StatsArgs;

pub async fn run<S: RegionSource>(catalog: &RegionCatalog<S>, args: &StatsArgs) -> Result<()> {
    catalog.load_countries().await;
    let loads = args.codes.iter()
        .flat_map(|iso3| [RegionKind::Subdivision, RegionKind::District].map(|kind| catalog.load(kind, iso3)));
    join_all(loads).await;

    let report = json!({
        "stats": catalog.cache_stats(),
        "failures": catalog.failures(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
