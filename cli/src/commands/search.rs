use anyhow::Result;
use mapregion::{Config, RegionCatalog, RegionSource};
use serde_json::json;

use crate::{cli::SearchArgs, commands::settled_search};

pub async fn run<S: RegionSource>(catalog: &RegionCatalog<S>, config: &Config, args: &SearchArgs) -> Result<()> {
    let query = args.query.join(" ");
    let limit = args.limit.unwrap_or(config.search.limit);
    let (_, results) = settled_search(catalog, &query, limit, args.rounds).await?;

    if args.json {
        let rows: Vec<_> = results.iter().map(|item| {
            let region = item.region();
            json!({
                "kind": region.kind,
                "display": item.display(),
                "iso3": region.iso3,
                "nativeName": region.native_name,
                "designation": region.designation,
            })
        }).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if results.is_empty() {
        eprintln!("[search] no regions match {query:?}");
    }
    for item in &results {
        println!("{}  {}", item.region().kind.badge(), item.display());
    }
    Ok(())
}
