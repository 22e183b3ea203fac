use anyhow::{bail, Result};
use mapregion::{geom::RegionIndex, RegionCatalog, RegionKind, RegionSource};

use crate::cli::LocateArgs;

pub async fn run<S: RegionSource>(catalog: &RegionCatalog<S>, args: &LocateArgs) -> Result<()> {
    if !(-180.0..=180.0).contains(&args.lon) || !(-90.0..=90.0).contains(&args.lat) {
        bail!("({}, {}) is not a lon/lat position", args.lon, args.lat);
    }

    let countries = catalog.load_countries().await;
    let index = RegionIndex::new(vec![countries.clone()]);
    let codes: Vec<String> = index.locate(args.lon, args.lat).iter()
        .filter_map(|country| country.iso3.clone())
        .collect();
    if codes.is_empty() {
        eprintln!("[locate] no country contains ({}, {})", args.lon, args.lat);
        return Ok(());
    }

    let mut tiers = vec![countries];
    for iso3 in &codes {
        tiers.push(catalog.load(RegionKind::Subdivision, iso3).await);
        tiers.push(catalog.load(RegionKind::District, iso3).await);
    }

    let index = RegionIndex::new(tiers);
    for region in index.locate(args.lon, args.lat) {
        println!("{}  {}", region.kind.badge(), region.display_name());
    }
    Ok(())
}
