use anyhow::{bail, Result};
use mapregion::{Config, RegionCatalog, RegionSource, SearchSession};

use crate::{cli::ChildrenArgs, commands::settled_search};

pub async fn run<S: RegionSource>(catalog: &RegionCatalog<S>, config: &Config, args: &ChildrenArgs) -> Result<()> {
    let query = args.query.join(" ");
    let (index, _) = settled_search(catalog, &query, config.search.limit, 2).await?;

    let mut session = SearchSession::new();
    session.set_query(&index, &query);
    if session.perfect_match().is_none() {
        bail!("no region is named exactly {query:?}; try `mapregion search` first");
    }
    if !session.toggle_expand(&index) {
        bail!("{query:?} is a district and has no children");
    }

    let rows = session.rows();
    if rows.iter().all(|row| !row.child) {
        eprintln!("[children] no loaded children for {query:?}");
    }
    for row in rows.iter().filter(|row| row.child) {
        println!("{}  {}", row.item.region().kind.badge(), row.item.display());
    }
    Ok(())
}
