mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use mapregion::{Config, DiskSource, RegionCatalog, RegionSource};

use cli::{Cli, Commands};
use commands::{children, locate, resolve, search, stats};

async fn dispatch<S: RegionSource>(cli: &Cli, config: Config, source: S) -> Result<()> {
    let catalog = RegionCatalog::with_config(source, config.catalog.clone());
    match &cli.command {
        Commands::Search(args) => search::run(&catalog, &config, args).await,
        Commands::Children(args) => children::run(&catalog, &config, args).await,
        Commands::Locate(args) => locate::run(&catalog, args).await,
        Commands::Resolve(args) => resolve::run(&catalog, args).await,
        Commands::Stats(args) => stats::run(&catalog, args).await,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.data_dir {
        tracing::info!(dir = %dir.display(), "reading tiers from disk");
        let source = DiskSource::new(dir, config.sources.countries_object.clone());
        return dispatch(&cli, config, source).await;
    }

    #[cfg(feature = "download")]
    {
        let source = mapregion::HttpSource::new(config.sources.clone())?;
        return dispatch(&cli, config, source).await;
    }

    #[cfg(not(feature = "download"))]
    anyhow::bail!("built without download support; pass --data-dir");
}

fn main() -> Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(run(cli))
}
