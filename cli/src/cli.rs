use std::path::PathBuf;

/// Region search and overlay tools
#[derive(clap::Parser, Debug)]
#[command(name = "mapregion", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Read region tiers from this directory instead of downloading them
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Search countries, subdivisions and districts
    Search(SearchArgs),

    /// List the subdivisions of a country or the districts of a subdivision
    Children(ChildrenArgs),

    /// Find the regions containing a point
    Locate(LocateArgs),

    /// Restore overlay geometry from a saved state and write it as GeoJSON
    Resolve(ResolveArgs),

    /// Load tiers and report what the cache holds
    Stats(StatsArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search text, e.g. "fra" or "Bayern, Germany"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results, defaults to the configured limit
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Rounds of fetching deeper tiers for the countries in the results
    #[arg(long, default_value_t = 2)]
    pub rounds: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ChildrenArgs {
    /// Exact display name of the parent, e.g. "Germany" or "Bayern, Germany"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(clap::Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct LocateArgs {
    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Saved state file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub state: PathBuf,

    /// Output GeoJSON file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// ISO3 codes whose admin tiers to load first
    pub codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mapregion", "search", "new", "york", "-vv", "--data-dir", "data"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("data")));
        let Commands::Search(args) = cli.command else { panic!("expected search") };
        assert_eq!(args.query, ["new", "york"]);
        assert_eq!(args.rounds, 2);
    }

    #[test]
    fn locate_accepts_negative_coordinates() {
        let cli = Cli::parse_from(["mapregion", "locate", "-179.5", "-16.8"]);
        let Commands::Locate(args) = cli.command else { panic!("expected locate") };
        assert_eq!((args.lon, args.lat), (-179.5, -16.8));
    }

    #[test]
    fn resolve_requires_output() {
        assert!(Cli::try_parse_from(["mapregion", "resolve", "state.json"]).is_err());
    }
}
