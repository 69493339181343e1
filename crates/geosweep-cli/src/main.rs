mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use geosweep_core::{AppConfig, Credentials, SearchParams, DEFAULT_RADIUS};
use geosweep_scraper::{ExpansionStats, FuzzyExpander, LocationClient};
use tracing_subscriber::EnvFilter;

use output::OutputTargets;

#[derive(Debug, Parser)]
#[command(name = "geosweep")]
#[command(about = "Find Instagram locations around a latitude/longitude")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sweep a grid around a coordinate and collect nearby locations.
    Nearby(NearbyArgs),
    /// Look up places by name.
    Places {
        query: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
}

#[derive(Debug, Args)]
struct AuthArgs {
    /// Full cookie header sent with every request.
    #[arg(long, conflicts_with = "session")]
    cookie: Option<String>,
    /// Bare `sessionid` cookie value.
    #[arg(long)]
    session: Option<String>,
}

#[derive(Debug, Args)]
struct NearbyArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,
    /// Grid half-width in standard deviations of the center sample.
    #[arg(long, default_value_t = i64::from(DEFAULT_RADIUS), allow_negative_numbers = true)]
    radius: i64,
    /// Link location pages as of this day (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
    #[command(flatten)]
    auth: AuthArgs,
    /// Write the raw result list as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long)]
    geojson: Option<PathBuf>,
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write an HTML map of the results.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Write one external id per line.
    #[arg(long)]
    ids: Option<PathBuf>,
}

impl NearbyArgs {
    fn outputs(&self) -> OutputTargets {
        OutputTargets {
            json: self.json.clone(),
            geojson: self.geojson.clone(),
            csv: self.csv.clone(),
            map: self.map.clone(),
            ids: self.ids.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = geosweep_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Nearby(args) => run_nearby(&config, &args).await,
        Commands::Places { query, auth } => run_places(&config, &query, &auth).await,
    }
}

/// Resolves the cookie header: `--cookie`, then `--session`, then `GEOSWEEP_COOKIE`.
fn resolve_credentials(auth: &AuthArgs, config: &AppConfig) -> Option<Credentials> {
    if let Some(cookie) = auth.cookie.as_deref() {
        return Some(Credentials::new(cookie));
    }
    if let Some(session) = auth.session.as_deref() {
        return Some(Credentials::from_session_id(session));
    }
    config.cookie.as_deref().map(Credentials::new)
}

/// Validates the request, runs the expansion and writes every requested output.
///
/// All validation happens before the first request is sent.
async fn run_nearby(config: &AppConfig, args: &NearbyArgs) -> anyhow::Result<()> {
    let params = SearchParams::new(args.lat, args.lng, args.radius)?;
    let date_suffix = geosweep_core::max_id_suffix(args.date.as_deref())?;
    let credentials = resolve_credentials(&args.auth, config).ok_or_else(|| {
        anyhow::anyhow!("no credentials: pass --cookie or --session, or set GEOSWEEP_COOKIE")
    })?;

    let client = LocationClient::from_config(config).context("failed to build location client")?;
    let expander = FuzzyExpander::new(client, config.max_concurrent_fetches);

    println!("{}", search_banner(&params));
    let result = expander.expand(&params, &credentials).await;
    let stats = result.stats();
    let records = result.into_records();
    println!("{}", found_banner(records.len(), &stats));

    let targets = args.outputs();
    if targets.is_empty() {
        for line in output::summary_lines(&records, &date_suffix) {
            println!("  {line}");
        }
        return Ok(());
    }

    output::write_outputs(&targets, &records, params.center, &date_suffix)
}

/// The grid size is only an upper bound: a narrow center sample can collapse
/// grid points onto each other or onto the center.
fn search_banner(params: &SearchParams) -> String {
    format!(
        "Searching around ({}, {}) with radius {} (up to {} grid queries)...",
        params.center.lat,
        params.center.lng,
        params.radius,
        params.grid_cells()
    )
}

fn found_banner(found: usize, stats: &ExpansionStats) -> String {
    format!(
        "Found {found} locations from {} grid queries ({} from center, {} from grid, {} duplicates dropped)",
        stats.grid_queries, stats.center_records, stats.grid_added, stats.duplicates_dropped
    )
}

async fn run_places(config: &AppConfig, query: &str, auth: &AuthArgs) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("place query must not be empty");
    }
    let credentials = resolve_credentials(auth, config);

    let client = LocationClient::from_config(config).context("failed to build location client")?;
    let places = client
        .search_places(query, credentials.as_ref())
        .await
        .with_context(|| format!("place search for \"{query}\" failed"))?;

    println!("{}", serde_json::to_string_pretty(&places)?);
    Ok(())
}
