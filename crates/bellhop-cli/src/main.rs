use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bellhop_core::{load_app_config, LocationKind, LocationRef, LuxuryRegistry, SearchQuery};
use bellhop_sabre::{AuthManager, LuxuryProbe, SabreClient, SearchOrchestrator};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Parser)]
#[command(name = "bellhop")]
#[command(about = "Luxury hotel search over the Sabre availability API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search availability around coordinates or a location code.
    Search(SearchArgs),
    /// Probe hotels for luxury-program rate codes.
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
    /// Airport or city code, used when no coordinates are given.
    #[arg(long, conflicts_with = "lat")]
    code: Option<String>,
    /// Location kind for --code: airport, city, or hotel.
    #[arg(long, default_value = "city")]
    kind: String,
    #[arg(long)]
    check_in: NaiveDate,
    #[arg(long)]
    check_out: NaiveDate,
    #[arg(long, default_value_t = 1)]
    rooms: u32,
    #[arg(long, default_value_t = 2)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    /// Search radius in miles.
    #[arg(long, default_value_t = 15.0)]
    radius: f64,
    /// Keep only luxury-program hotels, sorted luxury-first.
    #[arg(long)]
    luxury_only: bool,
    /// Emit results as JSON instead of a summary listing.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ProbeArgs {
    /// Hotel targets as CODE or CODE:CHAIN (e.g. 100066:LW).
    #[arg(required = true)]
    hotels: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();
    tracing::info!(
        env = %config.env,
        base_url = %config.base_url,
        search_timeout_secs = config.search_timeout_secs,
        "configuration loaded"
    );

    let client = Arc::new(
        SabreClient::new(&config.base_url, &config.user_agent)
            .context("building the HTTP client")?,
    );
    let auth = Arc::new(AuthManager::new(Arc::clone(&client), config.clone()));

    match cli.command {
        Commands::Search(args) => {
            let orchestrator = SearchOrchestrator::new(
                Arc::clone(&client),
                auth,
                Arc::new(LuxuryRegistry::curated()),
                &config,
            );
            bellhop_cache::spawn_sweeper(orchestrator.cache(), SWEEP_INTERVAL);
            run_search(&orchestrator, &args).await
        }
        Commands::Probe(args) => {
            let probe = LuxuryProbe::new(client, auth, &config);
            run_probe(&probe, &args).await;
            Ok(())
        }
    }
}

async fn run_search(orchestrator: &SearchOrchestrator, args: &SearchArgs) -> anyhow::Result<()> {
    let location = match (args.lat, args.lng, args.code.as_deref()) {
        (Some(lat), Some(lng), _) => LocationRef::from_coordinates(lat, lng),
        (_, _, Some(code)) => LocationRef::from_code(code, parse_kind(&args.kind)?),
        _ => anyhow::bail!("provide either --lat/--lng or --code"),
    };
    let query = SearchQuery::new(
        location,
        args.check_in,
        args.check_out,
        args.rooms,
        args.adults,
        args.children,
        args.radius,
    )
    .context("invalid search query")?;

    let results = if args.luxury_only {
        orchestrator.search_luxury(&query, None).await?
    } else {
        orchestrator.search(&query).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        let rate = result
            .hotel
            .lowest_rate()
            .map_or_else(|| "no rate".to_owned(), |r| format!("from ${r:.2}"));
        let programs = if result.is_luxury {
            let names: Vec<&str> = result
                .luxury_programs
                .iter()
                .map(|p| p.display_name())
                .collect();
            format!(" [{}]", names.join(", "))
        } else {
            String::new()
        };
        println!(
            "{:<10} {} ({}){programs}",
            result.hotel.hotel_code, result.hotel.hotel_name, rate
        );
    }
    println!("{} hotels", results.len());
    Ok(())
}

async fn run_probe(probe: &LuxuryProbe, args: &ProbeArgs) {
    let targets: Vec<(String, Option<String>)> = args
        .hotels
        .iter()
        .map(|spec| match spec.split_once(':') {
            Some((code, chain)) => (code.to_owned(), Some(chain.to_owned())),
            None => (spec.clone(), None),
        })
        .collect();

    let results = probe.probe_batch(&targets).await;
    for (code, _) in &targets {
        let Some(result) = results.get(code) else {
            continue;
        };
        if let Some(error) = &result.error {
            println!("{code:<10} error: {error}");
        } else if result.is_confirmed {
            println!(
                "{code:<10} confirmed via {} {}{}",
                result.rate_code_found.as_deref().unwrap_or("?"),
                result
                    .rate_amount
                    .map_or_else(String::new, |a| format!("(${a:.2} {}) ",
                        result.currency.as_deref().unwrap_or("USD"))),
                if result.benefits_detected.is_empty() {
                    String::new()
                } else {
                    format!("benefits: {}", result.benefits_detected.join(", "))
                }
            );
        } else {
            println!("{code:<10} not confirmed");
        }
    }
}

fn parse_kind(kind: &str) -> anyhow::Result<LocationKind> {
    match kind.to_ascii_lowercase().as_str() {
        "airport" => Ok(LocationKind::Airport),
        "city" => Ok(LocationKind::City),
        "hotel" => Ok(LocationKind::Hotel),
        other => anyhow::bail!("unknown location kind: {other}"),
    }
}
