//! nearaid command line interface.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use nearaid_core::categories::default_categories;
use nearaid_core::{
    load_categories, AppConfig, CategoryQueries, Coordinate, PositionSource, SearchCategory,
    SearchStatus,
};
use nearaid_places::{FixedPositionSource, GeoPositionProvider, NoPositionSource, PlacesClient};
use nearaid_search::{filter_by_category, SearchConfig, SearchOrchestrator};

#[derive(Debug, Parser)]
#[command(name = "nearaid")]
#[command(about = "Find nearby shelters, food banks, and medical resources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for resources near an address or a known coordinate.
    Search {
        /// Free-text address to search around.
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        address: Option<String>,
        /// Latitude of a known position (use with --lng).
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of a known position (use with --lat).
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Override the configured search radius in kilometers.
        #[arg(long)]
        radius_km: Option<f64>,
        /// Show only one category: shelter, food, or medical.
        #[arg(long, value_parser = parse_category)]
        category: Option<SearchCategory>,
    },
    /// Print the resolved category query configuration.
    Categories,
}

fn parse_category(s: &str) -> Result<SearchCategory, String> {
    SearchCategory::parse(s)
        .ok_or_else(|| format!("unknown category '{s}'; expected shelter, food, or medical"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = nearaid_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();
    tracing::debug!(?config, "loaded configuration");

    let categories = match &config.categories_path {
        Some(path) => load_categories(path)?,
        None => default_categories(),
    };

    match cli.command {
        Commands::Categories => {
            for cq in &categories {
                println!(
                    "{:<8}  primary: {:<30}  backup: {}",
                    cq.category.to_string(),
                    cq.primary_query,
                    cq.backup_query
                );
            }
            Ok(())
        }
        Commands::Search {
            address,
            lat,
            lng,
            radius_km,
            category,
        } => {
            let coord = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
                _ => None,
            };
            run_search(&config, categories, address, coord, radius_km, category).await
        }
    }
}

async fn run_search(
    config: &AppConfig,
    categories: Vec<CategoryQueries>,
    address: Option<String>,
    coord: Option<Coordinate>,
    radius_km: Option<f64>,
    category: Option<SearchCategory>,
) -> anyhow::Result<()> {
    let places = Arc::new(PlacesClient::new(
        &config.places_base_url,
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?);

    let source: Box<dyn PositionSource> = match coord {
        Some(c) => Box::new(FixedPositionSource::new(c)),
        None => Box::new(NoPositionSource),
    };
    let location =
        GeoPositionProvider::new(source, Arc::clone(&places), config.position_timeout_secs);

    let search_config = SearchConfig {
        radius_km: radius_km.unwrap_or(config.search_radius_km),
        categories,
    };
    let orchestrator = SearchOrchestrator::new(location, places, search_config);

    let session = match &address {
        Some(addr) => orchestrator.start_with_address(addr).await,
        None => orchestrator.start_with_device_location().await,
    };

    match session.status {
        SearchStatus::Done => {
            let results = match category {
                Some(cat) => filter_by_category(&session.results, cat),
                None => session.results.clone(),
            };

            if let Some(addr) = &session.display_address {
                println!("Resources near {addr} (within {:.1} km):", session.radius_km);
            }
            if results.is_empty() {
                println!("No resources found within {:.1} km.", session.radius_km);
                return Ok(());
            }

            for (i, result) in results.iter().enumerate() {
                let open = match result.open_now {
                    Some(true) => "  [open now]",
                    Some(false) => "  [closed]",
                    None => "",
                };
                let rating = result
                    .rating
                    .map(|v| format!("  rating {v:.1}"))
                    .unwrap_or_default();
                println!(
                    "{:>2}. {}  {:.1} km  ({}){open}{rating}",
                    i + 1,
                    result.name,
                    result.distance_km,
                    result.category.label()
                );
                println!("    {}", result.address);
                if let Some(phone) = &result.phone {
                    println!("    {phone}");
                }
            }
            Ok(())
        }
        SearchStatus::Error(failure) => Err(failure.into()),
        other => anyhow::bail!("search ended in unexpected state: {other:?}"),
    }
}
