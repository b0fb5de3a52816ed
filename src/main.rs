use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jiff::Zoned;
use tracing::info;

use route_eta::config::Config;
use route_eta::estimator::Estimator;
use route_eta::http::ReqwestTransport;
use route_eta::{Query, RoutePlanner, TripPlan};

/// Suggests driving routes between two places with live traffic and a
/// model-based travel time estimate.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start location
    #[arg(default_value = "India Gate")]
    start: String,

    /// Destination
    #[arg(default_value = "Taj Mahal")]
    end: String,

    /// Model artifact path (overrides ROUTE_ETA_MODEL_PATH)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.model {
        config.model_path = path;
    }

    // Loaded once; a missing model is fatal before any query runs.
    let estimator = Estimator::load(&config.model_path, config.step_proxy)
        .with_context(|| format!("loading model from {}", config.model_path.display()))?;
    let transport = ReqwestTransport::new().context("building HTTP client")?;
    let planner = RoutePlanner::new(&transport, &config.provider, Some(&estimator));

    let query = Query::new(cli.start, cli.end);
    info!(start = %query.start_place, end = %query.end_place, "finding routes");
    let plan = planner.plan(&query, &Zoned::now())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &TripPlan) {
    println!("Model estimate: {}", plan.result.estimate.duration);
    println!();

    if plan.result.routes.is_empty() {
        match &plan.routes_unavailable {
            Some(reason) => println!("No routes found ({})", reason),
            None => println!("No routes found"),
        }
        return;
    }

    for route in &plan.result.routes {
        println!("Route {}: {}", route.rank, route.summary);
        println!(
            "  {} | ETA {} | {} km | {} steps",
            route.duration, route.eta, route.distance_km, route.step_count
        );
    }
}
