use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use dispatch_optimizer::{
    json::types::{JsonOptimizedRoute, JsonRouteRequest},
    problem::kmh::Kmh,
    provider::osrm::OsrmRouteProvider,
    solver::{
        optimizer::RouteOptimizer,
        optimizer_params::{DEFAULT_AVERAGE_SPEED_KMH, OptimizerParams},
    },
};
use dispatch_osrm::client::OsrmClientParams;
use tracing::info;

use crate::parsers;

#[derive(Args)]
pub struct OptimizeArgs {
    /// JSON route request to optimize
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Base url of the OSRM server
    #[arg(long, env = "OSRM_URL", default_value = "https://router.project-osrm.org")]
    osrm_url: String,

    #[arg(long, env = "OSRM_PROFILE", default_value = "driving")]
    profile: String,

    /// Skip the routing provider and estimate every leg locally
    #[arg(long)]
    offline: bool,

    /// Bound on the routing provider call (e.g., "30s", "PT1M")
    #[arg(short, long, value_parser = parsers::parse_positive_duration, default_value = "30s")]
    timeout: jiff::SignedDuration,

    /// Average speed in km/h used for estimated legs
    #[arg(long, default_value_t = DEFAULT_AVERAGE_SPEED_KMH)]
    speed: f64,

    /// Time spent at each stop
    #[arg(long, value_parser = parsers::parse_non_negative_duration, default_value = "3m")]
    dwell: jiff::SignedDuration,

    /// Write the optimized route to this file instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub async fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let content: JsonRouteRequest = serde_json::from_reader(BufReader::new(f))?;

    let params = OptimizerParams {
        provider_timeout: args.timeout,
        average_speed: Kmh::new(args.speed),
        dwell_time: args.dwell,
    };

    let route = if args.offline {
        RouteOptimizer::offline(params)?
            .optimize(content.into())
            .await?
    } else {
        let provider = OsrmRouteProvider::new(OsrmClientParams {
            osrm_url: args.osrm_url.trim_end_matches('/').to_string(),
            profile: args.profile,
            timeout: args.timeout.unsigned_abs(),
        })?;

        RouteOptimizer::new(provider, params)?
            .optimize(content.into())
            .await?
    };

    info!(
        "Finished: stops = {}, distance = {:.0}m, duration = {}, metrics = {:?}",
        route.stops.len(),
        route.total_distance.value(),
        route.total_duration,
        route.metrics_source,
    );

    let output = serde_json::to_string_pretty(&JsonOptimizedRoute::from(&route))?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, output)?;
            info!("Route written to {}", path.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}
