mod config;
mod error;
mod health;
mod route;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
    serve,
};
use dispatch_optimizer::{provider::osrm::OsrmRouteProvider, solver::optimizer::RouteOptimizer};
use mimalloc::MiMalloc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::{
    config::Config, health::health_handler, route::optimize_handler::optimize_handler,
    state::AppState,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Config::env()?;
    info!(
        "Routing through {} ({}), timeout {}",
        config.osrm_url, config.osrm_profile, config.provider_timeout
    );

    let provider = OsrmRouteProvider::new(config.osrm_params())?;
    let state = Arc::new(AppState {
        optimizer: RouteOptimizer::new(provider, config.optimizer_params())?,
    });

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);

    serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/route/optimize", post(optimize_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
