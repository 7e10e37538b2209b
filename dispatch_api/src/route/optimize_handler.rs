use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dispatch_optimizer::json::types::{JsonOptimizedRoute, JsonRouteRequest};
use tracing::info;

use crate::{error::ApiError, state::AppState};

pub struct OptimizeResponse(JsonOptimizedRoute);

impl IntoResponse for OptimizeResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<JsonRouteRequest>, JsonRejection>,
) -> Result<OptimizeResponse, ApiError> {
    let Json(body) = body?;

    let route = state.optimizer.optimize(body.into()).await?;

    info!(
        "Optimized {} stops, {:.0}m, metrics {:?}",
        route.stops.len(),
        route.total_distance.value(),
        route.metrics_source
    );

    Ok(OptimizeResponse(JsonOptimizedRoute::from(&route)))
}
