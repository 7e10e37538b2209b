use jiff::Timestamp;
use tracing::{debug, instrument, warn};

use crate::{
    problem::route_request::{RouteRequest, RouteRequestError},
    provider::{NoProvider, ProviderError, ProviderQuery, QueryKind, RouteProvider, associate},
    solution::{
        optimized_route::{MetricsSource, OptimizedRoute},
        stop_sequence::StopSequence,
    },
    solver::{
        metrics, nearest_neighbor,
        optimizer_params::{OptimizerParams, OptimizerParamsError},
    },
};

/// Stop sequence before aggregation, tagged with the origin of its metrics.
#[derive(Debug)]
enum RouteOutcome {
    Measured {
        sequence: StopSequence,
        geometry: Option<String>,
    },
    Estimated {
        sequence: StopSequence,
    },
}

impl RouteOutcome {
    fn metrics_source(&self) -> MetricsSource {
        match self {
            RouteOutcome::Measured { .. } => MetricsSource::Provider,
            RouteOutcome::Estimated { .. } => MetricsSource::Estimated,
        }
    }
}

/// Entry point of the engine.
///
/// Validates the request, asks the routing provider once, and falls back to
/// the local heuristics when the provider fails. Once a request is valid a
/// route is always returned.
pub struct RouteOptimizer<P> {
    provider: Option<P>,
    params: OptimizerParams,
}

impl RouteOptimizer<NoProvider> {
    /// Optimizer that never leaves the process, metrics are always estimated.
    pub fn offline(params: OptimizerParams) -> Result<Self, OptimizerParamsError> {
        params.validate()?;

        Ok(Self {
            provider: None,
            params,
        })
    }
}

impl<P> RouteOptimizer<P>
where
    P: RouteProvider,
{
    pub fn new(provider: P, params: OptimizerParams) -> Result<Self, OptimizerParamsError> {
        params.validate()?;

        Ok(Self {
            provider: Some(provider),
            params,
        })
    }

    pub fn params(&self) -> &OptimizerParams {
        &self.params
    }

    #[instrument(skip_all, level = "debug", fields(waypoints = request.waypoints.len()))]
    pub async fn optimize(&self, request: RouteRequest) -> Result<OptimizedRoute, RouteRequestError> {
        self.optimize_at(request, Timestamp::now()).await
    }

    /// Same as [`RouteOptimizer::optimize`] with arrivals estimated from `departure`.
    pub async fn optimize_at(
        &self,
        request: RouteRequest,
        departure: Timestamp,
    ) -> Result<OptimizedRoute, RouteRequestError> {
        request.validate()?;

        let reorder = request.should_reorder();
        let kind = if reorder {
            QueryKind::Trip
        } else {
            QueryKind::Route
        };

        let outcome = match self.fetch_from_provider(&request, kind).await {
            Some(Ok(outcome)) => outcome,
            Some(Err(error)) => {
                warn!(
                    "Routing provider failed, falling back to local estimates: {}",
                    error
                );
                self.local_outcome(&request, reorder)
            }
            None => self.local_outcome(&request, reorder),
        };

        Ok(self.aggregate(&request, outcome, reorder, departure))
    }

    /// `None` when no provider is configured.
    async fn fetch_from_provider(
        &self,
        request: &RouteRequest,
        kind: QueryKind,
    ) -> Option<Result<RouteOutcome, ProviderError>> {
        let provider = self.provider.as_ref()?;
        let query = ProviderQuery::from_request(request, kind);
        let timeout = self.params.provider_timeout;

        debug!(
            "Requesting {:?} over {} coordinates from provider",
            kind,
            query.coordinates.len()
        );

        // Dropping the provider future on timeout abandons the call
        let call = provider.fetch_route(&query);
        let result = match tokio::time::timeout(timeout.unsigned_abs(), call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        };

        Some(result.and_then(|route| {
            let geometry = route.geometry.clone();
            let sequence = match kind {
                QueryKind::Trip => associate::by_location(&request.waypoints, route)?,
                QueryKind::Route => associate::in_order(&request.waypoints, route)?,
            };

            Ok(RouteOutcome::Measured { sequence, geometry })
        }))
    }

    fn local_outcome(&self, request: &RouteRequest, reorder: bool) -> RouteOutcome {
        let speed = self.params.average_speed;

        let sequence = if reorder {
            nearest_neighbor::nearest_neighbor(
                request.depot,
                &request.waypoints,
                request.round_trip,
                speed,
            )
        } else {
            nearest_neighbor::in_order(
                request.depot,
                &request.waypoints,
                request.round_trip,
                speed,
            )
        };

        RouteOutcome::Estimated { sequence }
    }

    fn aggregate(
        &self,
        request: &RouteRequest,
        outcome: RouteOutcome,
        optimized: bool,
        departure: Timestamp,
    ) -> OptimizedRoute {
        let metrics_source = outcome.metrics_source();
        let (sequence, geometry) = match outcome {
            RouteOutcome::Measured { sequence, geometry } => (sequence, geometry),
            RouteOutcome::Estimated { sequence } => (sequence, None),
        };

        let metrics = metrics::aggregate(&sequence, departure, self.params.dwell_time);

        OptimizedRoute {
            total_distance: metrics.total_distance,
            total_duration: metrics.total_duration,
            stops: metrics.stops,
            return_leg: sequence.return_leg,
            optimized,
            round_trip: request.round_trip,
            geometry,
            metrics_source,
        }
    }
}
