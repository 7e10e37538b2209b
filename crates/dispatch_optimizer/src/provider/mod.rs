//! Boundary with external routing services.
//!
//! A [`RouteProvider`] is the only part of the engine that performs I/O. The
//! optimizer calls it at most once per request and substitutes a local
//! estimate whenever it fails.

pub mod associate;
pub mod osrm;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    problem::{coordinate::Coordinate, route_request::RouteRequest},
    solution::stop_sequence::RouteLeg,
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OSRM request failed: {0}")]
    Osrm(#[from] dispatch_osrm::client::OsrmError),

    #[error("provider did not answer within {0}")]
    Timeout(SignedDuration),

    #[error("provider returned no route")]
    EmptyRoute,

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider visited {actual} stops, expected {expected}")]
    VisitCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Let the provider choose the visiting order
    Trip,

    /// Route over the coordinates in the given order
    Route,
}

/// Coordinates sent to the provider: the depot, every waypoint in input
/// order, and the depot again for round trips.
#[derive(Debug, Clone)]
pub struct ProviderQuery {
    pub coordinates: Vec<Coordinate>,
    pub kind: QueryKind,
    pub round_trip: bool,
}

impl ProviderQuery {
    pub fn from_request(request: &RouteRequest, kind: QueryKind) -> Self {
        let mut coordinates = Vec::with_capacity(request.waypoints.len() + 2);

        coordinates.push(request.depot);
        coordinates.extend(request.waypoints.iter().map(|waypoint| waypoint.coordinate()));

        if request.round_trip {
            coordinates.push(request.depot);
        }

        Self {
            coordinates,
            kind,
            round_trip: request.round_trip,
        }
    }

    /// Number of delivery waypoints, depot entries excluded.
    pub fn waypoint_count(&self) -> usize {
        let depots = if self.round_trip { 2 } else { 1 };
        self.coordinates.len().saturating_sub(depots)
    }
}

/// A point visited by the provider with the leg that reaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderVisit {
    /// Location as returned by the provider, possibly snapped or rounded
    pub location: Coordinate,
    pub leg: RouteLeg,
}

/// Provider answer in visiting order, depot entries excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub visits: Vec<ProviderVisit>,
    pub return_leg: Option<RouteLeg>,
    pub geometry: Option<String>,
}

pub trait RouteProvider: Send + Sync {
    /// Performs exactly one call to the provider, without retrying.
    fn fetch_route(
        &self,
        query: &ProviderQuery,
    ) -> impl Future<Output = Result<ProviderRoute, ProviderError>> + Send;
}

/// Stand-in for optimizers running without any routing provider.
pub enum NoProvider {}

impl RouteProvider for NoProvider {
    async fn fetch_route(&self, _query: &ProviderQuery) -> Result<ProviderRoute, ProviderError> {
        match *self {}
    }
}

/// Converts a provider leg, rejecting metrics no road network can produce.
pub(crate) fn provider_leg(distance: f64, duration: f64) -> Result<RouteLeg, ProviderError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(ProviderError::Malformed(format!("invalid leg distance {distance}")));
    }

    if !duration.is_finite() || duration < 0.0 {
        return Err(ProviderError::Malformed(format!("invalid leg duration {duration}")));
    }

    let duration = SignedDuration::try_from_secs_f64(duration)
        .map_err(|e| ProviderError::Malformed(format!("invalid leg duration {duration}: {e}")))?;

    Ok(RouteLeg::new(distance.into(), duration))
}
