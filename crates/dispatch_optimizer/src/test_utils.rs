use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use jiff::SignedDuration;

use crate::{
    problem::{
        coordinate::Coordinate,
        meters::Meters,
        route_request::RouteRequest,
        waypoint::{Waypoint, WaypointId},
    },
    provider::{ProviderError, ProviderQuery, ProviderRoute, ProviderVisit, QueryKind, RouteProvider},
    solution::stop_sequence::RouteLeg,
};

/// Waypoints at the given `(latitude, longitude)` pairs, identified by their index.
pub fn create_waypoints(locations: Vec<(f64, f64)>) -> Vec<Waypoint> {
    locations
        .into_iter()
        .enumerate()
        .map(|(index, (latitude, longitude))| {
            Waypoint::new(
                Some(WaypointId::Number(index as i64)),
                Coordinate::new(latitude, longitude),
            )
        })
        .collect()
}

pub fn grid_origin() -> Coordinate {
    Coordinate::new(50.85, 4.35)
}

/// Waypoints on a `rows` x `cols` grid north-east of [`grid_origin`].
pub fn create_grid_waypoints(rows: usize, cols: usize) -> Vec<Waypoint> {
    let origin = grid_origin();
    let mut locations = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            locations.push((
                origin.latitude + 0.01 * (row + 1) as f64,
                origin.longitude + 0.013 * (col + 1) as f64,
            ));
        }
    }

    create_waypoints(locations)
}

pub fn create_request(
    depot: (f64, f64),
    locations: Vec<(f64, f64)>,
    round_trip: bool,
    optimize: bool,
) -> RouteRequest {
    RouteRequest {
        depot: Coordinate::new(depot.0, depot.1),
        waypoints: create_waypoints(locations),
        round_trip,
        optimize,
    }
}

fn test_leg() -> RouteLeg {
    RouteLeg::new(Meters::new(1000.0), SignedDuration::from_secs(60))
}

/// Answers with the waypoints of the query in their input order, or in a
/// fixed visiting order, with 1km legs.
#[derive(Default)]
pub struct FixedProvider {
    visiting: Option<Vec<Coordinate>>,
    geometry: Option<String>,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<QueryKind>>>,
}

impl FixedProvider {
    pub fn visiting(locations: Vec<(f64, f64)>, geometry: Option<String>) -> Self {
        Self {
            visiting: Some(
                locations
                    .into_iter()
                    .map(|(latitude, longitude)| Coordinate::new(latitude, longitude))
                    .collect(),
            ),
            geometry,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn queries(&self) -> Arc<Mutex<Vec<QueryKind>>> {
        Arc::clone(&self.queries)
    }
}

impl RouteProvider for FixedProvider {
    async fn fetch_route(&self, query: &ProviderQuery) -> Result<ProviderRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.kind);

        let locations = match &self.visiting {
            Some(locations) => locations.clone(),
            None => query.coordinates[1..=query.waypoint_count()].to_vec(),
        };

        Ok(ProviderRoute {
            visits: locations
                .into_iter()
                .map(|location| ProviderVisit {
                    location,
                    leg: test_leg(),
                })
                .collect(),
            return_leg: query.round_trip.then(test_leg),
            geometry: self.geometry.clone(),
        })
    }
}

#[derive(Default)]
pub struct FailingProvider {
    calls: Arc<AtomicUsize>,
}

impl FailingProvider {
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl RouteProvider for FailingProvider {
    async fn fetch_route(&self, _query: &ProviderQuery) -> Result<ProviderRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Err(ProviderError::EmptyRoute)
    }
}

/// Answers like [`FixedProvider`] after `delay`.
pub struct SlowProvider {
    delay: SignedDuration,
    inner: FixedProvider,
}

impl SlowProvider {
    pub fn new(delay: SignedDuration) -> Self {
        Self {
            delay,
            inner: FixedProvider::default(),
        }
    }
}

impl RouteProvider for SlowProvider {
    async fn fetch_route(&self, query: &ProviderQuery) -> Result<ProviderRoute, ProviderError> {
        tokio::time::sleep(self.delay.unsigned_abs()).await;

        self.inner.fetch_route(query).await
    }
}
