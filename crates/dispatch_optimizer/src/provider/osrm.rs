use dispatch_osrm::{
    client::{OsrmClient, OsrmClientParams, OsrmError, TripAnchor, TripOptions},
    response::{OsrmRoute, OsrmRouteResponse, OsrmTripResponse, OsrmWaypoint},
};
use tracing::debug;

use crate::{
    problem::coordinate::Coordinate,
    provider::{
        ProviderError, ProviderQuery, ProviderRoute, ProviderVisit, QueryKind, RouteProvider,
        provider_leg,
    },
};

/// [`RouteProvider`] backed by the `trip` and `route` services of an OSRM
/// server.
pub struct OsrmRouteProvider {
    client: OsrmClient,
}

impl OsrmRouteProvider {
    pub fn new(params: OsrmClientParams) -> Result<Self, OsrmError> {
        Ok(Self {
            client: OsrmClient::new(params)?,
        })
    }
}

impl RouteProvider for OsrmRouteProvider {
    async fn fetch_route(&self, query: &ProviderQuery) -> Result<ProviderRoute, ProviderError> {
        match query.kind {
            QueryKind::Trip => {
                let response = self
                    .client
                    .fetch_trip(&query.coordinates, trip_options(query.round_trip))
                    .await?;

                parse_trip(response, query)
            }
            QueryKind::Route => {
                let response = self.client.fetch_route(&query.coordinates).await?;

                parse_route(response, query)
            }
        }
    }
}

/// Round trips carry the depot at both ends of the coordinate list and are
/// requested as a path from the first to the last coordinate. Open routes are
/// requested as a cycle anchored at the depot whose closing leg is dropped.
fn trip_options(round_trip: bool) -> TripOptions {
    if round_trip {
        TripOptions {
            roundtrip: false,
            source: TripAnchor::First,
            destination: TripAnchor::Last,
        }
    } else {
        TripOptions {
            roundtrip: true,
            source: TripAnchor::First,
            destination: TripAnchor::Any,
        }
    }
}

pub(crate) fn parse_trip(
    response: OsrmTripResponse,
    query: &ProviderQuery,
) -> Result<ProviderRoute, ProviderError> {
    let trip = first_route(response.trips)?;
    let waypoint_count = query.waypoint_count();

    if response.waypoints.len() != query.coordinates.len() {
        return Err(ProviderError::Malformed(format!(
            "{} waypoints for {} coordinates",
            response.waypoints.len(),
            query.coordinates.len()
        )));
    }

    // Trip position and input index of every coordinate
    let mut visiting_order: Vec<(usize, usize, &OsrmWaypoint)> =
        Vec::with_capacity(response.waypoints.len());
    for (input_index, waypoint) in response.waypoints.iter().enumerate() {
        if waypoint.trips_index.is_some_and(|index| index != 0) {
            return Err(ProviderError::Malformed(String::from(
                "waypoints were split across several trips",
            )));
        }

        let position = waypoint.waypoint_index.ok_or_else(|| {
            ProviderError::Malformed(String::from("trip waypoint without waypoint_index"))
        })?;

        visiting_order.push((position, input_index, waypoint));
    }

    visiting_order.sort_by_key(|(position, _, _)| *position);

    if visiting_order
        .iter()
        .enumerate()
        .any(|(expected, (position, _, _))| *position != expected)
    {
        return Err(ProviderError::Malformed(String::from(
            "trip positions are not a permutation of the input",
        )));
    }

    if visiting_order.first().map(|(_, input_index, _)| *input_index) != Some(0) {
        return Err(ProviderError::Malformed(String::from(
            "trip does not start at the depot",
        )));
    }

    let last_input_index = query.coordinates.len().saturating_sub(1);
    if query.round_trip
        && visiting_order.last().map(|(_, input_index, _)| *input_index) != Some(last_input_index)
    {
        return Err(ProviderError::Malformed(String::from(
            "round trip does not end at the depot",
        )));
    }

    // One leg per visit, plus the closing leg of the path or of the cycle
    if trip.legs.len() != waypoint_count + 1 {
        return Err(ProviderError::Malformed(format!(
            "{} legs for {} waypoints",
            trip.legs.len(),
            waypoint_count
        )));
    }

    // Position 0 is the depot (source=first), and for round trips the last
    // position is the depot again (destination=last).
    let visits = visiting_order[1..=waypoint_count]
        .iter()
        .zip(&trip.legs)
        .map(|((_, _, waypoint), leg)| {
            Ok(ProviderVisit {
                location: location(waypoint),
                leg: provider_leg(leg.distance, leg.duration)?,
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    let closing_leg = &trip.legs[waypoint_count];
    let closing_leg = provider_leg(closing_leg.distance, closing_leg.duration)?;

    debug!(
        "OSRM: trip over {} waypoints, {}m",
        waypoint_count, trip.distance
    );

    Ok(ProviderRoute {
        visits,
        return_leg: query.round_trip.then_some(closing_leg),
        geometry: trip.geometry,
    })
}

pub(crate) fn parse_route(
    response: OsrmRouteResponse,
    query: &ProviderQuery,
) -> Result<ProviderRoute, ProviderError> {
    let route = first_route(response.routes)?;
    let waypoint_count = query.waypoint_count();

    if route.legs.len() != query.coordinates.len().saturating_sub(1) {
        return Err(ProviderError::Malformed(format!(
            "{} legs for {} coordinates",
            route.legs.len(),
            query.coordinates.len()
        )));
    }

    let locations = if response.waypoints.len() == query.coordinates.len() {
        response.waypoints.iter().map(location).collect::<Vec<_>>()
    } else {
        query.coordinates.clone()
    };

    let visits = locations[1..=waypoint_count]
        .iter()
        .zip(&route.legs)
        .map(|(location, leg)| {
            Ok(ProviderVisit {
                location: *location,
                leg: provider_leg(leg.distance, leg.duration)?,
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    let return_leg = if query.round_trip {
        let leg = &route.legs[waypoint_count];
        Some(provider_leg(leg.distance, leg.duration)?)
    } else {
        None
    };

    debug!(
        "OSRM: route over {} waypoints, {}m",
        waypoint_count, route.distance
    );

    Ok(ProviderRoute {
        visits,
        return_leg,
        geometry: route.geometry,
    })
}

fn first_route(routes: Vec<OsrmRoute>) -> Result<OsrmRoute, ProviderError> {
    routes.into_iter().next().ok_or(ProviderError::EmptyRoute)
}

fn location(waypoint: &OsrmWaypoint) -> Coordinate {
    Coordinate::new(waypoint.latitude(), waypoint.longitude())
}
