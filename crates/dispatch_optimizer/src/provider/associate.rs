use tracing::debug;

use crate::{
    problem::waypoint::Waypoint,
    provider::{ProviderError, ProviderRoute},
    solution::stop_sequence::{RoutedStop, StopSequence},
};

/// Maximum difference, in degrees on each axis, for a provider location to be
/// considered the same point as an input waypoint.
pub const MATCH_TOLERANCE_DEGREES: f64 = 1e-4;

/// Maps visits of a reordered provider route back to the input waypoints by
/// location.
///
/// Waypoints are scanned in input order and the first one that is within
/// tolerance and not matched yet wins, so duplicated or very close waypoints
/// are handed out in input order. A visit matching no waypoint stays at its
/// position with the provider location and no id.
pub fn by_location(
    waypoints: &[Waypoint],
    route: ProviderRoute,
) -> Result<StopSequence, ProviderError> {
    check_visit_count(waypoints, &route)?;

    let mut matched = vec![false; waypoints.len()];
    let mut stops = Vec::with_capacity(route.visits.len());

    for visit in route.visits {
        let candidate = (0..waypoints.len()).find(|&index| {
            !matched[index]
                && waypoints[index]
                    .coordinate()
                    .approx_eq(&visit.location, MATCH_TOLERANCE_DEGREES)
        });

        let stop = match candidate {
            Some(index) => {
                matched[index] = true;
                let waypoint = &waypoints[index];

                RoutedStop {
                    waypoint_id: waypoint.id().cloned(),
                    coordinate: waypoint.coordinate(),
                    leg: visit.leg,
                }
            }
            None => {
                debug!(
                    "No waypoint within {} degrees of provider location ({}, {})",
                    MATCH_TOLERANCE_DEGREES, visit.location.latitude, visit.location.longitude
                );

                RoutedStop {
                    waypoint_id: None,
                    coordinate: visit.location,
                    leg: visit.leg,
                }
            }
        };

        stops.push(stop);
    }

    Ok(StopSequence {
        stops,
        return_leg: route.return_leg,
    })
}

/// Pairs visits of an unreordered provider route with the input waypoints
/// by position.
pub fn in_order(
    waypoints: &[Waypoint],
    route: ProviderRoute,
) -> Result<StopSequence, ProviderError> {
    check_visit_count(waypoints, &route)?;

    let stops = waypoints
        .iter()
        .zip(route.visits)
        .map(|(waypoint, visit)| RoutedStop {
            waypoint_id: waypoint.id().cloned(),
            coordinate: waypoint.coordinate(),
            leg: visit.leg,
        })
        .collect();

    Ok(StopSequence {
        stops,
        return_leg: route.return_leg,
    })
}

fn check_visit_count(waypoints: &[Waypoint], route: &ProviderRoute) -> Result<(), ProviderError> {
    if route.visits.len() != waypoints.len() {
        return Err(ProviderError::VisitCountMismatch {
            expected: waypoints.len(),
            actual: route.visits.len(),
        });
    }

    Ok(())
}
