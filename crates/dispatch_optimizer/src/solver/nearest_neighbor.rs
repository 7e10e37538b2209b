use crate::{
    distance::{estimate_leg, haversine_distance},
    problem::{coordinate::Coordinate, kmh::Kmh, waypoint::Waypoint},
    solution::stop_sequence::{RoutedStop, StopSequence},
};

/// Greedy nearest neighbour tour starting at the depot.
///
/// At each step the closest unvisited waypoint is visited next, ties go to
/// the waypoint that comes first in `waypoints`, so the same input always
/// yields the same order. Runs in O(n²) and never fails.
pub fn nearest_neighbor(
    depot: Coordinate,
    waypoints: &[Waypoint],
    round_trip: bool,
    speed: Kmh,
) -> StopSequence {
    let mut visited = vec![false; waypoints.len()];
    let mut order = Vec::with_capacity(waypoints.len());
    let mut current = depot;

    for _ in 0..waypoints.len() {
        let mut best: Option<(usize, f64)> = None;

        for (index, waypoint) in waypoints.iter().enumerate() {
            if visited[index] {
                continue;
            }

            let distance = haversine_distance(&current, &waypoint.coordinate()).value();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        let Some((next, _)) = best else {
            break;
        };

        visited[next] = true;
        order.push(next);
        current = waypoints[next].coordinate();
    }

    build_sequence(depot, waypoints, &order, round_trip, speed)
}

/// Legs over the waypoints in the given order, nothing is reordered.
pub fn in_order(
    depot: Coordinate,
    waypoints: &[Waypoint],
    round_trip: bool,
    speed: Kmh,
) -> StopSequence {
    let order = (0..waypoints.len()).collect::<Vec<_>>();
    build_sequence(depot, waypoints, &order, round_trip, speed)
}

fn build_sequence(
    depot: Coordinate,
    waypoints: &[Waypoint],
    order: &[usize],
    round_trip: bool,
    speed: Kmh,
) -> StopSequence {
    let mut previous = depot;
    let mut stops = Vec::with_capacity(order.len());

    for &index in order {
        let waypoint = &waypoints[index];
        let coordinate = waypoint.coordinate();

        stops.push(RoutedStop {
            waypoint_id: waypoint.id().cloned(),
            coordinate,
            leg: estimate_leg(&previous, &coordinate, speed),
        });

        previous = coordinate;
    }

    let return_leg = round_trip.then(|| estimate_leg(&previous, &depot, speed));

    StopSequence { stops, return_leg }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::{meters::Meters, waypoint::WaypointId},
        test_utils,
    };

    const ONE_DEGREE_METERS: f64 = 111_194.926_644_558_73;

    fn ids(sequence: &StopSequence) -> Vec<i64> {
        sequence
            .stops
            .iter()
            .map(|stop| match stop.waypoint_id {
                Some(WaypointId::Number(id)) => id,
                _ => panic!("expected numeric id"),
            })
            .collect()
    }

    #[test]
    fn test_nearest_first_on_a_line() {
        // A(0,1), B(0,3), C(0,2)
        let waypoints = test_utils::create_waypoints(vec![(0.0, 1.0), (0.0, 3.0), (0.0, 2.0)]);

        let sequence = nearest_neighbor(
            Coordinate::new(0.0, 0.0),
            &waypoints,
            false,
            Kmh::new(40.0),
        );

        assert_eq!(ids(&sequence), vec![0, 2, 1]);
        for stop in &sequence.stops {
            assert!((stop.leg.distance().value() - ONE_DEGREE_METERS).abs() < 1e-6);
        }
        assert_eq!(sequence.return_leg, None);
    }

    #[test]
    fn test_round_trip_closes_at_depot() {
        let waypoints = test_utils::create_waypoints(vec![(0.0, 1.0), (0.0, 3.0), (0.0, 2.0)]);

        let sequence = nearest_neighbor(
            Coordinate::new(0.0, 0.0),
            &waypoints,
            true,
            Kmh::new(40.0),
        );

        let return_leg = sequence.return_leg.unwrap();
        assert!((return_leg.distance().value() - 3.0 * ONE_DEGREE_METERS).abs() < 1e-6);
    }

    #[test]
    fn test_ties_go_to_earliest_index() {
        // Both at one degree from the depot, east first then west
        let waypoints = test_utils::create_waypoints(vec![(0.0, 1.0), (0.0, -1.0), (1.0, 0.0)]);

        let sequence = nearest_neighbor(
            Coordinate::new(0.0, 0.0),
            &waypoints,
            false,
            Kmh::new(40.0),
        );

        assert_eq!(sequence.stops[0].waypoint_id, Some(WaypointId::Number(0)));
    }

    #[test]
    fn test_duplicate_locations_keep_input_order() {
        let waypoints = test_utils::create_waypoints(vec![(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)]);

        let sequence = nearest_neighbor(
            Coordinate::new(0.0, 0.0),
            &waypoints,
            false,
            Kmh::new(40.0),
        );

        assert_eq!(ids(&sequence), vec![0, 1, 2]);
        assert_eq!(sequence.stops[1].leg.distance(), Meters::ZERO);
    }

    #[test]
    fn test_deterministic() {
        let waypoints = test_utils::create_grid_waypoints(7, 7);
        let depot = Coordinate::new(50.85, 4.35);

        let first = nearest_neighbor(depot, &waypoints, true, Kmh::new(40.0));
        for _ in 0..5 {
            assert_eq!(nearest_neighbor(depot, &waypoints, true, Kmh::new(40.0)), first);
        }
    }

    #[test]
    fn test_visits_every_waypoint_once() {
        let waypoints = test_utils::create_grid_waypoints(10, 10);

        let sequence = nearest_neighbor(
            Coordinate::new(50.85, 4.35),
            &waypoints,
            false,
            Kmh::new(40.0),
        );

        let mut visited = ids(&sequence);
        visited.sort_unstable();
        assert_eq!(visited, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_waypoint() {
        let waypoints = test_utils::create_waypoints(vec![(0.0, 1.0)]);

        let sequence = nearest_neighbor(
            Coordinate::new(0.0, 0.0),
            &waypoints,
            false,
            Kmh::new(40.0),
        );

        assert_eq!(sequence.len(), 1);
        assert!(!sequence.is_empty());
        assert!((sequence.stops[0].leg.distance().value() - ONE_DEGREE_METERS).abs() < 1e-6);
    }

    #[test]
    fn test_in_order_keeps_input_order() {
        let waypoints = test_utils::create_waypoints(vec![(0.0, 3.0), (0.0, 1.0), (0.0, 2.0)]);

        let sequence = in_order(Coordinate::new(0.0, 0.0), &waypoints, true, Kmh::new(40.0));

        assert_eq!(ids(&sequence), vec![0, 1, 2]);
        assert!((sequence.stops[0].leg.distance().value() - 3.0 * ONE_DEGREE_METERS).abs() < 1e-6);
        assert!((sequence.return_leg.unwrap().distance().value() - 2.0 * ONE_DEGREE_METERS).abs() < 1e-6);
    }
}
