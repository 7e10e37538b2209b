use jiff::{SignedDuration, Timestamp};

use crate::{
    problem::meters::Meters,
    solution::{optimized_route::OrderedStop, stop_sequence::StopSequence},
};

pub struct AggregatedMetrics {
    pub stops: Vec<OrderedStop>,
    pub total_distance: Meters,
    pub total_duration: SignedDuration,
}

/// Running totals and arrival estimates over an ordered stop sequence.
///
/// The vehicle leaves the depot at `departure`, drives each leg and spends
/// `dwell_time` at every stop before driving the next leg. Totals include
/// the return leg of round trips.
pub fn aggregate(
    sequence: &StopSequence,
    departure: Timestamp,
    dwell_time: SignedDuration,
) -> AggregatedMetrics {
    let mut cumulative_distance = Meters::ZERO;
    let mut cumulative_duration = SignedDuration::ZERO;
    let mut dwelled = SignedDuration::ZERO;

    let mut stops = Vec::with_capacity(sequence.len());

    for (index, stop) in sequence.stops.iter().enumerate() {
        cumulative_distance += stop.leg.distance();
        cumulative_duration = cumulative_duration.saturating_add(stop.leg.duration());

        if index > 0 {
            dwelled = dwelled.saturating_add(dwell_time);
        }

        stops.push(OrderedStop {
            order: index + 1,
            waypoint_id: stop.waypoint_id.clone(),
            coordinate: stop.coordinate,
            leg_from_previous: stop.leg,
            cumulative_distance,
            cumulative_duration,
            estimated_arrival: arrival(departure, cumulative_duration.saturating_add(dwelled)),
        });
    }

    let (total_distance, total_duration) = match &sequence.return_leg {
        Some(leg) => (
            cumulative_distance + leg.distance(),
            cumulative_duration.saturating_add(leg.duration()),
        ),
        None => (cumulative_distance, cumulative_duration),
    };

    AggregatedMetrics {
        stops,
        total_distance,
        total_duration,
    }
}

fn arrival(departure: Timestamp, offset: SignedDuration) -> Timestamp {
    departure.checked_add(offset).unwrap_or(Timestamp::MAX)
}
