use jiff::SignedDuration;

use crate::problem::{coordinate::Coordinate, meters::Meters, waypoint::WaypointId};

/// Travel between two consecutive points of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    distance: Meters,
    duration: SignedDuration,
}

impl RouteLeg {
    pub fn new(distance: Meters, duration: SignedDuration) -> Self {
        Self { distance, duration }
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }
}

/// A delivery stop placed in the route, together with the leg reaching it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedStop {
    pub waypoint_id: Option<WaypointId>,
    pub coordinate: Coordinate,
    pub leg: RouteLeg,
}

/// Visiting order produced by either the routing provider or the local
/// optimizer, before metrics are aggregated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopSequence {
    pub stops: Vec<RoutedStop>,

    /// Closing leg back to the depot, only for round trips
    pub return_leg: Option<RouteLeg>,
}

impl StopSequence {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.stops
            .iter()
            .map(|stop| &stop.leg)
            .chain(self.return_leg.iter())
    }

    pub fn waypoint_ids(&self) -> Vec<Option<&WaypointId>> {
        self.stops
            .iter()
            .map(|stop| stop.waypoint_id.as_ref())
            .collect()
    }
}
