use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{coordinate::Coordinate, meters::Meters, waypoint::WaypointId},
    solution::stop_sequence::RouteLeg,
};

/// Where the leg metrics of a route come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
    /// Road distances and travel times measured by the routing provider
    Provider,

    /// Great-circle distances at a constant average speed
    Estimated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedStop {
    /// 1-based position in the route
    pub order: usize,
    pub waypoint_id: Option<WaypointId>,
    pub coordinate: Coordinate,
    pub leg_from_previous: RouteLeg,
    pub cumulative_distance: Meters,
    pub cumulative_duration: SignedDuration,
    pub estimated_arrival: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedRoute {
    pub total_distance: Meters,
    pub total_duration: SignedDuration,
    pub stops: Vec<OrderedStop>,
    pub return_leg: Option<RouteLeg>,

    /// Whether a reordering algorithm ran, the provider's or the local one
    pub optimized: bool,
    pub round_trip: bool,

    /// Encoded polyline of the provider route
    pub geometry: Option<String>,
    pub metrics_source: MetricsSource,
}

impl OptimizedRoute {
    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.stops
            .iter()
            .map(|stop| &stop.leg_from_previous)
            .chain(self.return_leg.iter())
    }

    pub fn waypoint_ids(&self) -> Vec<Option<&WaypointId>> {
        self.stops
            .iter()
            .map(|stop| stop.waypoint_id.as_ref())
            .collect()
    }

    pub fn is_estimated(&self) -> bool {
        self.metrics_source == MetricsSource::Estimated
    }
}
