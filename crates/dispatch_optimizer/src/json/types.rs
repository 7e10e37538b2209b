use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        coordinate::Coordinate,
        route_request::RouteRequest,
        waypoint::{Waypoint, WaypointId},
    },
    solution::{
        optimized_route::{MetricsSource, OptimizedRoute, OrderedStop},
        stop_sequence::RouteLeg,
    },
};

fn default_optimize() -> bool {
    true
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "RouteRequest", rename_all = "camelCase")]
pub struct JsonRouteRequest {
    pub depot_latitude: f64,
    pub depot_longitude: f64,

    /// Delivery stops, between 1 and 100
    pub waypoints: Vec<JsonWaypoint>,

    /// Return to the depot after the last stop
    #[serde(default)]
    pub round_trip: bool,

    /// Reorder the stops, otherwise they are visited in the given order
    #[serde(default = "default_optimize")]
    pub optimize: bool,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "Waypoint", rename_all = "camelCase")]
pub struct JsonWaypoint {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WaypointId>,
}

impl From<JsonRouteRequest> for RouteRequest {
    fn from(value: JsonRouteRequest) -> Self {
        RouteRequest {
            depot: Coordinate::new(value.depot_latitude, value.depot_longitude),
            waypoints: value
                .waypoints
                .into_iter()
                .map(|waypoint| {
                    Waypoint::new(
                        waypoint.id,
                        Coordinate::new(waypoint.latitude, waypoint.longitude),
                    )
                })
                .collect(),
            round_trip: value.round_trip,
            optimize: value.optimize,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "RouteLeg", rename_all = "camelCase")]
pub struct JsonRouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl From<&RouteLeg> for JsonRouteLeg {
    fn from(value: &RouteLeg) -> Self {
        JsonRouteLeg {
            distance_meters: value.distance().value(),
            duration_seconds: value.duration().as_secs_f64(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "OrderedStop", rename_all = "camelCase")]
pub struct JsonOrderedStop {
    pub order: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WaypointId>,

    pub latitude: f64,
    pub longitude: f64,
    pub distance_from_previous: f64,
    pub duration_from_previous: f64,
    pub cumulative_distance: f64,
    pub cumulative_duration: f64,
    pub estimated_arrival: Timestamp,
}

impl From<&OrderedStop> for JsonOrderedStop {
    fn from(value: &OrderedStop) -> Self {
        JsonOrderedStop {
            order: value.order,
            id: value.waypoint_id.clone(),
            latitude: value.coordinate.latitude,
            longitude: value.coordinate.longitude,
            distance_from_previous: value.leg_from_previous.distance().value(),
            duration_from_previous: value.leg_from_previous.duration().as_secs_f64(),
            cumulative_distance: value.cumulative_distance.value(),
            cumulative_duration: value.cumulative_duration.as_secs_f64(),
            estimated_arrival: value.estimated_arrival,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "OptimizedRoute", rename_all = "camelCase")]
pub struct JsonOptimizedRoute {
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub optimized: bool,
    pub round_trip: bool,

    /// Whether leg metrics were measured by the routing provider or estimated
    pub metrics_source: MetricsSource,

    /// Encoded polyline of the road route, when measured by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,

    /// Closing leg back to the depot of round trips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<JsonRouteLeg>,

    pub stops: Vec<JsonOrderedStop>,
}

impl From<&OptimizedRoute> for JsonOptimizedRoute {
    fn from(value: &OptimizedRoute) -> Self {
        JsonOptimizedRoute {
            total_distance_meters: value.total_distance.value(),
            total_duration_seconds: value.total_duration.as_secs_f64(),
            optimized: value.optimized,
            round_trip: value.round_trip,
            metrics_source: value.metrics_source,
            geometry: value.geometry.clone(),
            return_leg: value.return_leg.as_ref().map(JsonRouteLeg::from),
            stops: value.stops.iter().map(JsonOrderedStop::from).collect(),
        }
    }
}
