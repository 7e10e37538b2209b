use thiserror::Error;

use crate::problem::{
    coordinate::{Coordinate, CoordinateError},
    waypoint::Waypoint,
};

pub const MAX_WAYPOINTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteRequestError {
    #[error("at least one waypoint is required")]
    NoWaypoints,

    #[error("{count} waypoints exceed the maximum of {max}")]
    TooManyWaypoints { count: usize, max: usize },

    #[error("invalid depot: {0}")]
    InvalidDepot(CoordinateError),

    #[error("invalid waypoint at index {index}: {error}")]
    InvalidWaypoint {
        index: usize,
        error: CoordinateError,
    },
}

#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub depot: Coordinate,
    pub waypoints: Vec<Waypoint>,
    pub round_trip: bool,
    pub optimize: bool,
}

impl RouteRequest {
    /// Checks the waypoint count and every coordinate. This is the only gate
    /// on malformed input, nothing is truncated or clamped.
    pub fn validate(&self) -> Result<(), RouteRequestError> {
        if self.waypoints.is_empty() {
            return Err(RouteRequestError::NoWaypoints);
        }

        if self.waypoints.len() > MAX_WAYPOINTS {
            return Err(RouteRequestError::TooManyWaypoints {
                count: self.waypoints.len(),
                max: MAX_WAYPOINTS,
            });
        }

        self.depot
            .validate()
            .map_err(RouteRequestError::InvalidDepot)?;

        for (index, waypoint) in self.waypoints.iter().enumerate() {
            waypoint
                .coordinate()
                .validate()
                .map_err(|error| RouteRequestError::InvalidWaypoint { index, error })?;
        }

        Ok(())
    }

    /// Whether a reordering of the waypoints is requested and meaningful.
    pub fn should_reorder(&self) -> bool {
        self.optimize && self.waypoints.len() >= 2
    }
}
