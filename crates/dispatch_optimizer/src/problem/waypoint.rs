use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::coordinate::Coordinate;

/// Opaque identifier of a delivery stop, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum WaypointId {
    Number(i64),
    Text(String),
}

impl From<&str> for WaypointId {
    fn from(value: &str) -> Self {
        WaypointId::Text(value.to_owned())
    }
}

impl From<i64> for WaypointId {
    fn from(value: i64) -> Self {
        WaypointId::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    id: Option<WaypointId>,
    coordinate: Coordinate,
}

impl Waypoint {
    pub fn new(id: Option<WaypointId>, coordinate: Coordinate) -> Self {
        Self { id, coordinate }
    }

    pub fn id(&self) -> Option<&WaypointId> {
        self.id.as_ref()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
