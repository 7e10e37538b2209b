pub mod coordinate;
pub mod kmh;
pub mod meters;
pub mod route_request;
pub mod waypoint;
