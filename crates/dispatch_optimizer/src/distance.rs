use crate::{
    problem::{coordinate::Coordinate, kmh::Kmh, meters::Meters},
    solution::stop_sequence::RouteLeg,
};

/// Earth radius used by every distance estimate of the engine.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> Meters {
    let from_lat = from.latitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Meters::new(EARTH_RADIUS_METERS * c)
}

/// Straight line leg travelled at a constant average speed.
pub fn estimate_leg(from: &Coordinate, to: &Coordinate, speed: Kmh) -> RouteLeg {
    let distance = haversine_distance(from, to);
    RouteLeg::new(distance, distance / speed)
}
