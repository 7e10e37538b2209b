use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside of [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside of [-180, 180]")]
    Longitude(f64),
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Out of range and non finite values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude) {
            return Err(CoordinateError::Latitude(self.latitude));
        }

        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude) {
            return Err(CoordinateError::Longitude(self.longitude));
        }

        Ok(())
    }

    /// Whether both axes are within `tolerance` degrees of `other`.
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

impl From<&Coordinate> for geo_types::Point {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Point::new(coordinate.longitude, coordinate.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0).validate(),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1).validate(),
            Err(CoordinateError::Longitude(-180.1))
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = Coordinate::new(50.85, 4.35);

        assert!(a.approx_eq(&Coordinate::new(50.85005, 4.34995), 1e-4));
        assert!(!a.approx_eq(&Coordinate::new(50.8502, 4.35), 1e-4));
    }

    #[test]
    fn test_into_point_is_lon_lat() {
        let point: geo_types::Point = (&Coordinate::new(50.85, 4.35)).into();

        assert_eq!(point.x(), 4.35);
        assert_eq!(point.y(), 50.85);
    }
}
