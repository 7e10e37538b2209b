use serde::Deserialize;

/// Implemented by every OSRM service response, all of them carry a `code`
/// that is `"Ok"` on success.
pub trait OsrmResponse {
    fn code(&self) -> &str;

    fn message(&self) -> Option<&str>;

    fn is_ok(&self) -> bool {
        self.code().eq_ignore_ascii_case("ok")
    }
}

/// A coordinate snapped to the road network.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmWaypoint {
    /// `[longitude, latitude]`
    pub location: [f64; 2],

    /// Position of the waypoint inside its trip, only set by the trip service
    pub waypoint_index: Option<usize>,

    /// Index of the trip the waypoint belongs to, only set by the trip service
    pub trips_index: Option<usize>,
}

impl OsrmWaypoint {
    pub fn longitude(&self) -> f64 {
        self.location[0]
    }

    pub fn latitude(&self) -> f64 {
        self.location[1]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsrmLeg {
    /// Distance in meters
    pub distance: f64,

    /// Travel time in seconds
    pub duration: f64,
}

/// A route or a trip, OSRM uses the same object for both services.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,

    /// Encoded polyline, present when `overview` is not `false`
    pub geometry: Option<String>,

    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmTripResponse {
    pub code: String,
    pub message: Option<String>,

    #[serde(default)]
    pub trips: Vec<OsrmRoute>,

    /// Waypoints in input order
    #[serde(default)]
    pub waypoints: Vec<OsrmWaypoint>,
}

impl OsrmResponse for OsrmTripResponse {
    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    pub code: String,
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,

    /// Waypoints in input order
    #[serde(default)]
    pub waypoints: Vec<OsrmWaypoint>,
}

impl OsrmResponse for OsrmRouteResponse {
    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trip_response() {
        let body = r#"{
            "code": "Ok",
            "trips": [{
                "geometry": "_ibE_seK",
                "legs": [
                    { "distance": 120.5, "duration": 30.1, "steps": [], "summary": "", "weight": 30.1 },
                    { "distance": 80.0, "duration": 20.0, "steps": [], "summary": "", "weight": 20.0 }
                ],
                "distance": 200.5,
                "duration": 50.1,
                "weight_name": "routability",
                "weight": 50.1
            }],
            "waypoints": [
                { "waypoint_index": 0, "trips_index": 0, "location": [4.35, 50.85], "name": "Rue Neuve", "hint": "abc", "distance": 1.2 },
                { "waypoint_index": 2, "trips_index": 0, "location": [4.36, 50.86], "name": "" },
                { "waypoint_index": 1, "trips_index": 0, "location": [4.37, 50.87], "name": "" }
            ]
        }"#;

        let response: OsrmTripResponse = serde_json::from_str(body).unwrap();

        assert!(response.is_ok());
        assert_eq!(response.trips.len(), 1);
        assert_eq!(response.trips[0].legs.len(), 2);
        assert_eq!(response.trips[0].geometry.as_deref(), Some("_ibE_seK"));
        assert_eq!(response.waypoints[1].waypoint_index, Some(2));
        assert_eq!(response.waypoints[2].latitude(), 50.87);
        assert_eq!(response.waypoints[2].longitude(), 4.37);
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{ "code": "NoTrips", "message": "No trip visiting all destinations possible." }"#;

        let response: OsrmTripResponse = serde_json::from_str(body).unwrap();

        assert!(!response.is_ok());
        assert!(response.trips.is_empty());
        assert_eq!(
            response.message(),
            Some("No trip visiting all destinations possible.")
        );
    }

    #[test]
    fn test_code_is_case_insensitive() {
        let body = r#"{ "code": "ok", "routes": [], "waypoints": [] }"#;
        let response: OsrmRouteResponse = serde_json::from_str(body).unwrap();

        assert!(response.is_ok());
    }
}
