use std::{fmt::Display, time::Duration};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::response::{OsrmResponse, OsrmRouteResponse, OsrmTripResponse};

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("OSRM responded with code {code}: {message}")]
    Code { code: String, message: String },

    #[error("At least two coordinates are required, got {0}")]
    NotEnoughCoordinates(usize),
}

pub struct OsrmClientParams {
    /// Base url of the OSRM server, without trailing slash
    pub osrm_url: String,

    /// Routing profile, `driving` on most public servers
    pub profile: String,

    /// Bound on a single request, connection included
    pub timeout: Duration,
}

pub const OSRM_TRIP_API_PATH: &str = "/trip/v1/";
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAnchor {
    Any,
    First,
    Last,
}

impl Display for TripAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TripAnchor::Any => "any",
                TripAnchor::First => "first",
                TripAnchor::Last => "last",
            }
        )
    }
}

/// Options of the trip service.
///
/// OSRM only supports `roundtrip=false` together with `source=first` and
/// `destination=last`.
#[derive(Debug, Clone, Copy)]
pub struct TripOptions {
    pub roundtrip: bool,
    pub source: TripAnchor,
    pub destination: TripAnchor,
}

pub struct OsrmClient {
    params: OsrmClientParams,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(params: OsrmClientParams) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    /// Solves the traveling salesman problem over `points` with the trip service.
    pub async fn fetch_trip<P>(
        &self,
        points: &[P],
        options: TripOptions,
    ) -> Result<OsrmTripResponse, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let url = self.service_url(OSRM_TRIP_API_PATH, points)?;

        debug!(
            "OSRM: requesting trip over {} coordinates ({:?})",
            points.len(),
            options
        );

        let request = self.client.get(url).query(&[
            ("roundtrip", options.roundtrip.to_string()),
            ("source", options.source.to_string()),
            ("destination", options.destination.to_string()),
            ("overview", String::from("full")),
            ("geometries", String::from("polyline")),
            ("steps", String::from("false")),
        ]);

        self.send(request).await
    }

    /// Routes through `points` in the given order with the route service.
    pub async fn fetch_route<P>(&self, points: &[P]) -> Result<OsrmRouteResponse, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let url = self.service_url(OSRM_ROUTE_API_PATH, points)?;

        debug!("OSRM: requesting route over {} coordinates", points.len());

        let request = self.client.get(url).query(&[
            ("overview", "full"),
            ("geometries", "polyline"),
            ("steps", "false"),
        ]);

        self.send(request).await
    }

    fn service_url<P>(&self, service_path: &str, points: &[P]) -> Result<String, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        if points.len() < 2 {
            return Err(OsrmError::NotEnoughCoordinates(points.len()));
        }

        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(service_path);
        url.push_str(&self.params.profile);
        url.push('/');

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        Ok(url)
    }

    async fn send<T>(&self, request: reqwest::RequestBuilder) -> Result<T, OsrmError>
    where
        T: DeserializeOwned + OsrmResponse,
    {
        let response = request.send().await?;

        read_response(response).await
    }
}

/// Rejects non-success statuses and responses whose `code` is not `Ok`.
async fn read_response<T>(response: reqwest::Response) -> Result<T, OsrmError>
where
    T: DeserializeOwned + OsrmResponse,
{
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(OsrmError::Api { status, message });
    }

    let body: T = response.json().await?;

    if !body.is_ok() {
        return Err(OsrmError::Code {
            code: body.code().to_string(),
            message: body.message().unwrap_or_default().to_string(),
        });
    }

    Ok(body)
}
