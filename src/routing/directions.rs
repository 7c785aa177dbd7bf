use crate::core::constants::DIRECTIONS_API_URL;
use crate::core::geo::LatLng;
use crate::routing::{Route, RouteProvider, RouteRequest};
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Shared async HTTP client for directions requests
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("mapframe/0.1.0")
        .timeout(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .expect("failed to build reqwest async client")
});

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: LineString,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct LineString {
    /// `[lng, lat]` pairs
    coordinates: Vec<[f64; 2]>,
}

/// Client for a Mapbox-style directions web service.
///
/// One GET per request with GeoJSON geometry and no step data. Failures are
/// returned as [`MapError::RouteFetch`] and never retried here.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    base_url: String,
    token: String,
}

impl DirectionsClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(DIRECTIONS_API_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn url(&self, request: &RouteRequest) -> String {
        format!(
            "{}{}/{}?steps=false&geometries=geojson&access_token={}",
            self.base_url,
            request.profile,
            request.coordinates_path(),
            self.token
        )
    }

    /// Parses a directions response body into its first route
    pub fn parse_response(body: &str) -> Result<Route> {
        let response: DirectionsResponse = serde_json::from_str(body)?;
        let route = response.routes.into_iter().next().ok_or_else(|| {
            MapError::RouteFetch(format!(
                "no route in response (code: {}, message: {})",
                response.code.as_deref().unwrap_or("none"),
                response.message.as_deref().unwrap_or("none")
            ))
        })?;

        Ok(Route {
            geometry: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| LatLng::from_lng_lat(lng, lat))
                .collect(),
            distance_m: route.distance,
            duration_s: route.duration,
        })
    }
}

#[async_trait]
impl RouteProvider for DirectionsClient {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Route> {
        let url = self.url(request);
        log::debug!(
            "requesting {} route through {} waypoints",
            request.profile,
            request.waypoints.len()
        );

        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|e| MapError::RouteFetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(MapError::RouteFetch(format!(
                "HTTP {} from directions service",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MapError::RouteFetch(e.to_string()))?;
        Self::parse_response(&body)
    }
}
