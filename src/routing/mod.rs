//! Route geometry between waypoints.

pub mod directions;
pub mod overlay;

pub use directions::DirectionsClient;
pub use overlay::RouteOverlays;

use crate::core::config::RouteProfile;
use crate::core::constants::COORDINATE_PRECISION;
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A route through ordered waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub profile: RouteProfile,
    pub waypoints: Vec<LatLng>,
}

impl RouteRequest {
    pub fn new(profile: RouteProfile, waypoints: Vec<LatLng>) -> Self {
        Self { profile, waypoints }
    }

    /// `lng,lat;lng,lat;...` in waypoint order
    pub fn coordinates_path(&self) -> String {
        self.waypoints
            .iter()
            .map(|p| {
                format!(
                    "{:.prec$},{:.prec$}",
                    p.lng,
                    p.lat,
                    prec = COORDINATE_PRECISION as usize
                )
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Route returned by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub geometry: Vec<LatLng>,
    /// Metres
    pub distance_m: f64,
    /// Seconds
    pub duration_s: f64,
}

impl Route {
    /// Distance in kilometres with one decimal, e.g. "12.3"
    pub fn distance_km_label(&self) -> String {
        format!("{:.1}", self.distance_m / 1000.0)
    }
}

/// Source of routes, e.g. a directions web service
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Route>;
}

/// Provider answering every request with a fixed route, or failing when
/// it has none
#[derive(Debug, Clone, Default)]
pub struct StaticRouteProvider {
    route: Option<Route>,
}

impl StaticRouteProvider {
    pub fn new(route: Route) -> Self {
        Self { route: Some(route) }
    }

    /// A provider whose every fetch fails
    pub fn unavailable() -> Self {
        Self { route: None }
    }

    /// Routes straight through the requested waypoints
    pub fn straight_line() -> StraightLineProvider {
        StraightLineProvider
    }
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn fetch_route(&self, _request: &RouteRequest) -> Result<Route> {
        self.route
            .clone()
            .ok_or_else(|| MapError::RouteFetch("no route available".to_string()))
    }
}

/// Provider that joins the waypoints with straight segments
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineProvider;

#[async_trait]
impl RouteProvider for StraightLineProvider {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Route> {
        let distance_m = request
            .waypoints
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum::<f64>();
        Ok(Route {
            geometry: request.waypoints.clone(),
            distance_m,
            duration_s: 0.0,
        })
    }
}
