//! Per-map settings and fit tuning
//!
//! `MapSettings` mirrors the JSON object a page embeds next to each map, so a
//! map can be configured straight from `serde_json`.

use crate::core::camera::Padding;
use crate::core::constants::{DEFAULT_FIT_DURATION_MS, MAX_WAYPOINTS, MIN_WAYPOINTS};
use crate::core::geo::LatLng;
use crate::core::waypoint::{markers, MarkerSpec, Waypoint};
use crate::{MapError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Base map style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MapStyle {
    Standard,
    Streets,
    #[default]
    Terrain,
    Satellite,
    SatelliteStreets,
}

impl MapStyle {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Streets => "streets",
            Self::Terrain => "terrain",
            Self::Satellite => "satellite",
            Self::SatelliteStreets => "satellite_streets",
        }
    }

    /// Style URL understood by the rendering surface
    pub fn style_url(&self) -> &'static str {
        match self {
            Self::Standard => "mapbox://styles/mapbox/standard",
            Self::Streets => "mapbox://styles/mapbox/streets-v12",
            Self::Terrain => "mapbox://styles/mapbox/outdoors-v12",
            Self::Satellite => "mapbox://styles/mapbox/standard-satellite",
            Self::SatelliteStreets => "mapbox://styles/mapbox/satellite-streets-v12",
        }
    }
}

/// Unknown keys fall back to the terrain style
impl From<String> for MapStyle {
    fn from(key: String) -> Self {
        match key.as_str() {
            "standard" => Self::Standard,
            "streets" => Self::Streets,
            "terrain" => Self::Terrain,
            "satellite" => Self::Satellite,
            "satellite_streets" => Self::SatelliteStreets,
            other => {
                log::debug!("unknown map style '{}', using terrain", other);
                Self::Terrain
            }
        }
    }
}

impl From<MapStyle> for String {
    fn from(style: MapStyle) -> Self {
        style.key().to_string()
    }
}

/// Transport mode for the directions service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteProfile {
    Walking,
    Cycling,
    Driving,
    DrivingTraffic,
}

impl RouteProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
            Self::DrivingTraffic => "driving-traffic",
        }
    }
}

impl FromStr for RouteProfile {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            "driving" => Ok(Self::Driving),
            "driving-traffic" => Ok(Self::DrivingTraffic),
            other => Err(MapError::InvalidSettings(format!(
                "unknown route type '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An empty or missing route type means the map has no route
fn deserialize_route_profile<'de, D>(deserializer: D) -> std::result::Result<Option<RouteProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(key) => key.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Settings for one waypoint map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub uid: String,
    /// Access token for the tile and directions services
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub style: MapStyle,
    #[serde(default, deserialize_with = "deserialize_route_profile")]
    pub route_type: Option<RouteProfile>,
    #[serde(default)]
    pub show_route_info: bool,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub bearing: f64,
    #[serde(default)]
    pub padding: Padding,
    pub waypoints: Vec<Waypoint>,
}

impl MapSettings {
    pub fn new(uid: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            uid: uid.into(),
            token: String::new(),
            style: MapStyle::default(),
            route_type: None,
            show_route_info: false,
            pitch: 0.0,
            bearing: 0.0,
            padding: Padding::default(),
            waypoints,
        }
    }

    /// Parses and validates the embedded JSON settings object
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: MapSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let count = self.waypoints.len();
        if !(MIN_WAYPOINTS..=MAX_WAYPOINTS).contains(&count) {
            return Err(MapError::InvalidSettings(format!(
                "{} waypoints given, between {} and {} are allowed",
                count, MIN_WAYPOINTS, MAX_WAYPOINTS
            )));
        }
        if let Some((index, waypoint)) = self
            .waypoints
            .iter()
            .enumerate()
            .find(|(_, waypoint)| !waypoint.position().is_valid())
        {
            return Err(MapError::InvalidCoordinates(format!(
                "waypoint {} at ({}, {}) is outside WGS84 ranges",
                index, waypoint.latitude, waypoint.longitude
            )));
        }
        if !(0.0..=90.0).contains(&self.pitch) {
            return Err(MapError::InvalidSettings(format!(
                "pitch {} must be within 0..=90 degrees",
                self.pitch
            )));
        }
        if !(-180.0..=360.0).contains(&self.bearing) {
            return Err(MapError::InvalidSettings(format!(
                "bearing {} must be within -180..=360 degrees",
                self.bearing
            )));
        }
        if !self.padding.is_valid() {
            return Err(MapError::InvalidSettings(
                "padding percentages must be within 0..=100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn route_enabled(&self) -> bool {
        self.route_type.is_some()
    }

    /// Waypoint positions in input order
    pub fn points(&self) -> Vec<LatLng> {
        self.waypoints.iter().map(Waypoint::position).collect()
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        markers(&self.waypoints, self.route_enabled())
    }
}

/// Tuning for the animated part of a fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    /// Duration of the primary ease and of the padding pan
    pub duration: Duration,
}

impl FitOptions {
    pub fn with_duration(duration: Duration) -> Self {
        Self { duration }
    }

    /// Jump straight to the fitted camera
    pub fn instant() -> Self {
        Self::with_duration(Duration::ZERO)
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::with_duration(Duration::from_millis(DEFAULT_FIT_DURATION_MS))
    }
}
