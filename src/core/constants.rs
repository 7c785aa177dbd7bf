//! Engine-wide defaults for fitting waypoint maps.
//! Keeping them in a single place makes it easier to tweak magic numbers.

/// Duration of the primary ease and of the follow-up padding pan.
pub const DEFAULT_FIT_DURATION_MS: u64 = 1000;

/// Width in pixels of the whole world at zoom 0 (vector tile convention).
pub const WORLD_TILE_SIZE: f64 = 512.0;

/// Zoom range accepted by the headless surface.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// Highest pitch the headless surface will tilt to.
pub const MAX_PITCH: f64 = 85.0;

/// Waypoint count limits for one map.
pub const MIN_WAYPOINTS: usize = 1;
pub const MAX_WAYPOINTS: usize = 25;

/// Decimal places kept when parsing a GPS coordinate.
pub const COORDINATE_PRECISION: i32 = 6;

/// Marker and overlay colours.
pub const START_COLOUR: &str = "#02b875";
pub const END_COLOUR: &str = "#d9534f";
pub const ROUTE_COLOUR: &str = "#3887be";

/// Mapbox Directions API base URL; the profile and coordinates are appended.
pub const DIRECTIONS_API_URL: &str = "https://api.mapbox.com/directions/v5/mapbox/";
