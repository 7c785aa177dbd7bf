//! # mapframe
//!
//! Camera fitting for waypoint maps.
//!
//! Given waypoints and optionally a routed path between them, the crate
//! computes a box around them that stays correct when the map is rotated,
//! derives a camera that frames the box inside a padded container, and
//! sequences the camera animation on any [`RenderSurface`].

pub mod animation;
pub mod core;
pub mod events;
pub mod fit;
pub mod prelude;
pub mod routing;
pub mod runtime;
pub mod surface;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{compute_bounds, rotated_bounding_box, RotatedBounds},
    camera::{CameraState, Padding},
    config::{FitOptions, MapSettings, MapStyle, RouteProfile},
    geo::{LatLng, LatLngBounds, Point, Size},
    map::WaypointMap,
    viewport::Viewport,
    waypoint::Waypoint,
};

pub use events::{EventManager, MapEvent};

pub use fit::{fit_camera, CameraFit, FitOrchestrator, FitRequest, FitState};

pub use routing::{DirectionsClient, Route, RouteProvider, RouteRequest, StaticRouteProvider};

pub use surface::{HeadlessSurface, RenderSurface, TransitionId};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Route fetch failed: {0}")]
    RouteFetch(String),

    #[error("Invalid fit transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Cannot compute bounds of an empty point set")]
    EmptyPointSet,
}

/// Error type alias for convenience
pub type Error = MapError;
