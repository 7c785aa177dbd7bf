//! Prelude module for common mapframe types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapframe::prelude::*;`

pub use crate::core::{
    bounds::{bounding_box, compute_bounds, rotated_bounding_box, RotatedBounds},
    camera::{AbsolutePadding, CameraOptions, CameraState, Padding},
    config::{FitOptions, MapSettings, MapStyle, RouteProfile},
    geo::{LatLng, LatLngBounds, Point, Size},
    geometry::{centroid, rotate_point, to_radians},
    map::WaypointMap,
    viewport::Viewport,
    waypoint::{parse_gps_coordinate, MarkerSpec, Waypoint, WaypointRole},
};

pub use crate::animation::{CameraTransition, EasingType, TransitionKind};

pub use crate::events::{EventManager, MapEvent};

pub use crate::fit::{
    fit_camera, optimal_zoom, padding_offset, CameraFit, FitOrchestrator, FitRequest, FitState,
};

pub use crate::routing::{
    DirectionsClient, Route, RouteOverlays, RouteProvider, RouteRequest, StaticRouteProvider,
};

pub use crate::surface::{HeadlessSurface, RenderSurface, TransitionId};

pub use crate::traits::Lerp;

pub use crate::{MapError, Result};

pub use futures::Future;
pub use std::time::Duration;
