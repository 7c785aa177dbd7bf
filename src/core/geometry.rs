//! Planar helpers over `(lng, lat)` pairs.
//!
//! Coordinates are treated as flat Cartesian values. This is only accurate for
//! waypoint spreads small enough that the curvature of the earth does not
//! matter for framing a camera, and it degrades towards the poles.

use crate::core::geo::LatLng;

/// Converts degrees to radians. No range checks are made.
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Rotates `point` about `origin` by `angle` radians.
///
/// The result is expressed relative to `origin`: it is *not* translated back.
/// Callers that need absolute coordinates add the origin themselves.
pub fn rotate_point(point: LatLng, angle: f64, origin: LatLng) -> LatLng {
    let (sin, cos) = angle.sin_cos();
    let dx = point.lng - origin.lng;
    let dy = point.lat - origin.lat;
    LatLng::from_lng_lat(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Arithmetic mean of the coordinates. `None` for an empty slice.
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let (sum_lng, sum_lat) = points
        .iter()
        .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng, lat + p.lat));
    let n = points.len() as f64;
    Some(LatLng::from_lng_lat(sum_lng / n, sum_lat / n))
}
