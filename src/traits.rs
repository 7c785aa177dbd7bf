//! Shared trait abstractions

use crate::core::{
    camera::CameraState,
    geo::{LatLng, Point},
};

/// Linear interpolation towards `other` by `t` in `[0, 1]`
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}

impl Lerp for CameraState {
    /// Bearing takes the shorter way round the compass
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut delta = (other.bearing - self.bearing) % 360.0;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        CameraState {
            center: self.center.lerp(&other.center, t),
            zoom: self.zoom.lerp(&other.zoom, t),
            bearing: self.bearing + delta * t,
            pitch: self.pitch.lerp(&other.pitch, t),
        }
    }
}
