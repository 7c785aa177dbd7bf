//! The rendering surface a fit drives.
//!
//! Any map backend that can project coordinates, propose a camera for a box
//! and run camera transitions can be fitted; nothing here depends on a
//! particular renderer.

pub mod headless;

pub use crate::animation::transition::TransitionId;
pub use headless::HeadlessSurface;

use crate::core::camera::{CameraOptions, CameraState};
use crate::core::geo::{LatLng, LatLngBounds, Point, Size};
use std::time::Duration;

/// Camera capabilities of a map renderer.
///
/// Surfaces must only be driven once their style has loaded. Transitions
/// report completion through a move-end event carrying the returned
/// [`TransitionId`].
pub trait RenderSurface {
    /// Container pixel position of a coordinate under the live camera
    fn project(&self, lat_lng: &LatLng) -> Point;

    /// Camera that would frame `bounds`, or `None` if it cannot be framed
    fn camera_for_bounds(&self, bounds: &LatLngBounds, options: &CameraOptions) -> Option<CameraState>;

    /// Starts an animated move to `camera`
    fn ease_to(&mut self, camera: CameraState, duration: Duration) -> TransitionId;

    /// Starts an animated pan of the view by `offset` pixels
    fn pan_by(&mut self, offset: Point, duration: Duration) -> TransitionId;

    /// Cancels the running transition, if any. Calling it while idle is a no-op.
    fn stop(&mut self);

    fn zoom(&self) -> f64;

    fn container_size(&self) -> Size;

    /// The live camera
    fn camera(&self) -> CameraState;
}
