use crate::core::camera::{AbsolutePadding, CameraOptions, CameraState, Padding};
use crate::core::geo::{LatLngBounds, Point, Size};
use crate::surface::RenderSurface;
use serde::{Deserialize, Serialize};

/// Camera proposed for a box plus the pan that finishes off asymmetric padding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFit {
    pub camera: CameraState,
    /// Pixel pan to run after the camera transition completes
    pub offset: Option<Point>,
}

/// Zoom that scales a pixel `footprint` measured at `current` zoom so it
/// fits into `available`.
///
/// A zero footprint dimension places no constraint on that axis. When
/// neither axis constrains the box, or the space is exhausted, the zoom is
/// left unchanged.
pub fn optimal_zoom(current: f64, footprint: Size, available: Size) -> f64 {
    let scale_x = (footprint.width > 0.0).then(|| available.width / footprint.width);
    let scale_y = (footprint.height > 0.0).then(|| available.height / footprint.height);

    let scale = match (scale_x, scale_y) {
        (Some(x), Some(y)) => x.min(y),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => {
            log::debug!("zero-area footprint, keeping zoom {}", current);
            return current;
        }
    };

    if !scale.is_finite() || scale <= 0.0 {
        log::debug!("no usable space for footprint (scale {}), keeping zoom {}", scale, current);
        return current;
    }
    current + scale.log2()
}

/// Residual pan for asymmetric padding, `None` when padding is symmetric
pub fn padding_offset(padding: &AbsolutePadding) -> Option<Point> {
    if padding.is_symmetric() {
        None
    } else {
        Some(Point::new(
            padding.right - padding.left,
            padding.bottom - padding.top,
        ))
    }
}

/// Computes the camera that frames `bounds` on `surface`.
///
/// The surface is asked for a camera with zero padding; padding is applied by
/// shrinking the available space and by the returned pixel offset.
pub fn fit_camera<S>(
    surface: &S,
    bounds: &LatLngBounds,
    padding: &Padding,
    pitch: f64,
    bearing: f64,
) -> CameraFit
where
    S: RenderSurface + ?Sized,
{
    let container = surface.container_size();
    let absolute = padding.to_absolute(container);

    let options = CameraOptions {
        bearing,
        pitch,
        padding: AbsolutePadding::zero(),
    };
    let current_zoom = surface.zoom();
    let proposed = surface.camera_for_bounds(bounds, &options).unwrap_or_else(|| {
        log::debug!("surface could not frame {:?}, centring at current zoom", bounds);
        CameraState::new(bounds.center(), current_zoom, bearing, pitch)
    });

    let sw = surface.project(&bounds.south_west);
    let ne = surface.project(&bounds.north_east);
    let footprint = Size::new((sw.x - ne.x).abs(), (sw.y - ne.y).abs());

    let zoom = optimal_zoom(current_zoom, footprint, absolute.available(container));

    CameraFit {
        camera: CameraState::new(proposed.center, zoom, bearing, pitch),
        offset: padding_offset(&absolute),
    }
}
