use crate::core::geo::{LatLng, Size};
use serde::{Deserialize, Serialize};

/// Camera of a rendering surface.
///
/// Owned by the surface; everything else only proposes new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    /// Degrees clockwise from north
    pub bearing: f64,
    /// Degrees of tilt away from a straight-down view
    pub pitch: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64, bearing: f64, pitch: f64) -> Self {
        Self {
            center,
            zoom,
            bearing,
            pitch,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, 0.0, 0.0)
    }
}

/// Options for asking a surface which camera would frame a box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraOptions {
    pub bearing: f64,
    pub pitch: f64,
    pub padding: AbsolutePadding,
}

/// Per-edge padding as a percentage of the container.
///
/// Top and bottom are percentages of the container height, left and right of
/// its width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same percentage on every edge
    pub fn uniform(percent: f64) -> Self {
        Self::new(percent, percent, percent, percent)
    }

    /// Converts to pixels for a container of the given size.
    ///
    /// The result depends on the container, so it has to be recomputed
    /// whenever the container is resized.
    pub fn to_absolute(&self, container: Size) -> AbsolutePadding {
        AbsolutePadding {
            top: container.height * self.top / 100.0,
            right: container.width * self.right / 100.0,
            bottom: container.height * self.bottom / 100.0,
            left: container.width * self.left / 100.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|p| (0.0..=100.0).contains(p))
    }
}

/// Per-edge padding in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbsolutePadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl AbsolutePadding {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn is_symmetric(&self) -> bool {
        self.left == self.right && self.top == self.bottom
    }

    /// Space left inside `container` once padding is removed; never negative
    pub fn available(&self, container: Size) -> Size {
        Size::new(
            (container.width - self.horizontal()).max(0.0),
            (container.height - self.vertical()).max(0.0),
        )
    }
}
