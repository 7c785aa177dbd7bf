use crate::core::camera::{AbsolutePadding, CameraOptions, CameraState};
use crate::core::constants::{MAX_PITCH, MAX_ZOOM, MIN_ZOOM, WORLD_TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point, Size};
use crate::core::geometry::to_radians;
use serde::{Deserialize, Serialize};

/// The current view of a map: camera plus container size.
///
/// Projection is Web Mercator with the world `WORLD_TILE_SIZE` pixels wide at
/// zoom 0. Bearing rotates the view about the container center. Pitch is
/// recorded but the projection stays orthographic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// Degrees clockwise from north
    pub bearing: f64,
    /// Degrees away from a straight-down view
    pub pitch: f64,
    /// The size of the container in pixels
    pub size: Size,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport looking north, straight down
    pub fn new(center: LatLng, zoom: f64, size: Size) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            bearing: 0.0,
            pitch: 0.0,
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn camera(&self) -> CameraState {
        CameraState::new(self.center, self.zoom, self.bearing, self.pitch)
    }

    /// Applies a camera, clamping zoom and pitch and normalising the bearing
    pub fn set_camera(&mut self, camera: CameraState) {
        self.center = LatLng::new(LatLng::clamp_lat(camera.center.lat), camera.center.lng);
        self.zoom = camera.zoom.clamp(self.min_zoom, self.max_zoom);
        self.bearing = camera.bearing.rem_euclid(360.0);
        self.pitch = camera.pitch.clamp(0.0, MAX_PITCH);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Width of the world in pixels at `zoom`
    pub fn world_size(zoom: f64) -> f64 {
        WORLD_TILE_SIZE * 2_f64.powf(zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        lat_lng.to_mercator_unit().multiply(Self::world_size(z))
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        LatLng::from_mercator_unit(pixel.multiply(1.0 / Self::world_size(z)))
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let offset = self
            .project(lat_lng, None)
            .subtract(&self.project(&self.center, None));
        offset
            .rotate(-to_radians(self.bearing))
            .add(&self.size.center())
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let offset = pixel
            .subtract(&self.size.center())
            .rotate(to_radians(self.bearing));
        self.unproject(&self.project(&self.center, None).add(&offset), None)
    }

    /// Center the camera would have after panning the view by `offset` pixels
    pub fn pan_target(&self, offset: Point) -> LatLng {
        self.pixel_to_lat_lng(&self.size.center().add(&offset))
    }

    /// Camera that frames `bounds` inside the padded container at the given
    /// bearing and pitch.
    ///
    /// Returns `None` when padding leaves no room. A box with zero extent on
    /// one axis is fitted on the other axis alone; a single point gets the
    /// maximum zoom.
    pub fn camera_for_bounds(&self, bounds: &LatLngBounds, options: &CameraOptions) -> Option<CameraState> {
        let padding: AbsolutePadding = options.padding;
        let available = padding.available(self.size);
        if available.width <= 0.0 || available.height <= 0.0 {
            return None;
        }

        let angle = to_radians(options.bearing);
        let rotated: Vec<Point> = bounds
            .corners()
            .iter()
            .map(|corner| self.project(corner, Some(0.0)).rotate(-angle))
            .collect();
        let (min, max) = rotated.iter().fold(
            (Point::new(f64::INFINITY, f64::INFINITY), Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY)),
            |(min, max), p| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        let extent = max.subtract(&min);

        let scale_x = (extent.x > 0.0).then(|| available.width / extent.x);
        let scale_y = (extent.y > 0.0).then(|| available.height / extent.y);
        let zoom = match (scale_x, scale_y) {
            (Some(x), Some(y)) => x.min(y).log2(),
            (Some(s), None) | (None, Some(s)) => s.log2(),
            (None, None) => self.max_zoom,
        }
        .clamp(self.min_zoom, self.max_zoom);

        // shift so the box sits in the middle of the padded area
        let padding_shift = Point::new(
            (padding.left - padding.right) / 2.0,
            (padding.top - padding.bottom) / 2.0,
        )
        .multiply(1.0 / 2_f64.powf(zoom));
        let center_rotated = min.add(&max).multiply(0.5).subtract(&padding_shift);
        let center = self.unproject(&center_rotated.rotate(angle), Some(0.0));

        Some(CameraState::new(center, zoom, options.bearing, options.pitch))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Size::new(800.0, 600.0))
    }
}
