//! Bounding boxes for waypoint sets, axis-aligned or aligned with a rotated map.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::core::geometry::{centroid, rotate_point, to_radians};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned box of a point set in a single min/max pass.
///
/// Returns `None` when `points` is empty. Coincident points give a zero-area box.
pub fn bounding_box(points: &[LatLng]) -> Option<LatLngBounds> {
    let (first, rest) = points.split_first()?;
    let mut bounds = LatLngBounds::from_point(*first);
    for point in rest {
        bounds.extend(point);
    }
    Some(bounds)
}

/// A box aligned with a map rotated by `bearing` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedBounds {
    /// Map bearing the box was built for, in degrees
    pub bearing: f64,
    /// Mean of the input points; the pivot of the rotated frame
    pub centroid: LatLng,
    /// Axis-aligned box in the rotated frame, relative to `centroid`
    pub frame: LatLngBounds,
    /// Corners of `frame` brought back to geographic coordinates, in
    /// south-west, south-east, north-east, north-west order of the frame
    pub corners: [LatLng; 4],
}

impl RotatedBounds {
    /// Axis-aligned geographic box enclosing the four back-rotated corners
    pub fn envelope(&self) -> LatLngBounds {
        let mut bounds = LatLngBounds::from_point(self.corners[0]);
        for corner in &self.corners[1..] {
            bounds.extend(corner);
        }
        bounds
    }
}

/// Builds the bearing-aligned box of `points`.
///
/// Points are rotated about their centroid by `-bearing` into the map's frame
/// and boxed there. The frame corners are then rotated by `+bearing` about the
/// origin, which they are already relative to, and only afterwards translated
/// by the centroid. The order of those last two steps matters.
pub fn rotated_bounding_box(points: &[LatLng], bearing: f64) -> Option<RotatedBounds> {
    let pivot = centroid(points)?;
    let angle = to_radians(bearing);

    let rotated: Vec<LatLng> = points
        .iter()
        .map(|point| rotate_point(*point, -angle, pivot))
        .collect();
    let frame = bounding_box(&rotated)?;

    let origin = LatLng::default();
    let corners = frame.corners().map(|corner| {
        let back = rotate_point(corner, angle, origin);
        LatLng::from_lng_lat(back.lng + pivot.lng, back.lat + pivot.lat)
    });

    Some(RotatedBounds {
        bearing,
        centroid: pivot,
        frame,
        corners,
    })
}

/// Box to fit the camera to for a map shown at `bearing` degrees.
///
/// With no rotation this is the plain axis-aligned box. Otherwise it is the
/// envelope of the bearing-aligned box, so that the region stays framed once
/// the map is rotated.
pub fn compute_bounds(points: &[LatLng], bearing: f64) -> Result<LatLngBounds> {
    let bounds = if bearing == 0.0 {
        bounding_box(points)
    } else {
        rotated_bounding_box(points, bearing).map(|rotated| rotated.envelope())
    };
    bounds.ok_or(MapError::EmptyPointSet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn lng_lat(lng: f64, lat: f64) -> LatLng {
        LatLng::from_lng_lat(lng, lat)
    }

    fn approx_eq(a: LatLng, b: LatLng) -> bool {
        (a.lng - b.lng).abs() < EPSILON && (a.lat - b.lat).abs() < EPSILON
    }

    fn contains_approx(bounds: &LatLngBounds, point: &LatLng) -> bool {
        point.lng >= bounds.south_west.lng - EPSILON
            && point.lng <= bounds.north_east.lng + EPSILON
            && point.lat >= bounds.south_west.lat - EPSILON
            && point.lat <= bounds.north_east.lat + EPSILON
    }

    fn sample_sets() -> Vec<Vec<LatLng>> {
        vec![
            vec![lng_lat(11.77624, 42.1541), lng_lat(12.128261, 42.168219)],
            vec![
                lng_lat(1.429252, 42.597486),
                lng_lat(1.442655, 42.603552),
                lng_lat(1.451, 42.59),
                lng_lat(1.43, 42.61),
            ],
            vec![lng_lat(-3.5, 51.2), lng_lat(-3.1, 50.9), lng_lat(-2.8, 51.4)],
            vec![lng_lat(0.0, 0.0)],
        ]
    }

    #[test]
    fn test_two_point_box() {
        let bounds = compute_bounds(&[lng_lat(0.0, 0.0), lng_lat(1.0, 1.0)], 0.0).unwrap();
        assert_eq!(bounds.south_west, lng_lat(0.0, 0.0));
        assert_eq!(bounds.north_east, lng_lat(1.0, 1.0));
    }

    #[test]
    fn test_axis_aligned_box_is_minimal() {
        for points in sample_sets() {
            let bounds = bounding_box(&points).unwrap();
            assert!(points.iter().all(|p| bounds.contains(p)));
            assert!(points.iter().any(|p| p.lng == bounds.south_west.lng));
            assert!(points.iter().any(|p| p.lng == bounds.north_east.lng));
            assert!(points.iter().any(|p| p.lat == bounds.south_west.lat));
            assert!(points.iter().any(|p| p.lat == bounds.north_east.lat));
        }
    }

    #[test]
    fn test_single_point_box_is_degenerate() {
        let point = lng_lat(11.77624, 42.1541);
        let bounds = compute_bounds(&[point], 0.0).unwrap();
        assert_eq!(bounds.south_west, point);
        assert_eq!(bounds.north_east, point);
        assert!(bounds.is_degenerate());

        let rotated = compute_bounds(&[point], 120.0).unwrap();
        assert!(approx_eq(rotated.south_west, point));
        assert!(approx_eq(rotated.north_east, point));
    }

    #[test]
    fn test_empty_point_set_is_an_error() {
        assert!(matches!(compute_bounds(&[], 0.0), Err(MapError::EmptyPointSet)));
        assert!(matches!(compute_bounds(&[], 45.0), Err(MapError::EmptyPointSet)));
    }

    #[test]
    fn test_quarter_turn_reproduces_enclosing_rectangle() {
        let points = [lng_lat(0.0, 0.0), lng_lat(2.0, 0.0), lng_lat(1.0, 1.0)];
        let rotated = rotated_bounding_box(&points, 90.0).unwrap();

        let expected = [
            lng_lat(0.0, 0.0),
            lng_lat(2.0, 0.0),
            lng_lat(2.0, 1.0),
            lng_lat(0.0, 1.0),
        ];
        for corner in rotated.corners {
            assert!(
                expected.iter().any(|e| approx_eq(*e, corner)),
                "unexpected corner {:?}",
                corner
            );
        }

        let bounds = compute_bounds(&points, 90.0).unwrap();
        assert!(approx_eq(bounds.south_west, lng_lat(0.0, 0.0)));
        assert!(approx_eq(bounds.north_east, lng_lat(2.0, 1.0)));
    }

    #[test]
    fn test_rotated_corners_round_trip_into_frame() {
        for points in sample_sets() {
            for bearing in [15.0, 45.0, 90.0, 120.0, -60.0, 200.0, 359.0] {
                let rotated = rotated_bounding_box(&points, bearing).unwrap();
                let angle = to_radians(bearing);
                let frame_corners = rotated.frame.corners();

                for (corner, frame_corner) in rotated.corners.iter().zip(frame_corners.iter()) {
                    let back = rotate_point(*corner, -angle, rotated.centroid);
                    assert!(
                        approx_eq(back, *frame_corner),
                        "bearing {}: {:?} != {:?}",
                        bearing,
                        back,
                        frame_corner
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotated_box_encloses_every_point() {
        for points in sample_sets() {
            for bearing in [30.0, 90.0, 135.0, -170.0] {
                let rotated = rotated_bounding_box(&points, bearing).unwrap();
                let angle = to_radians(bearing);
                for point in &points {
                    let in_frame = rotate_point(*point, -angle, rotated.centroid);
                    assert!(contains_approx(&rotated.frame, &in_frame));
                }

                let envelope = compute_bounds(&points, bearing).unwrap();
                assert!(points.iter().all(|p| contains_approx(&envelope, p)));
            }
        }
    }

    #[test]
    fn test_envelope_at_full_turn_matches_axis_aligned() {
        let points = &sample_sets()[1];
        let plain = compute_bounds(points, 0.0).unwrap();
        let full_turn = compute_bounds(points, 360.0).unwrap();
        assert!(approx_eq(plain.south_west, full_turn.south_west));
        assert!(approx_eq(plain.north_east, full_turn.north_east));
    }
}
