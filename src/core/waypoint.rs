use crate::core::constants::{COORDINATE_PRECISION, END_COLOUR, START_COLOUR};
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// A location the map has to show, as embedded in the page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub pin_label: Option<String>,
    /// Waypoints are only pinned when the settings ask for it
    #[serde(default)]
    pub show_pin: bool,
}

impl Waypoint {
    pub fn new(position: LatLng) -> Self {
        Self {
            longitude: position.lng,
            latitude: position.lat,
            pin_label: None,
            show_pin: true,
        }
    }

    /// Builds a waypoint from a `"latitude, longitude"` string
    pub fn from_gps(gps: &str, pin_label: Option<String>, show_pin: bool) -> Result<Self> {
        let position = parse_gps_coordinate(gps)?;
        Ok(Self {
            pin_label,
            show_pin,
            ..Self::new(position)
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.pin_label = Some(label.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show_pin = false;
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::from_lng_lat(self.longitude, self.latitude)
    }

    /// Label if one was given and is not blank
    pub fn label(&self) -> Option<&str> {
        self.pin_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// Parses `"latitude, longitude"` as typed by an editor, e.g. `"42.597486, 1.429252"`.
///
/// Both values are rounded to six decimal places.
pub fn parse_gps_coordinate(gps: &str) -> Result<LatLng> {
    let mut parts = gps.split(',');
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MapError::InvalidCoordinates(
            "enter latitude followed by longitude, separated by a comma".to_string(),
        ));
    };

    let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) else {
        return Err(MapError::InvalidCoordinates(format!(
            "'{}' is not numeric; use decimal degrees such as 42.603552, 1.442655",
            gps.trim()
        )));
    };

    let position = LatLng::new(round_coordinate(lat), round_coordinate(lng));
    if !position.is_valid() {
        return Err(MapError::InvalidCoordinates(format!(
            "'{}' is out of range; latitude must be within -90..90 and longitude within -180..180",
            gps.trim()
        )));
    }
    Ok(position)
}

fn round_coordinate(value: f64) -> f64 {
    let factor = 10_f64.powi(COORDINATE_PRECISION);
    (value * factor).round() / factor
}

/// Part a waypoint plays on a routed map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointRole {
    Ordinary,
    RouteStart,
    RouteEnd,
}

impl WaypointRole {
    /// Role of the waypoint at `index` out of `count`.
    ///
    /// Only routed maps have start and end points.
    pub fn infer(index: usize, count: usize, routed: bool) -> Self {
        if !routed {
            WaypointRole::Ordinary
        } else if index == 0 {
            WaypointRole::RouteStart
        } else if index + 1 == count {
            WaypointRole::RouteEnd
        } else {
            WaypointRole::Ordinary
        }
    }

    /// Pin colour, `None` for the marker layer's default
    pub fn colour(&self) -> Option<&'static str> {
        match self {
            WaypointRole::Ordinary => None,
            WaypointRole::RouteStart => Some(START_COLOUR),
            WaypointRole::RouteEnd => Some(END_COLOUR),
        }
    }
}

/// Data a marker layer needs to pin one waypoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub role: WaypointRole,
    pub label: Option<String>,
    pub colour: Option<&'static str>,
    pub link: String,
}

impl MarkerSpec {
    pub fn new(waypoint: &Waypoint, role: WaypointRole) -> Self {
        Self {
            position: waypoint.position(),
            role,
            label: waypoint.label().map(str::to_string),
            colour: role.colour(),
            link: format!(
                "https://www.google.com/maps?q={},{}",
                waypoint.latitude, waypoint.longitude
            ),
        }
    }
}

/// Markers for every pinned waypoint, with route roles when `routed`
pub fn markers(waypoints: &[Waypoint], routed: bool) -> Vec<MarkerSpec> {
    waypoints
        .iter()
        .enumerate()
        .filter(|(_, waypoint)| waypoint.show_pin)
        .map(|(index, waypoint)| {
            MarkerSpec::new(waypoint, WaypointRole::infer(index, waypoints.len(), routed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gps_coordinate() {
        let position = parse_gps_coordinate("42.597486, 1.429252").unwrap();
        assert_eq!(position.lat, 42.597486);
        assert_eq!(position.lng, 1.429252);
    }

    #[test]
    fn test_parse_gps_rounds_to_six_places() {
        let position = parse_gps_coordinate(" 42.1234567 ,-1.0000004 ").unwrap();
        assert_eq!(position.lat, 42.123457);
        assert_eq!(position.lng, -1.0);
    }

    #[test]
    fn test_parse_gps_rejects_bad_input() {
        for gps in [
            "42.597486 1.429252",
            "42.5, 1.4, 3.0",
            "42°36'12.8\"N, 1°26'33.6\"E",
            "abc, 1.0",
            "91.0, 1.0",
            "-45.0, 181.0",
            "NaN, 1.0",
        ] {
            assert!(
                matches!(parse_gps_coordinate(gps), Err(MapError::InvalidCoordinates(_))),
                "accepted {}",
                gps
            );
        }
    }

    #[test]
    fn test_roles_only_on_routed_maps() {
        assert_eq!(WaypointRole::infer(0, 3, false), WaypointRole::Ordinary);
        assert_eq!(WaypointRole::infer(0, 3, true), WaypointRole::RouteStart);
        assert_eq!(WaypointRole::infer(1, 3, true), WaypointRole::Ordinary);
        assert_eq!(WaypointRole::infer(2, 3, true), WaypointRole::RouteEnd);
        // a lone waypoint is the start
        assert_eq!(WaypointRole::infer(0, 1, true), WaypointRole::RouteStart);
    }

    #[test]
    fn test_markers_skip_hidden_pins() {
        let waypoints = vec![
            Waypoint::new(LatLng::new(42.1541, 11.77624)).hidden(),
            Waypoint::new(LatLng::new(42.16, 11.9)),
            Waypoint::new(LatLng::new(42.168219, 12.128261)).with_label("b"),
        ];
        let markers = markers(&waypoints, true);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].role, WaypointRole::Ordinary);
        assert_eq!(markers[0].colour, None);
        assert_eq!(markers[1].role, WaypointRole::RouteEnd);
        assert_eq!(markers[1].colour, Some(END_COLOUR));
        assert_eq!(markers[1].label.as_deref(), Some("b"));
        assert_eq!(
            markers[1].link,
            "https://www.google.com/maps?q=42.168219,12.128261"
        );
    }

    #[test]
    fn test_from_gps() {
        let waypoint = Waypoint::from_gps("42.597486, 1.429252", Some("a".into()), true).unwrap();
        assert_eq!(waypoint.latitude, 42.597486);
        assert_eq!(waypoint.longitude, 1.429252);
        assert_eq!(waypoint.label(), Some("a"));
        assert!(waypoint.show_pin);
        assert!(Waypoint::from_gps("1.429252", None, true).is_err());
    }

    #[test]
    fn test_blank_label_is_no_label() {
        let waypoint = Waypoint::new(LatLng::default()).with_label("  ");
        assert_eq!(waypoint.label(), None);
    }
}
