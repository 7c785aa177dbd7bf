use crate::core::constants::{END_COLOUR, ROUTE_COLOUR, START_COLOUR};
use crate::core::geo::LatLng;
use crate::routing::Route;
use serde_json::{json, Value};

/// Layer descriptors drawing a route and its endpoints.
///
/// Built once per map after the first successful fetch and re-added whenever
/// the style reloads, since a style change drops custom layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlays {
    layers: Vec<Value>,
}

impl RouteOverlays {
    /// Builds the line layer for `route` plus start and end circles at the
    /// first and last waypoint
    pub fn build(uid: &str, route: &Route, waypoints: &[LatLng]) -> Self {
        let mut layers = vec![route_layer(uid, route)];
        if let (Some(start), Some(end)) = (waypoints.first(), waypoints.last()) {
            layers.push(endpoint_layer("start", uid, start, START_COLOUR));
            layers.push(endpoint_layer("end", uid, end, END_COLOUR));
        }
        Self { layers }
    }

    pub fn layers(&self) -> &[Value] {
        &self.layers
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter_map(|layer| layer["id"].as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn route_layer(uid: &str, route: &Route) -> Value {
    let coordinates: Vec<[f64; 2]> = route.geometry.iter().map(LatLng::to_lng_lat).collect();
    json!({
        "id": format!("route-{}", uid),
        "type": "line",
        "metadata": { "route": true },
        "source": {
            "type": "geojson",
            "data": {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": coordinates }
            }
        },
        "layout": { "line-join": "round", "line-cap": "round" },
        "paint": {
            "line-color": ROUTE_COLOUR,
            "line-width": 5,
            "line-opacity": 0.75
        }
    })
}

fn endpoint_layer(name: &str, uid: &str, position: &LatLng, colour: &str) -> Value {
    json!({
        "id": format!("{}-{}", name, uid),
        "type": "circle",
        "metadata": { "route": true },
        "source": {
            "type": "geojson",
            "data": {
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": position.to_lng_lat() }
                }]
            }
        },
        "paint": { "circle-radius": 10, "circle-color": colour }
    })
}
