use crate::sdk::routing::{RouteOverlay, RoutingError, RoutingProvider};
use crate::sdk::session::{GeoPoint, SessionState};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;
use std::fmt;
use std::path::Path;

/// Times Square.
pub const NYC_CENTER: GeoPoint = GeoPoint::new(40.7589, -73.9851);
pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

pub const OPENSTREETMAP: TileLayer = TileLayer {
    name: "OpenStreetMap",
    url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "&copy; OpenStreetMap contributors",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Pickup,
    Dropoff,
}

impl MarkerKind {
    pub fn color(self) -> &'static str {
        match self {
            MarkerKind::Pickup => "green",
            MarkerKind::Dropoff => "red",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Pickup => "Pickup",
            MarkerKind::Dropoff => "Dropoff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub point: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
}

pub const ROUTE_STYLE: RouteStyle = RouteStyle {
    color: "blue",
    weight: 4,
    opacity: 0.8,
};

/// Everything needed to draw the map for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub markers: Vec<Marker>,
    pub route: Option<RouteOverlay>,
}

impl MapView {
    /// Builds the view for `state`. `route` is ignored unless both points are set.
    pub fn from_state(state: &SessionState, route: Option<RouteOverlay>) -> Self {
        let mut markers = Vec::with_capacity(2);
        if let Some(point) = state.pickup() {
            markers.push(Marker {
                kind: MarkerKind::Pickup,
                point,
            });
        }
        if let Some(point) = state.dropoff() {
            markers.push(Marker {
                kind: MarkerKind::Dropoff,
                point,
            });
        }

        Self {
            center: NYC_CENTER,
            zoom: DEFAULT_ZOOM,
            tiles: OPENSTREETMAP,
            markers,
            route: route.filter(|_| state.endpoints().is_some()),
        }
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind == kind)
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut features: Vec<Feature> = self.markers.iter().map(marker_to_feature).collect();
        if let Some(route) = &self.route {
            features.push(route_to_feature(route));
        }

        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "center".to_string(),
            json!([self.center.longitude, self.center.latitude]),
        );
        foreign_members.insert("zoom".to_string(), json!(self.zoom));
        foreign_members.insert("tiles".to_string(), json!(self.tiles.url_template));
        foreign_members.insert("attribution".to_string(), json!(self.tiles.attribution));

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    /// Writes the view as a GeoJSON FeatureCollection.
    pub fn write_geojson(&self, output_path: &Path) -> std::io::Result<()> {
        log::info!("Writing map view to {}", output_path.display());
        let geojson = GeoJson::from(self.to_feature_collection());
        let json_string = serde_json::to_string_pretty(&geojson)?;
        std::fs::write(output_path, json_string)
    }
}

fn marker_to_feature(marker: &Marker) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("marker".to_string(), json!(marker.kind.label().to_lowercase()));
    properties.insert("color".to_string(), json!(marker.kind.color()));
    properties.insert(
        "tooltip".to_string(),
        json!(format!("{} Location", marker.kind.label())),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            marker.point.longitude,
            marker.point.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn route_to_feature(route: &RouteOverlay) -> Feature {
    let line: Vec<Vec<f64>> = route.path.iter().map(|&(lon, lat)| vec![lon, lat]).collect();

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), json!("Driving Route"));
    properties.insert("color".to_string(), json!(ROUTE_STYLE.color));
    properties.insert("weight".to_string(), json!(ROUTE_STYLE.weight));
    properties.insert("opacity".to_string(), json!(ROUTE_STYLE.opacity));
    if let Some(summary) = route.summary {
        properties.insert("distance_km".to_string(), json!(summary.distance_km));
        properties.insert("duration_hours".to_string(), json!(summary.duration_hours));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl fmt::Display for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Map: {} tiles, centre ({:.4}, {:.4}), zoom {}",
            self.tiles.name, self.center.latitude, self.center.longitude, self.zoom
        )?;
        for marker in &self.markers {
            writeln!(
                f,
                "  [{}] {} marker at ({:.6}, {:.6})",
                marker.kind.color(),
                marker.kind.label(),
                marker.point.latitude,
                marker.point.longitude
            )?;
        }
        match &self.route {
            Some(route) => match route.summary {
                Some(summary) => write!(
                    f,
                    "  [{}] Driving route: {} points, {:.1} km, {:.0} min",
                    ROUTE_STYLE.color,
                    route.path.len(),
                    summary.distance_km,
                    summary.duration_hours * 60.0
                ),
                None => write!(
                    f,
                    "  [{}] Driving route: {} points",
                    ROUTE_STYLE.color,
                    route.path.len()
                ),
            },
            None => write!(f, "  (no route)"),
        }
    }
}

/// A rendered view plus the routing failure, if the overlay could not be drawn.
#[derive(Debug)]
pub struct RenderedMap {
    pub view: MapView,
    pub route_error: Option<RoutingError>,
}

/// Renders `state`, asking `routing` for an overlay only when both points are set.
pub fn render_map(state: &SessionState, routing: Option<&dyn RoutingProvider>) -> RenderedMap {
    let (route, route_error) = match (state.endpoints(), routing) {
        (Some((pickup, dropoff)), Some(provider)) => match provider.get_route(pickup, dropoff) {
            Ok(route) => (Some(route), None),
            Err(e) => {
                log::warn!("Route drawing failed: {}", e);
                (None, Some(e))
            }
        },
        _ => (None, None),
    };

    RenderedMap {
        view: MapView::from_state(state, route),
        route_error,
    }
}
