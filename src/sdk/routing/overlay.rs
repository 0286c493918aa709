use super::error::RoutingError;
use super::provider::types::DirectionsGeoJson;
use crate::sdk::session::GeoPoint;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_hours: f64,
}

/// A drivable path between pickup and dropoff, ready to be drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    /// Path vertices in (longitude, latitude) order.
    pub path: Vec<(f64, f64)>,
    pub summary: Option<RouteSummary>,
}

impl RouteOverlay {
    /// Overlay for a trip that starts where it ends.
    pub fn stationary(point: GeoPoint) -> Self {
        Self {
            path: vec![point.lon_lat()],
            summary: Some(RouteSummary {
                distance_km: 0.0,
                duration_hours: 0.0,
            }),
        }
    }

    /// Parses the body of an ORS `directions/{profile}/geojson` response.
    pub fn from_geojson_body(text: &str) -> Result<Self, RoutingError> {
        let response: DirectionsGeoJson = serde_json::from_str(text)?;
        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or(RoutingError::EmptyRoute)?;

        if feature.geometry.coordinates.is_empty() {
            return Err(RoutingError::EmptyRoute);
        }

        let summary = feature.properties.summary.map(|s| RouteSummary {
            distance_km: s.distance / 1000.0,
            duration_hours: s.duration / 3600.0,
        });

        Ok(Self {
            path: feature
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| (lon, lat))
                .collect(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "summary": {"distance": 9876.5, "duration": 1800.0},
                "way_points": [0, 2]
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-74.0, 40.7], [-73.95, 40.73], [-73.9, 40.75]]
            }
        }]
    }"#;

    #[test]
    fn parses_path_and_summary() {
        let overlay = RouteOverlay::from_geojson_body(BODY).unwrap();
        assert_eq!(overlay.path.len(), 3);
        assert_eq!(overlay.path[0], (-74.0, 40.7));
        let summary = overlay.summary.unwrap();
        assert!((summary.distance_km - 9.8765).abs() < 1e-9);
        assert!((summary.duration_hours - 0.5).abs() < 1e-9);
    }

    #[test]
    fn missing_summary_is_tolerated() {
        let body = r#"{"features":[{"geometry":{"coordinates":[[-74.0,40.7],[-73.9,40.75]]}}]}"#;
        let overlay = RouteOverlay::from_geojson_body(body).unwrap();
        assert!(overlay.summary.is_none());
        assert_eq!(overlay.path.len(), 2);
    }

    #[test]
    fn no_features_is_an_error() {
        let err = RouteOverlay::from_geojson_body(r#"{"features":[]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::EmptyRoute));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = RouteOverlay::from_geojson_body("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, RoutingError::ParseError(_)));
    }
}
