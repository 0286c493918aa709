use serde::Deserialize;

// --- Data Structures for parsing ORS `/geojson` directions responses ---

#[derive(Deserialize)]
pub struct DirectionsGeoJson {
    pub features: Vec<RouteFeature>,
}
#[derive(Deserialize)]
pub struct RouteFeature {
    pub geometry: LineGeometry,
    #[serde(default)]
    pub properties: RouteProperties,
}
#[derive(Deserialize)]
pub struct LineGeometry {
    pub coordinates: Vec<[f64; 2]>,
}
#[derive(Deserialize, Default)]
pub struct RouteProperties {
    pub summary: Option<DirectionsSummary>,
}
// ORS omits both fields for zero-length routes
#[derive(Deserialize, Clone, Copy, Default)]
pub struct DirectionsSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}
