use super::error::RoutingError;
use super::overlay::RouteOverlay;
use crate::sdk::session::GeoPoint;

/// Travel profile requested from the routing service.
pub const DRIVING_PROFILE: &str = "driving-car";

pub trait RoutingProvider {
    /// Gets a drivable path between two points.
    fn get_route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteOverlay, RoutingError>;
}
