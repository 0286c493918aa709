pub mod sdk;

pub use sdk::app::{FareApp, Frame, Notice};
pub use sdk::command::Command;
pub use sdk::config::{AppConfig, OrsConfig};
pub use sdk::fare::{FareEstimate, FareError, FarePredictor, FareRequest, FareServiceClient};
pub use sdk::map::MapView;
pub use sdk::routing::{RouteOverlay, RoutingError, RoutingProvider};
pub use sdk::session::{GeoPoint, SelectionMode, SelectionPhase, SessionState};
pub use sdk::trip::{PassengerCount, TripDetails};
