pub mod error;
pub mod overlay;
pub mod provider;
pub mod service;

pub use error::RoutingError;
pub use overlay::{RouteOverlay, RouteSummary};
pub use provider::{LocalOrsProvider, RemoteOrsProvider};
pub use service::RoutingProvider;
