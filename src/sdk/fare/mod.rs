pub mod client;
pub mod error;
pub mod request;

pub use client::{interpret_response, FareEstimate, FarePredictor, FareServiceClient};
pub use error::FareError;
pub use request::FareRequest;
