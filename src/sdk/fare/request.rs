use crate::sdk::session::SessionState;
use crate::sdk::trip::TripDetails;
use serde::Serialize;

/// Query parameters sent to the fare prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareRequest {
    pub pickup_datetime: String,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub passenger_count: u8,
}

impl FareRequest {
    /// `None` until both pickup and dropoff are selected.
    pub fn build(state: &SessionState, trip: &TripDetails) -> Option<Self> {
        let (pickup, dropoff) = state.endpoints()?;
        Some(Self {
            pickup_datetime: trip.pickup_datetime_string(),
            pickup_longitude: pickup.longitude,
            pickup_latitude: pickup.latitude,
            dropoff_longitude: dropoff.longitude,
            dropoff_latitude: dropoff.latitude,
            passenger_count: trip.passengers.get(),
        })
    }
}
