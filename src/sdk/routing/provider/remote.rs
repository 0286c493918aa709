use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::overlay::RouteOverlay;
use crate::sdk::routing::service::{RoutingProvider, DRIVING_PROFILE};
use crate::sdk::session::GeoPoint;
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;

pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// Hosted OpenRouteService, authenticated with an API key.
pub struct RemoteOrsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl RemoteOrsProvider {
    pub fn new(api_key: String, limiter: Limiter, timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: ORS_BASE_URL.to_string(),
            limiter,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl RoutingProvider for RemoteOrsProvider {
    fn get_route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteOverlay, RoutingError> {
        if start == end {
            log::debug!("Start and end coordinates are identical. Returning zero route.");
            return Ok(RouteOverlay::stationary(start));
        }

        rate_limit::wait(&self.limiter);
        let (start_lon, start_lat) = start.lon_lat();
        let (end_lon, end_lat) = end.lon_lat();
        log::debug!(
            "[PROVIDER] Calling remote directions for {:?} -> {:?}",
            start,
            end
        );
        let url = format!("{}/v2/directions/{}/geojson", self.base_url, DRIVING_PROFILE);
        let body = json!({ "coordinates": [[start_lon, start_lat], [end_lon, end_lat]] });

        let response = match self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                    url,
                    body,
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!("Directions API returned status {}. Body: {}", status, text);
            return Err(RoutingError::from_response(status.as_u16(), text));
        }

        RouteOverlay::from_geojson_body(&text).map_err(|e| {
            log::error!(
                "Failed to parse directions response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })
    }
}
