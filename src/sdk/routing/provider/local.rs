use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::overlay::RouteOverlay;
use crate::sdk::routing::service::{RoutingProvider, DRIVING_PROFILE};
use crate::sdk::session::GeoPoint;
use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;

/// Self-hosted OpenRouteService instance: no key, no quota.
pub struct LocalOrsProvider {
    client: Client,
    base_url: String,
}

impl LocalOrsProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RoutingProvider for LocalOrsProvider {
    fn get_route(&self, start: GeoPoint, end: GeoPoint) -> Result<RouteOverlay, RoutingError> {
        if start == end {
            return Ok(RouteOverlay::stationary(start));
        }

        log::debug!(
            "[PROVIDER] Calling local directions for {:?} -> {:?}",
            start,
            end
        );
        let (start_lon, start_lat) = start.lon_lat();
        let (end_lon, end_lat) = end.lon_lat();
        let url = format!("{}/v2/directions/{}/geojson", self.base_url, DRIVING_PROFILE);
        let body = json!({ "coordinates": [[start_lon, start_lat], [end_lon, end_lat]] });

        let response = match self.client.post(&url).json(&body).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request to local ORS. URL: {}\nError: {}",
                    url,
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!("Local ORS returned status {}. Body: {}", status, text);
            return Err(RoutingError::from_response(status.as_u16(), text));
        }

        RouteOverlay::from_geojson_body(&text).map_err(|e| {
            log::error!(
                "Failed to parse local directions response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })
    }
}
