use super::error::FareError;
use super::request::FareRequest;
use reqwest::blocking::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_FARE_URL: &str = "https://taxifare.lewagon.ai/predict";

/// A fare returned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareEstimate {
    pub fare: f64,
}

impl FareEstimate {
    /// The fare rounded to cents.
    pub fn rounded(&self) -> f64 {
        (self.fare * 100.0).round() / 100.0
    }
}

impl fmt::Display for FareEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.rounded())
    }
}

pub trait FarePredictor {
    fn predict(&self, request: &FareRequest) -> Result<FareEstimate, FareError>;
}

/// Blocking HTTP client for the `GET /predict` endpoint.
pub struct FareServiceClient {
    client: Client,
    url: String,
}

impl FareServiceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FareError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FarePredictor for FareServiceClient {
    fn predict(&self, request: &FareRequest) -> Result<FareEstimate, FareError> {
        log::debug!("Requesting fare from {} with {:?}", self.url, request);

        let response = self
            .client
            .get(&self.url)
            .query(request)
            .send()
            .map_err(|e| {
                log::error!("Fare request to {} failed: {}", self.url, e);
                FareError::from_transport(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(FareError::from_transport)?;
        interpret_response(status, &body)
    }
}

/// Maps a raw `(status, body)` pair from the fare service to an outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<FareEstimate, FareError> {
    if status != 200 {
        log::warn!("Fare API returned status {}: {}", status, body);
        return Err(FareError::Status {
            status,
            body: body.to_string(),
        });
    }

    let payload: Value =
        serde_json::from_str(body).map_err(|e| FareError::Malformed(e.to_string()))?;
    let object = payload
        .as_object()
        .ok_or_else(|| FareError::Malformed(format!("expected a JSON object, got {}", payload)))?;

    match object.get("fare") {
        None => Err(FareError::NoPrediction),
        Some(fare) if is_falsy(fare) => Err(FareError::NoPrediction),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|fare| FareEstimate { fare })
            .ok_or_else(|| FareError::Malformed(format!("fare {} is not a float", n))),
        Some(other) => Err(FareError::Malformed(format!("fare is not a number: {}", other))),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
