use serde::Deserialize;
use thiserror::Error;

// Shape of the JSON error body returned by OpenRouteService
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u32, message: String },

    // Non-success status whose body isn't the structured ORS error
    #[error("Unstructured API Error (status {status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("No route found in success response")]
    EmptyRoute,
}

impl RoutingError {
    /// Decodes a non-success ORS response body.
    pub fn from_response(status: u16, body: String) -> Self {
        match serde_json::from_str::<OrsErrorPayload>(&body) {
            // 2010: "Could not find routable point within a radius ..."
            Ok(payload) if payload.error.code == 2010 => RoutingError::UnroutablePoint,
            Ok(payload) => RoutingError::ApiError {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => RoutingError::RawApiError { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_is_decoded() {
        let body = r#"{"error":{"code":2004,"message":"Request parameters exceed the server configuration limits."}}"#;
        match RoutingError::from_response(400, body.to_string()) {
            RoutingError::ApiError { code, message } => {
                assert_eq!(code, 2004);
                assert!(message.starts_with("Request parameters"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unroutable_code_has_its_own_variant() {
        let body = r#"{"error":{"code":2010,"message":"Could not find routable point within a radius of 350.0 meters"}}"#;
        assert!(matches!(
            RoutingError::from_response(404, body.to_string()),
            RoutingError::UnroutablePoint
        ));
    }

    #[test]
    fn unstructured_body_is_kept_raw() {
        let err = RoutingError::from_response(403, "Access to this API has been disallowed".into());
        assert_eq!(
            err.to_string(),
            "Unstructured API Error (status 403): Access to this API has been disallowed"
        );
    }
}
