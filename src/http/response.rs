//! Response construction.
//!
//! # Responsibilities
//! - Shape of the JSON error payload
//! - Map gateway errors to status codes
//! - Header values shared by every response (CORS, content type)
//!
//! # Design Decisions
//! - A fresh payload is built for every failed request
//! - The status line and `status_code` always agree

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Content type of every JSON body written by the gateway.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "Accept, Accept-Language, Content-Language, Content-Type";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Headers attached to every response so browsers may call the gateway
/// from any origin.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ),
    ]
}

/// Body of an error response. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
}

fn is_zero(code: &u16) -> bool {
    *code == 0
}

impl From<&GatewayError> for ResponsePayload {
    fn from(err: &GatewayError) -> Self {
        Self {
            error: err.to_string(),
            message: err.message().unwrap_or_default().to_string(),
            status_code: err.status_code().as_u16(),
            data: String::new(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let payload = ResponsePayload::from(&self);
        (
            self.status_code(),
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            Json(payload),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;
    use axum::http::StatusCode;
    use std::time::Duration;

    #[test]
    fn test_payload_omits_empty_fields() {
        let err = GatewayError::BadRequest("EOF while parsing".into());
        let json = serde_json::to_value(ResponsePayload::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "bad request: EOF while parsing",
                "status_code": 500
            })
        );
    }

    #[test]
    fn test_timeout_payload() {
        let err = GatewayError::from(UpstreamError::Timeout(Duration::from_millis(500)));
        let payload = ResponsePayload::from(&err);
        assert_eq!(payload.status_code, 503);
        assert_eq!(payload.message, "typograf service took too long to respond");
        assert!(payload.data.is_empty());
    }

    #[test]
    fn test_into_response_status_and_content_type() {
        let response = GatewayError::BadRequest("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=UTF-8"
        );
    }
}
