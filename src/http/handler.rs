//! Request handlers for the gateway endpoint.
//!
//! # Request Flow
//! ```text
//! Decoding          JSON object of strings, `data` required
//! Escaping/Encoding ProcessText envelope
//! AwaitingUpstream  single bounded call
//! DecodingResponse  ProcessTextResult
//! Responding        inbound fields with `data` replaced
//! ```
//! A failure at any step is logged with its kind and answered with the JSON
//! error payload; nothing escapes the handler.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::BTreeMap;
use tokio::time::timeout;

use crate::error::GatewayError;
use crate::http::response::JSON_CONTENT_TYPE;
use crate::http::server::AppState;
use crate::pipeline::{typogrify, TextRequest};

/// Inbound and outbound document: a flat map of strings.
type Fields = BTreeMap<String, String>;

/// `POST /`: typogrify the `data` field.
pub async fn process_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match handle(&state, body).await {
        Ok(fields) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            Json(fields),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                kind = err.kind().as_str(),
                error = %err,
                "Request failed"
            );
            err.into_response()
        }
    }
}

/// `OPTIONS /`: CORS preflight, answered by the header layers alone.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))])
}

async fn handle(state: &AppState, body: Body) -> Result<Fields, GatewayError> {
    let bytes = timeout(state.body_timeout, axum::body::to_bytes(body, state.max_body_size))
        .await
        .map_err(|_| {
            GatewayError::BadRequest(format!(
                "body not received within {}s",
                state.body_timeout.as_secs()
            ))
        })?
        .map_err(|e| GatewayError::BadRequest(format!("cannot read body: {}", e)))?;

    let mut fields: Fields = serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    let raw_text = fields
        .remove("data")
        .ok_or_else(|| GatewayError::BadRequest("missing field `data`".to_string()))?;
    let request = TextRequest::new(raw_text, fields.get("encoding").map(String::as_str));

    let processed = typogrify(&state.client, &request).await?;

    fields.insert("encoding".to_string(), request.encoding);
    fields.insert("data".to_string(), processed);
    Ok(fields)
}
