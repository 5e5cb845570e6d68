//! Bounded client for the typograf webservice.
//!
//! # Responsibilities
//! - POST one SOAP envelope to the configured endpoint
//! - Enforce a single deadline over connect, send and body receive
//! - Classify failures as timeout or transport errors
//!
//! # Design Decisions
//! - Exactly one attempt: the upstream is undocumented, and retrying would
//!   hide its instability from callers
//! - Non-2xx replies are transport failures; their bodies are not decoded

use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::timeout;

use crate::config::UpstreamConfig;

/// Errors from a single upstream round trip.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The deadline expired before the full response body arrived.
    #[error("upstream did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, TLS or protocol failure.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }

    fn from_reqwest(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(deadline)
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// HTTP client bound to one SOAP endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct TypografClient {
    http: reqwest::Client,
    url: String,
    soap_action: HeaderValue,
    deadline: Duration,
}

impl TypografClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let deadline = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(deadline)
            .connect_timeout(deadline)
            .build()
            .map_err(UpstreamError::Transport)?;

        let soap_action = HeaderValue::from_str(&config.soap_action).unwrap_or_else(|_| {
            tracing::warn!(
                soap_action = %config.soap_action,
                "SOAPAction is not a valid header value, using ProcessText"
            );
            HeaderValue::from_static(crate::soap::PROCESS_TEXT_ACTION)
        });

        Ok(Self {
            http,
            url: config.url.clone(),
            soap_action,
            deadline,
        })
    }

    /// The round-trip deadline.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Send a rendered envelope and return the raw response body.
    pub async fn send(&self, body: Vec<u8>) -> Result<Vec<u8>, UpstreamError> {
        let start = Instant::now();
        let round_trip = async {
            let response = self
                .http
                .post(&self.url)
                .header(CONTENT_TYPE, "text/xml")
                .header(CONTENT_LENGTH, body.len())
                .header("SOAPAction", self.soap_action.clone())
                .body(body)
                .send()
                .await
                .map_err(|e| UpstreamError::from_reqwest(e, self.deadline))?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status(status));
            }

            response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| UpstreamError::from_reqwest(e, self.deadline))
        };

        let result = match timeout(self.deadline, round_trip).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.deadline)),
        };

        if result.is_ok() {
            tracing::info!(
                url = %self.url,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Origin request completed"
            );
        }
        result
    }
}
