//! Error taxonomy of the gateway.
//!
//! Every failure of a request ends up as one [`GatewayError`]. Its
//! [`ErrorKind`] decides the HTTP status and is what gets logged.

use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::soap::{DecodeError, EncodeError};
use crate::upstream::UpstreamError;

/// Message shown to callers when the upstream exceeded its deadline.
pub const TIMEOUT_MESSAGE: &str = "typograf service took too long to respond";

/// Failure of a single gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("cannot build upstream request: {0}")]
    Encoding(#[from] EncodeError),

    #[error("upstream did not respond within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error(transparent)]
    Transport(UpstreamError),

    #[error("cannot decode upstream response: {0}")]
    Decode(#[from] DecodeError),
}

/// Coarse classification of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing inbound fields
    BadRequest,
    /// Outbound envelope could not be built
    Encoding,
    /// Upstream exceeded its deadline
    Timeout,
    /// Any other upstream I/O failure
    Transport,
    /// Upstream response could not be decoded
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Encoding => "ENCODING",
            Self::Timeout => "TIMEOUT",
            Self::Transport => "TRANSPORT",
            Self::Decode => "DECODE",
        }
    }
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Status written on the response line and in `status_code`.
    ///
    /// Caller mistakes are reported as 500 as well; existing clients of the
    /// service rely on that.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Optional human-readable explanation next to the raw error.
    pub fn message(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::Timeout => Some(TIMEOUT_MESSAGE),
            _ => None,
        }
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout(after) => GatewayError::Timeout(after),
            other => GatewayError::Transport(other),
        }
    }
}
