//! The text-in, text-out pipeline.
//!
//! ```text
//! text → escape → ProcessText envelope → upstream (bounded) → ProcessTextResult
//! ```

use crate::error::GatewayError;
use crate::soap::{decode_response, encode_request, escape};
use crate::upstream::TypografClient;

/// Encoding declared when the caller does not name one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// One unit of work: the caller's text and its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub raw_text: String,
    pub encoding: String,
}

impl TextRequest {
    /// Build a request; an empty encoding falls back to [`DEFAULT_ENCODING`].
    pub fn new(raw_text: impl Into<String>, encoding: Option<&str>) -> Self {
        let encoding = match encoding {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => DEFAULT_ENCODING.to_string(),
        };
        Self {
            raw_text: raw_text.into(),
            encoding,
        }
    }
}

/// Run `request` through the upstream and return the processed text.
pub async fn typogrify(
    client: &TypografClient,
    request: &TextRequest,
) -> Result<String, GatewayError> {
    let escaped = escape(&request.raw_text);
    let envelope = encode_request(&escaped, &request.encoding)?;
    let response = client.send(envelope).await?;
    Ok(decode_response(&response)?)
}
