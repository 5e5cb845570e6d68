//! SOAP envelope codec for the typograf webservice.
//!
//! # Wire Shapes
//! ```text
//! request:  Envelope / Body / ProcessText { text, entityType, useBr, useP, maxNobr }
//! response: Envelope / Body / ProcessTextResponse { ProcessTextResult }
//! ```
//!
//! # Design Decisions
//! - Documents are serde types rendered with quick-xml, never string-concatenated
//! - Decoding matches local names only; prefixes are whatever the upstream picks
//! - The XML declaration echoes the caller's encoding label verbatim

use quick_xml::escape::{unescape, EscapeError};
use quick_xml::events::Event;
use quick_xml::se::SeError;
use quick_xml::Reader;
use serde::Serialize;
use thiserror::Error;

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// XML Schema namespace (`xmlns:xsd`).
pub const XML_SCHEMA_NS: &str = "http://www.w3.org/2001/XMLSchema";
/// XML Schema instance namespace (`xmlns:xsi`).
pub const XML_SCHEMA_INSTANCE_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Namespace of the typograf webservice operations.
pub const TYPOGRAF_NS: &str = "http://typograf.artlebedev.ru/webservices/";
/// Value of the `SOAPAction` header for `ProcessText`.
pub const PROCESS_TEXT_ACTION: &str = "http://typograf.artlebedev.ru/webservices/ProcessText";

// Processing options required by the upstream. They are part of the
// external contract and must not be exposed as configuration.

/// Emit typographic characters as HTML named entities.
pub const ENTITY_TYPE: u8 = 4;
/// Insert `<br />` at line breaks.
pub const USE_BR: u8 = 1;
/// Wrap paragraphs in `<p>`.
pub const USE_P: u8 = 1;
/// Maximum number of consecutive non-breaking constructs.
pub const MAX_NOBR: u8 = 3;

const RESPONSE_PATH: [&str; 4] = ["Envelope", "Body", "ProcessTextResponse", "ProcessTextResult"];
const REQUEST_PATH: [&str; 4] = ["Envelope", "Body", "ProcessText", "text"];
const FAULT_PATH: [&str; 4] = ["Envelope", "Body", "Fault", "faultstring"];

/// Errors raised while building an outbound envelope.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("invalid encoding label {0:?}")]
    InvalidEncoding(String),

    #[error("XML serialization failed: {0}")]
    Serialize(#[from] SeError),
}

/// Errors raised while reading an envelope received from the wire.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("response is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid character reference: {0}")]
    Escape(#[from] EscapeError),

    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    #[error("SOAP fault: {0}")]
    Fault(String),
}

/// SOAP envelope carrying a body of type `B`.
#[derive(Debug, Serialize)]
#[serde(rename = "soap:Envelope")]
pub struct Envelope<B> {
    #[serde(rename = "@xmlns:xsi")]
    xsi: &'static str,
    #[serde(rename = "@xmlns:xsd")]
    xsd: &'static str,
    #[serde(rename = "@xmlns:soap")]
    soap: &'static str,
    #[serde(rename = "soap:Body")]
    pub body: B,
}

impl<B> Envelope<B> {
    pub fn new(body: B) -> Self {
        Self {
            xsi: XML_SCHEMA_INSTANCE_NS,
            xsd: XML_SCHEMA_NS,
            soap: SOAP_ENVELOPE_NS,
            body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    #[serde(rename = "ProcessText")]
    pub process_text: ProcessText<'a>,
}

/// The `ProcessText` operation.
#[derive(Debug, Serialize)]
pub struct ProcessText<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    pub text: &'a str,
    #[serde(rename = "entityType")]
    pub entity_type: u8,
    #[serde(rename = "useBr")]
    pub use_br: u8,
    #[serde(rename = "useP")]
    pub use_p: u8,
    #[serde(rename = "maxNobr")]
    pub max_nobr: u8,
}

impl<'a> ProcessText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            xmlns: TYPOGRAF_NS,
            text,
            entity_type: ENTITY_TYPE,
            use_br: USE_BR,
            use_p: USE_P,
            max_nobr: MAX_NOBR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseBody<'a> {
    #[serde(rename = "ProcessTextResponse")]
    pub response: ProcessTextResponse<'a>,
}

/// The `ProcessTextResponse` returned by the upstream.
#[derive(Debug, Serialize)]
pub struct ProcessTextResponse<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "ProcessTextResult")]
    pub result: &'a str,
}

pub type OutboundEnvelope<'a> = Envelope<RequestBody<'a>>;
pub type InboundEnvelope<'a> = Envelope<ResponseBody<'a>>;

/// Render the `ProcessText` request for already escaped text.
pub fn encode_request(escaped_text: &str, encoding: &str) -> Result<Vec<u8>, EncodeError> {
    let envelope: OutboundEnvelope<'_> = Envelope::new(RequestBody {
        process_text: ProcessText::new(escaped_text),
    });
    render(&envelope, encoding)
}

/// Render a `ProcessTextResponse` carrying `result`.
pub fn encode_response(result: &str, encoding: &str) -> Result<Vec<u8>, EncodeError> {
    let envelope: InboundEnvelope<'_> = Envelope::new(ResponseBody {
        response: ProcessTextResponse {
            xmlns: TYPOGRAF_NS,
            result,
        },
    });
    render(&envelope, encoding)
}

/// Extract `ProcessTextResult` from an upstream response.
///
/// A body holding a SOAP fault is reported as [`DecodeError::Fault`].
pub fn decode_response(xml: &[u8]) -> Result<String, DecodeError> {
    match extract_text(xml, &RESPONSE_PATH) {
        Err(DecodeError::MissingElement(name)) => match extract_text(xml, &FAULT_PATH) {
            Ok(fault) => Err(DecodeError::Fault(fault)),
            Err(_) => Err(DecodeError::MissingElement(name)),
        },
        other => other,
    }
}

/// Extract the `text` argument from a `ProcessText` request.
pub fn decode_request(xml: &[u8]) -> Result<String, DecodeError> {
    extract_text(xml, &REQUEST_PATH)
}

fn render<T: Serialize>(document: &T, encoding: &str) -> Result<Vec<u8>, EncodeError> {
    if !is_encoding_name(encoding) {
        return Err(EncodeError::InvalidEncoding(encoding.to_string()));
    }
    let body = quick_xml::se::to_string(document)?;

    let mut out = format!("<?xml version=\"1.0\" encoding=\"{}\"?>", encoding).into_bytes();
    out.extend_from_slice(body.as_bytes());
    Ok(out)
}

/// `EncName` production of the XML grammar.
fn is_encoding_name(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Collect the character data of the element found by following `path`
/// (local names) from the document root.
fn extract_text(xml: &[u8], path: &[&'static str]) -> Result<String, DecodeError> {
    let xml = std::str::from_utf8(xml)?;
    let mut reader = Reader::from_str(xml);

    // Open element names, and how many of them line up with `path`.
    let mut stack: Vec<String> = Vec::new();
    let mut matched = 0usize;
    let mut deepest = 0usize;
    let mut text = String::new();

    let mut buf = Vec::new();
    loop {
        let inside = matched == path.len();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if matched == stack.len() && matched < path.len() && name == path[matched] {
                    matched += 1;
                    deepest = deepest.max(matched);
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if matched == stack.len()
                    && matched + 1 == path.len()
                    && name.as_ref() == path[matched].as_bytes()
                {
                    return Ok(String::new());
                }
            }
            Event::End(_) => {
                if matched == stack.len() && matched > 0 {
                    if matched == path.len() {
                        return Ok(text);
                    }
                    matched -= 1;
                }
                stack.pop();
            }
            Event::Text(e) if inside => {
                text.push_str(&unescape(std::str::from_utf8(&e)?)?);
            }
            Event::GeneralRef(e) if inside => {
                let reference = format!("&{};", std::str::from_utf8(&e)?);
                text.push_str(&unescape(&reference)?);
            }
            Event::CData(e) if inside => {
                text.push_str(std::str::from_utf8(&e)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Err(DecodeError::MissingElement(path[deepest.min(path.len() - 1)]))
}
