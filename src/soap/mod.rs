//! SOAP translation subsystem.
//!
//! # Data Flow
//! ```text
//! raw text
//!     → escape.rs (entity-escape &, <, >)
//!     → envelope.rs (ProcessText envelope, XML declaration)
//!     → bytes for the upstream
//!
//! upstream bytes
//!     → envelope.rs (locate ProcessTextResult, unescape)
//!     → processed text
//! ```

pub mod envelope;
pub mod escape;

pub use envelope::{
    decode_request, decode_response, encode_request, encode_response, DecodeError, EncodeError,
    PROCESS_TEXT_ACTION,
};
pub use escape::escape;
