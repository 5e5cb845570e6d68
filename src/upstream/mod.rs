//! Upstream webservice access.
//!
//! The gateway talks to exactly one SOAP endpoint. Every call carries a hard
//! deadline and is attempted once.

pub mod client;

pub use client::{TypografClient, UpstreamError};
