//! Observability subsystem.
//!
//! Logging is the only signal the gateway emits: request spans from
//! tower_http, one line per failed request with its error kind, and the
//! latency of every origin call.

pub mod logging;
