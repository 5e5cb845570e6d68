//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handler.rs (JSON in, pipeline, JSON out)
//!     → response.rs (error payload, shared headers)
//!     → Send to client
//! ```

pub mod handler;
pub mod response;
pub mod server;

pub use response::ResponsePayload;
pub use server::HttpServer;
