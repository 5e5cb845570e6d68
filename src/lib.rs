//! JSON gateway for the ArtLebedev Studio typograf SOAP webservice.
//!
//! Callers POST `{"data": "..."}` and get the same object back with `data`
//! replaced by the typographically corrected text. The gateway escapes the
//! text, wraps it in a `ProcessText` envelope, calls the webservice once
//! under a hard deadline and unwraps `ProcessTextResult`.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod soap;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::{ErrorKind, GatewayError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::{typogrify, TextRequest};
pub use upstream::TypografClient;
