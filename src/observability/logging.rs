//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Resolve the log filter from environment and configuration
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - A bare level ("debug") applies to this crate and tower_http only
//! - Logs go to stderr so the CLI can print results on stdout

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "typograf_gateway=info,tower_http=info";

/// Build the filter directive for a configured log level.
pub fn filter_directive(level: Option<&str>) -> String {
    match level.map(str::trim) {
        None | Some("") => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains('=') || level.contains(',') => level.to_string(),
        Some(level) => format!("typograf_gateway={level},tower_http={level}"),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
        assert_eq!(filter_directive(Some("")), DEFAULT_FILTER);
        assert_eq!(
            filter_directive(Some("debug")),
            "typograf_gateway=debug,tower_http=debug"
        );
        assert_eq!(filter_directive(Some("warn,hyper=info")), "warn,hyper=info");
    }
}
