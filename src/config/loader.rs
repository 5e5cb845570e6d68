//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.timeout_ms, 500);
        assert_eq!(
            config.upstream.url,
            "http://typograf.artlebedev.ru/webservices/typograf.asmx"
        );
        assert_eq!(
            config.upstream.soap_action,
            "http://typograf.artlebedev.ru/webservices/ProcessText"
        );
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            url = "http://localhost:3000/typograf.asmx"
            timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.url, "http://localhost:3000/typograf.asmx");
        assert_eq!(config.upstream.timeout().as_millis(), 250);
        assert_eq!(config.timeouts.request_secs, 5);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("[upstream]\ntimeout_ms = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            r#"
            [listener]
            bind_address = "nowhere"

            [upstream]
            timeout_ms = 0
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("listener.bind_address"));
        assert!(msg.contains("upstream.timeout_ms"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("typograf-gateway-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[observability]\nlog_level = \"debug\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.observability.log_level, "debug");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
