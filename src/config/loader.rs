//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FailoverConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<FailoverConfig, ConfigError> {
    let config: FailoverConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FailoverConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[identifier]
pattern = "[0-9a-f]{{8,}}"

[mirrors]
servers = ["https://b.example", "http://c.example:8080"]
timeout_secs = 3

[fetch]
timeout_secs = 5

[observability]
log_level = "debug"
json = true
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.identifier.pattern, "[0-9a-f]{8,}");
        assert_eq!(config.mirrors.servers.len(), 2);
        assert_eq!(config.mirrors.timeout_secs, 3);
        assert!(config.mirrors.endpoint.is_none());
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.max_body_bytes, 100 * 1024 * 1024);
        assert!(config.observability.json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.mirrors.servers.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/mirror-failover.toml")),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(parse_config("[mirrors"), Err(ConfigError::Parse(_))));

        let err = parse_config("[fetch]\ntimeout_secs = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: fetch.timeout_secs must be greater than zero"
        );
    }
}
