//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the identifier pattern compiles
//! - Check mirror entries and endpoint parse
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FailoverConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::FailoverConfig;
use crate::mirrors::ServerDescriptor;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("identifier.pattern is not a valid regex: {0}")]
    InvalidPattern(String),

    #[error("mirrors.servers[{index}] '{value}' is not a valid mirror: {reason}")]
    InvalidServer {
        index: usize,
        value: String,
        reason: String,
    },

    #[error("mirrors.endpoint '{0}' is not a valid URL")]
    InvalidEndpoint(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FailoverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = regex::Regex::new(&config.identifier.pattern) {
        errors.push(ValidationError::InvalidPattern(e.to_string()));
    }

    for (index, value) in config.mirrors.servers.iter().enumerate() {
        if let Err(e) = value.parse::<ServerDescriptor>() {
            errors.push(ValidationError::InvalidServer {
                index,
                value: value.clone(),
                reason: e.to_string(),
            });
        }
    }

    if let Some(endpoint) = &config.mirrors.endpoint {
        // The placeholder is substituted per request, check with a sample value.
        let sample = endpoint.replace(crate::mirrors::http::HINT_PLACEHOLDER, "hint");
        if url::Url::parse(&sample).is_err() {
            errors.push(ValidationError::InvalidEndpoint(endpoint.clone()));
        }
    }

    if config.mirrors.timeout_secs == 0 {
        errors.push(ValidationError::Zero("mirrors.timeout_secs"));
    }
    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::Zero("fetch.timeout_secs"));
    }
    if config.fetch.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("fetch.max_body_bytes"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FailoverConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FailoverConfig::default();
        config.identifier.pattern = "[0-9a-f".into();
        config.mirrors.servers = vec!["https://ok.example".into(), "ftp://bad.example".into()];
        config.mirrors.endpoint = Some("not a url/{hint}".into());
        config.fetch.timeout_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(matches!(errors[0], ValidationError::InvalidPattern(_)));
        assert!(matches!(
            &errors[1],
            ValidationError::InvalidServer { index: 1, .. }
        ));
        assert_eq!(errors[2], ValidationError::InvalidEndpoint("not a url/{hint}".into()));
        assert_eq!(errors[3], ValidationError::Zero("fetch.timeout_secs"));
        assert_eq!(errors[4], ValidationError::InvalidLogLevel("loud".into()));
    }

    #[test]
    fn test_endpoint_template_accepted() {
        let mut config = FailoverConfig::default();
        config.mirrors.endpoint = Some("https://lists.example/servers/{hint}".into());
        assert!(validate_config(&config).is_ok());
    }
}
