//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for mirror failover.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::identifier::extractor::SHA256_PATTERN;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FailoverConfig {
    /// Content identifier extraction.
    pub identifier: IdentifierConfig,

    /// Where mirror lists come from.
    pub mirrors: MirrorsConfig,

    /// HTTP loading of blobs.
    pub fetch: FetchConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Identifier extraction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Regex matching the content hash inside a URL path.
    pub pattern: String,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            pattern: SHA256_PATTERN.to_string(),
        }
    }
}

/// Mirror list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MirrorsConfig {
    /// Static ranked mirror list (e.g., "https://cdn.example.com").
    pub servers: Vec<String>,

    /// Optional list endpoint; `{hint}` is replaced with the identity hint.
    /// Takes precedence over `servers` when set.
    pub endpoint: Option<String>,

    /// List endpoint request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MirrorsConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Blob fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every load.
    pub user_agent: String,

    /// Largest accepted response body in bytes.
    pub max_body_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("mirror-failover/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
