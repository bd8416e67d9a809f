//! Server descriptors and mirror list entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors turning a mirror entry into a [`ServerDescriptor`].
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid mirror URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported mirror scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("mirror URL has no host")]
    MissingHost,
}

/// A mirror server: where the same content can be requested from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Transport scheme (`http` or `https`).
    pub scheme: String,
    /// Hostname, compared against the tried set.
    pub host: String,
    /// Explicit port, `None` for the scheme default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ServerDescriptor {
    /// Build a descriptor from the scheme, host and port of `url`. The path is ignored.
    pub fn from_url(url: &Url) -> Result<Self, DescriptorError> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(DescriptorError::UnsupportedScheme(other.to_string())),
        }
        let host = url.host_str().ok_or(DescriptorError::MissingHost)?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
        })
    }
}

impl FromStr for ServerDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(&Url::parse(s)?)
    }
}

impl fmt::Display for ServerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// One element of a provider's ranked list, either a URL string or a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MirrorEntry {
    Url(String),
    Server(ServerDescriptor),
}

impl MirrorEntry {
    /// Normalize the entry into a descriptor.
    ///
    /// Descriptors are re-parsed through their URL form so hosts are
    /// normalized the same way as string entries.
    pub fn to_descriptor(&self) -> Result<ServerDescriptor, DescriptorError> {
        match self {
            MirrorEntry::Url(s) => s.parse(),
            MirrorEntry::Server(d) => d.to_string().parse(),
        }
    }
}

impl From<&str> for MirrorEntry {
    fn from(s: &str) -> Self {
        MirrorEntry::Url(s.to_string())
    }
}

impl From<String> for MirrorEntry {
    fn from(s: String) -> Self {
        MirrorEntry::Url(s)
    }
}

impl From<Url> for MirrorEntry {
    fn from(url: Url) -> Self {
        MirrorEntry::Url(url.to_string())
    }
}

impl From<ServerDescriptor> for MirrorEntry {
    fn from(d: ServerDescriptor) -> Self {
        MirrorEntry::Server(d)
    }
}

/// Normalize a provider's entries, keeping their order. Invalid entries are skipped.
pub fn normalize_entries(entries: &[MirrorEntry]) -> Vec<ServerDescriptor> {
    entries
        .iter()
        .filter_map(|entry| match entry.to_descriptor() {
            Ok(d) => Some(d),
            Err(e) => {
                tracing::warn!(entry = ?entry, error = %e, "Ignoring invalid mirror entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let d: ServerDescriptor = "https://CDN.Example.com/some/path".parse().unwrap();
        assert_eq!(d.scheme, "https");
        assert_eq!(d.host, "cdn.example.com");
        assert_eq!(d.port, None);
        assert_eq!(d.to_string(), "https://cdn.example.com");

        let d: ServerDescriptor = "http://127.0.0.1:3000".parse().unwrap();
        assert_eq!(d.port, Some(3000));
        assert_eq!(d.to_string(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_default_port_dropped() {
        let d: ServerDescriptor = "https://a.example:443".parse().unwrap();
        assert_eq!(d.port, None);
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert!(matches!(
            "not a url".parse::<ServerDescriptor>(),
            Err(DescriptorError::InvalidUrl(_))
        ));
        assert!(matches!(
            "ftp://a.example".parse::<ServerDescriptor>(),
            Err(DescriptorError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn test_normalize_keeps_order_and_skips_invalid() {
        let entries = vec![
            MirrorEntry::from("https://b.example"),
            MirrorEntry::from("::garbage::"),
            MirrorEntry::Server(ServerDescriptor {
                scheme: "http".into(),
                host: "C.example".into(),
                port: Some(8080),
            }),
        ];
        let servers = normalize_entries(&entries);
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].host, "b.example");
        assert_eq!(servers[1].host, "c.example");
        assert_eq!(servers[1].port, Some(8080));
    }

    #[test]
    fn test_entry_json_forms() {
        let json = r#"["https://b.example", {"scheme": "http", "host": "c.example", "port": 81}]"#;
        let entries: Vec<MirrorEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], MirrorEntry::Url("https://b.example".into()));
        assert!(matches!(&entries[1], MirrorEntry::Server(d) if d.port == Some(81)));
    }
}
