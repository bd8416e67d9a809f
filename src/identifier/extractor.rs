//! Content identifier extraction.
//!
//! # Responsibilities
//! - Find the content hash token in a URL path
//! - Produce the same identifier for every mirror serving the same content

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default shape of a content identifier: a hex-encoded SHA-256 digest.
pub const SHA256_PATTERN: &str = "(?i)[0-9a-f]{64}";

/// Identifier naming a piece of content independently of the server hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts [`ContentId`]s from URL paths.
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    pattern: Regex,
}

impl IdentifierExtractor {
    /// Create an extractor matching identifiers with a custom regex.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Extractor for SHA-256 hex digests.
    pub fn sha256() -> Self {
        Self {
            pattern: Regex::new(SHA256_PATTERN).expect("sha256 pattern must compile"),
        }
    }

    /// The regex this extractor matches with.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Return the identifier in `url`'s path, or `None` if the content is not mirrorable.
    ///
    /// When the path holds several matching tokens the last one wins, so
    /// `/<namespace-hash>/<content-hash>.png` yields the content hash.
    pub fn extract(&self, url: &Url) -> Option<ContentId> {
        self.extract_from_path(url.path())
    }

    /// Same as [`extract`](Self::extract), working on a bare path.
    pub fn extract_from_path(&self, path: &str) -> Option<ContentId> {
        self.pattern
            .find_iter(path)
            .last()
            .map(|m| ContentId(m.as_str().to_string()))
    }
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::sha256()
    }
}
