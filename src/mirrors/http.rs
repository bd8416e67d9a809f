//! Mirror list fetched from an HTTP endpoint.
//!
//! # Responsibilities
//! - Build the list URL from an endpoint template and the identity hint
//! - Fetch and decode a JSON array of mirror entries
//!
//! # Design Decisions
//! - `404 Not Found` means "no list for this identity", not an error
//! - Any other non-success status is a provider failure
//! - Request timeout is enforced by the client, not by the caller

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::mirrors::descriptor::MirrorEntry;
use crate::mirrors::provider::{MirrorListProvider, ProviderError};

/// Placeholder substituted with the identity hint in endpoint templates.
pub const HINT_PLACEHOLDER: &str = "{hint}";

/// Provider that loads the ranked list from `endpoint`.
///
/// The endpoint may contain `{hint}`, e.g. `https://lists.example/servers/{hint}`.
/// Without a hint such a template yields no list.
#[derive(Debug, Clone)]
pub struct HttpMirrorProvider {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpMirrorProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mirror-failover/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Resolve the request URL for `identity_hint`, `None` if the template needs a hint we lack.
    pub fn list_url(&self, identity_hint: Option<&str>) -> Option<String> {
        if !self.endpoint.contains(HINT_PLACEHOLDER) {
            return Some(self.endpoint.clone());
        }
        let hint = identity_hint?;
        Some(self.endpoint.replace(HINT_PLACEHOLDER, &urlencoding::encode(hint)))
    }
}

#[async_trait]
impl MirrorListProvider for HttpMirrorProvider {
    async fn mirrors(
        &self,
        identity_hint: Option<&str>,
    ) -> Result<Option<Vec<MirrorEntry>>, ProviderError> {
        let Some(list_url) = self.list_url(identity_hint) else {
            tracing::debug!(endpoint = %self.endpoint, "No identity hint, mirror list unavailable");
            return Ok(None);
        };

        let response = self.client.get(&list_url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout.as_secs())
            } else {
                ProviderError::Http(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(url = %list_url, "Mirror list not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let entries: Vec<MirrorEntry> = response.json().await?;
        tracing::debug!(url = %list_url, count = entries.len(), "Fetched mirror list");
        Ok(Some(entries))
    }
}
