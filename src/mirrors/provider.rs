//! Mirror list providers.
//!
//! # Responsibilities
//! - Define the async contract for fetching a ranked mirror list
//! - Provide a static (config-driven) list and a closure adapter
//!
//! # Design Decisions
//! - `Ok(None)` means "no list available", distinct from an empty list
//! - Providers own their timeouts; the failover controller never aborts a call

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

use crate::mirrors::descriptor::MirrorEntry;

/// Errors returned by a mirror list provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure talking to a list endpoint.
    #[error("mirror list request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// List endpoint answered with a non-success status.
    #[error("mirror list endpoint returned status {0}")]
    Status(u16),

    /// List request exceeded its deadline.
    #[error("mirror list request timed out after {0} seconds")]
    Timeout(u64),

    #[error("mirror list provider failed: {0}")]
    Other(String),
}

/// Source of an ordered, highest-priority-first list of mirrors.
#[async_trait]
pub trait MirrorListProvider: Send + Sync {
    /// Fetch the mirror list, optionally scoped by an identity hint (e.g. an owner's public key).
    async fn mirrors(
        &self,
        identity_hint: Option<&str>,
    ) -> Result<Option<Vec<MirrorEntry>>, ProviderError>;
}

/// A fixed ranked list, ignoring the identity hint.
#[derive(Debug, Clone, Default)]
pub struct StaticMirrors {
    entries: Vec<MirrorEntry>,
}

impl StaticMirrors {
    pub fn new<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<MirrorEntry>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MirrorListProvider for StaticMirrors {
    async fn mirrors(
        &self,
        _identity_hint: Option<&str>,
    ) -> Result<Option<Vec<MirrorEntry>>, ProviderError> {
        Ok(Some(self.entries.clone()))
    }
}

/// Adapter turning an async closure into a [`MirrorListProvider`].
pub struct FnProvider<F> {
    f: F,
}

/// Wrap `f` so it can be used as a provider.
pub fn provider_fn<F, Fut>(f: F) -> FnProvider<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Vec<MirrorEntry>>, ProviderError>> + Send + 'static,
{
    FnProvider { f }
}

#[async_trait]
impl<F, Fut> MirrorListProvider for FnProvider<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Vec<MirrorEntry>>, ProviderError>> + Send + 'static,
{
    async fn mirrors(
        &self,
        identity_hint: Option<&str>,
    ) -> Result<Option<Vec<MirrorEntry>>, ProviderError> {
        (self.f)(identity_hint.map(str::to_owned)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_mirrors() {
        let provider = StaticMirrors::new(["https://b.example", "https://c.example"]);
        assert_eq!(provider.len(), 2);

        let list = provider.mirrors(Some("ignored")).await.unwrap().unwrap();
        assert_eq!(list[0], MirrorEntry::from("https://b.example"));
        assert_eq!(list[1], MirrorEntry::from("https://c.example"));
    }

    #[tokio::test]
    async fn test_empty_static_list_is_present() {
        let provider = StaticMirrors::default();
        assert!(provider.is_empty());
        assert_eq!(provider.mirrors(None).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_fn_provider_receives_hint() {
        let provider = provider_fn(|hint: Option<String>| async move {
            match hint.as_deref() {
                Some("alice") => Ok(Some(vec![MirrorEntry::from("https://alice.example")])),
                Some(other) => Err(ProviderError::Other(format!("unknown user {}", other))),
                None => Ok(None),
            }
        });

        let list = provider.mirrors(Some("alice")).await.unwrap().unwrap();
        assert_eq!(list, vec![MirrorEntry::from("https://alice.example")]);
        assert!(provider.mirrors(None).await.unwrap().is_none());
        assert!(matches!(
            provider.mirrors(Some("bob")).await,
            Err(ProviderError::Other(_))
        ));
    }
}
