//! Loadable resource.
//!
//! # Responsibilities
//! - Hold the current source URL (read and rewrite)
//! - Hold the identity hint metadata slot
//! - Dispatch load outcomes to subscribed failure handlers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use dashmap::DashMap;
use url::Url;

use crate::failover::FailoverError;
use crate::resource::signal::{Disposition, FailureHandler, HandlerId};

/// A piece of content being loaded from a URL that may be rewritten.
pub struct Resource {
    source: ArcSwap<Url>,
    identity_hint: ArcSwapOption<String>,
    handlers: DashMap<HandlerId, Arc<dyn FailureHandler>>,
    next_handler_id: AtomicU64,
}

impl Resource {
    pub fn new(source: Url) -> Self {
        Self {
            source: ArcSwap::from_pointee(source),
            identity_hint: ArcSwapOption::empty(),
            handlers: DashMap::new(),
            next_handler_id: AtomicU64::new(0),
        }
    }

    /// Parse `source` and create a resource for it.
    pub fn parse(source: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(source)?))
    }

    /// The URL the resource currently loads from.
    pub fn source(&self) -> Url {
        (**self.source.load()).clone()
    }

    /// Point the resource at a new URL. The host environment loads it next.
    pub fn set_source(&self, source: Url) {
        self.source.store(Arc::new(source));
    }

    pub fn identity_hint(&self) -> Option<String> {
        self.identity_hint.load().as_deref().cloned()
    }

    pub fn set_identity_hint(&self, hint: impl Into<String>) {
        self.identity_hint.store(Some(Arc::new(hint.into())));
    }

    /// Register a failure handler.
    pub fn subscribe(&self, handler: Arc<dyn FailureHandler>) -> HandlerId {
        let id = HandlerId(self.next_handler_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(id, handler);
        id
    }

    /// Remove a failure handler. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: HandlerId) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Signal that loading the current source failed.
    ///
    /// Handlers run one after another in subscription order; a handler
    /// answering [`Disposition::Detach`] is unsubscribed. The first handler
    /// error is returned and stops the dispatch. Returns the number of
    /// handlers invoked.
    pub async fn report_failure(&self) -> Result<usize, FailoverError> {
        // Snapshot so no map guard is held across an await.
        let mut handlers: Vec<(HandlerId, Arc<dyn FailureHandler>)> = self
            .handlers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        handlers.sort_by_key(|(id, _)| *id);

        for (id, handler) in &handlers {
            if handler.on_failure(self).await? == Disposition::Detach {
                self.unsubscribe(*id);
            }
        }
        Ok(handlers.len())
    }

    /// Signal that the current source loaded. Ends every subscription.
    pub fn report_success(&self) -> usize {
        let ids: Vec<HandlerId> = self.handlers.iter().map(|entry| *entry.key()).collect();
        let mut count = 0;
        for id in ids {
            if let Some((_, handler)) = self.handlers.remove(&id) {
                handler.on_success();
                count += 1;
            }
        }
        count
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("source", &self.source().as_str())
            .field("identity_hint", &self.identity_hint())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Counts failures and detaches after `limit` of them.
    struct Counting {
        calls: AtomicUsize,
        limit: usize,
        succeeded: AtomicUsize,
    }

    impl Counting {
        fn new(limit: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                limit,
                succeeded: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FailureHandler for Counting {
        async fn on_failure(&self, _resource: &Resource) -> Result<Disposition, FailoverError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(if n >= self.limit { Disposition::Detach } else { Disposition::Keep })
        }

        fn on_success(&self) {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_source_and_hint() {
        let resource = Resource::parse("https://a.example/x.png").unwrap();
        assert_eq!(resource.source().host_str(), Some("a.example"));
        assert!(resource.identity_hint().is_none());

        resource.set_source(Url::parse("https://b.example/x.png").unwrap());
        resource.set_identity_hint("npub1");
        assert_eq!(resource.source().host_str(), Some("b.example"));
        assert_eq!(resource.identity_hint().as_deref(), Some("npub1"));
    }

    #[tokio::test]
    async fn test_detach_disposition_unsubscribes() {
        let resource = Resource::parse("https://a.example/x.png").unwrap();
        let handler = Arc::new(Counting::new(2));
        let id = resource.subscribe(handler.clone());

        assert_eq!(resource.report_failure().await.unwrap(), 1);
        assert!(resource.is_subscribed(id));

        assert_eq!(resource.report_failure().await.unwrap(), 1);
        assert!(!resource.is_subscribed(id));

        assert_eq!(resource.report_failure().await.unwrap(), 0);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unsubscribe_and_success() {
        let resource = Resource::parse("https://a.example/x.png").unwrap();
        let first = Arc::new(Counting::new(10));
        let second = Arc::new(Counting::new(10));
        let a = resource.subscribe(first.clone());
        let _b = resource.subscribe(second.clone());
        assert_eq!(resource.handler_count(), 2);

        assert!(resource.unsubscribe(a));
        assert!(!resource.unsubscribe(a));
        assert_eq!(resource.handler_count(), 1);

        assert_eq!(resource.report_success(), 1);
        assert_eq!(resource.report_failure().await.unwrap(), 0);
        assert_eq!(first.succeeded.load(Ordering::SeqCst), 0);
        assert_eq!(second.succeeded.load(Ordering::SeqCst), 1);
    }
}
