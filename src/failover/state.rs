//! Per-attempt failover state.
//!
//! # States
//! - NotYetResolved: no failure seen yet, provider never called
//! - Resolved: provider answered with a list (possibly empty)
//! - ResolvedAbsent: provider had no list, or failed
//!
//! # State Transitions
//! ```text
//! NotYetResolved → Resolved | ResolvedAbsent   (first failure, exactly once)
//! Resolved, ResolvedAbsent                     (terminal for the attempt)
//! ```
//!
//! # Design Decisions
//! - The whole state sits behind one async mutex held across the provider call,
//!   so racing failures share a single resolution
//! - Tried hosts only grow; the original host is in the set from creation

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::identifier::ContentId;
use crate::mirrors::ServerDescriptor;

/// Cached mirror list of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MirrorCache {
    #[default]
    NotYetResolved,
    Resolved(Vec<ServerDescriptor>),
    ResolvedAbsent,
}

impl MirrorCache {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, MirrorCache::NotYetResolved)
    }
}

#[derive(Debug)]
pub(crate) struct AttemptInner {
    pub(crate) tried: HashSet<String>,
    pub(crate) mirrors: MirrorCache,
    pub(crate) provider_calls: usize,
}

impl AttemptInner {
    /// First mirror, in provider order, whose host has not been tried.
    pub(crate) fn next_untried(&self) -> Option<&ServerDescriptor> {
        match &self.mirrors {
            MirrorCache::Resolved(servers) => {
                servers.iter().find(|s| !self.tried.contains(&s.host))
            }
            _ => None,
        }
    }
}

/// Mutable record of one resource's failover lifecycle.
#[derive(Debug)]
pub struct AttemptState {
    attempt_id: Uuid,
    content_id: ContentId,
    original_host: String,
    identity_hint: Option<String>,
    detached: AtomicBool,
    inner: Mutex<AttemptInner>,
}

impl AttemptState {
    pub fn new(content_id: ContentId, original_host: &str, identity_hint: Option<String>) -> Self {
        let mut tried = HashSet::new();
        tried.insert(original_host.to_string());

        Self {
            attempt_id: Uuid::new_v4(),
            content_id,
            original_host: original_host.to_string(),
            identity_hint,
            detached: AtomicBool::new(false),
            inner: Mutex::new(AttemptInner {
                tried,
                mirrors: MirrorCache::NotYetResolved,
                provider_calls: 0,
            }),
        }
    }

    /// Correlation ID for log events of this attempt.
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn original_host(&self) -> &str {
        &self.original_host
    }

    pub fn identity_hint(&self) -> Option<&str> {
        self.identity_hint.as_deref()
    }

    /// True once the attempt ended: mirrors exhausted, source loaded, or the
    /// caller detached.
    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    pub(crate) fn mark_detached(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, AttemptInner> {
        self.inner.lock().await
    }

    /// Hosts attempted so far, including the original one.
    pub async fn tried_hosts(&self) -> HashSet<String> {
        self.inner.lock().await.tried.clone()
    }

    pub async fn mirror_cache(&self) -> MirrorCache {
        self.inner.lock().await.mirrors.clone()
    }

    /// How many times the provider has been invoked (0 or 1).
    pub async fn provider_calls(&self) -> usize {
        self.inner.lock().await.provider_calls
    }
}
