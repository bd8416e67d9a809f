//! Failover controller.
//!
//! # Responsibilities
//! - Attach failure handling to mirrorable resources
//! - Resolve the mirror list lazily, once per attempt
//! - Redirect to the next untried mirror, detach when none remain

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::failover::state::{AttemptState, MirrorCache};
use crate::failover::types::{FailoverError, FailoverStep};
use crate::identifier::{file_extension, ContentId, IdentifierExtractor};
use crate::mirrors::{normalize_entries, MirrorListProvider, ServerDescriptor};
use crate::observability::metrics;
use crate::resource::{Disposition, FailureHandler, HandlerId, Resource};

/// Attaches mirror failover to resources.
#[derive(Debug, Clone, Default)]
pub struct FailoverController {
    extractor: IdentifierExtractor,
}

impl FailoverController {
    pub fn new(extractor: IdentifierExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &IdentifierExtractor {
        &self.extractor
    }

    /// Start failover for `resource`.
    ///
    /// Returns `None` without touching the resource when its source carries no
    /// content identifier, or is not an http(s) URL with a host (nothing a
    /// mirror could stand in for). Otherwise a non-empty identity hint is
    /// stamped on the resource, the current host is recorded as tried, and a
    /// failure handler is subscribed.
    pub fn attach(
        &self,
        resource: &Arc<Resource>,
        provider: Arc<dyn MirrorListProvider>,
        identity_hint: Option<&str>,
    ) -> Option<FailoverHandle> {
        let source = resource.source();
        let Some(content_id) = self.extractor.extract(&source) else {
            tracing::debug!(url = %source, "No content identifier in source, failover inactive");
            metrics::record_attach(false);
            return None;
        };

        let host = match source.host_str() {
            Some(host) if is_mirrorable_scheme(source.scheme()) && !host.is_empty() => host,
            _ => {
                tracing::debug!(
                    url = %source,
                    "Source cannot be moved to a mirror, failover inactive"
                );
                metrics::record_attach(false);
                return None;
            }
        };

        let identity_hint = identity_hint.filter(|hint| !hint.is_empty());
        if let Some(hint) = identity_hint {
            resource.set_identity_hint(hint);
        }
        let hint = identity_hint
            .map(str::to_owned)
            .or_else(|| resource.identity_hint())
            .filter(|hint| !hint.is_empty());

        let state = Arc::new(AttemptState::new(content_id, host, hint));
        let handler_id = resource.subscribe(Arc::new(MirrorFailover {
            state: state.clone(),
            provider,
        }));

        tracing::debug!(
            attempt_id = %state.attempt_id(),
            content_id = %state.content_id(),
            host = %host,
            "Failover attached"
        );
        metrics::record_attach(true);

        Some(FailoverHandle {
            resource: resource.clone(),
            handler_id,
            state,
        })
    }
}

fn is_mirrorable_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}

/// Attach failover using the default SHA-256 identifier shape.
pub fn attach(
    resource: &Arc<Resource>,
    provider: Arc<dyn MirrorListProvider>,
    identity_hint: Option<&str>,
) -> Option<FailoverHandle> {
    FailoverController::default().attach(resource, provider, identity_hint)
}

/// Caller's view of an attached failover.
#[derive(Debug)]
pub struct FailoverHandle {
    resource: Arc<Resource>,
    handler_id: HandlerId,
    state: Arc<AttemptState>,
}

impl FailoverHandle {
    pub fn content_id(&self) -> &ContentId {
        self.state.content_id()
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    /// True while the handler still receives failure signals.
    pub fn is_attached(&self) -> bool {
        self.resource.is_subscribed(self.handler_id)
    }

    /// Stop failover for this resource. Returns false if already detached.
    pub fn detach(&self) -> bool {
        self.state.mark_detached();
        self.resource.unsubscribe(self.handler_id)
    }
}

/// Failure handler subscribed by [`FailoverController::attach`].
struct MirrorFailover {
    state: Arc<AttemptState>,
    provider: Arc<dyn MirrorListProvider>,
}

impl MirrorFailover {
    async fn step(&self, resource: &Resource) -> Result<FailoverStep, FailoverError> {
        if self.state.is_detached() {
            return Ok(FailoverStep::Exhausted);
        }

        let current = resource.source();
        let ext = file_extension(current.path()).to_string();

        let mut inner = self.state.lock().await;
        if !inner.mirrors.is_resolved() {
            // Recorded before awaiting: a failing provider is not asked again.
            inner.mirrors = MirrorCache::ResolvedAbsent;
            inner.provider_calls += 1;

            let entries = match self.provider.mirrors(self.state.identity_hint()).await {
                Ok(entries) => entries,
                Err(e) => {
                    metrics::record_provider_call("error");
                    tracing::warn!(
                        attempt_id = %self.state.attempt_id(),
                        error = %e,
                        "Mirror list provider failed"
                    );
                    return Err(e.into());
                }
            };

            match entries {
                Some(entries) => {
                    let servers = normalize_entries(&entries);
                    metrics::record_provider_call("resolved");
                    tracing::debug!(
                        attempt_id = %self.state.attempt_id(),
                        count = servers.len(),
                        "Mirror list resolved"
                    );
                    inner.mirrors = MirrorCache::Resolved(servers);
                }
                None => {
                    metrics::record_provider_call("absent");
                    tracing::debug!(
                        attempt_id = %self.state.attempt_id(),
                        "No mirror list available"
                    );
                }
            }
        }

        if inner.mirrors == MirrorCache::ResolvedAbsent {
            return Ok(FailoverStep::Unavailable);
        }

        let Some(server) = inner.next_untried().cloned() else {
            self.state.mark_detached();
            metrics::record_exhausted();
            tracing::info!(
                attempt_id = %self.state.attempt_id(),
                content_id = %self.state.content_id(),
                tried = inner.tried.len(),
                "All mirrors exhausted"
            );
            return Ok(FailoverStep::Exhausted);
        };

        let next = rewrite_source(&current, &server, self.state.content_id(), &ext)?;
        inner.tried.insert(server.host.clone());
        resource.set_source(next.clone());

        metrics::record_redirect();
        tracing::info!(
            attempt_id = %self.state.attempt_id(),
            from = %current,
            to = %next,
            "Redirecting to mirror"
        );
        Ok(FailoverStep::Redirected(next))
    }
}

#[async_trait]
impl FailureHandler for MirrorFailover {
    async fn on_failure(&self, resource: &Resource) -> Result<Disposition, FailoverError> {
        match self.step(resource).await? {
            FailoverStep::Exhausted => Ok(Disposition::Detach),
            FailoverStep::Redirected(_) | FailoverStep::Unavailable => Ok(Disposition::Keep),
        }
    }

    fn on_success(&self) {
        self.state.mark_detached();
        tracing::debug!(attempt_id = %self.state.attempt_id(), "Source loaded, failover ended");
    }
}

/// Move `current` onto `server`: scheme, host and port from the mirror, path
/// `/<content id><ext>`. Query and fragment are kept.
pub fn rewrite_source(
    current: &Url,
    server: &ServerDescriptor,
    content_id: &ContentId,
    ext: &str,
) -> Result<Url, FailoverError> {
    let rewrite_error = || FailoverError::Rewrite {
        url: current.to_string(),
        server: server.to_string(),
    };

    let mut next = current.clone();
    next.set_scheme(&server.scheme).map_err(|_| rewrite_error())?;
    next.set_host(Some(&server.host)).map_err(|_| rewrite_error())?;
    next.set_port(server.port).map_err(|_| rewrite_error())?;
    next.set_path(&format!("/{}{}", content_id, ext));
    Ok(next)
}
