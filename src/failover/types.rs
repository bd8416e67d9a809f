//! Failover outcomes and error definitions.

use thiserror::Error;
use url::Url;

use crate::mirrors::ProviderError;

/// Errors surfaced while handling a load failure.
#[derive(Debug, Error)]
pub enum FailoverError {
    /// The mirror list provider failed. Not retried; the list stays unresolved for good.
    #[error("mirror list provider failed: {0}")]
    Provider(#[from] ProviderError),

    /// The current source could not be moved onto the mirror.
    #[error("cannot rewrite {url} onto mirror {server}")]
    Rewrite { url: String, server: String },
}

/// What one failure handler invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailoverStep {
    /// Source rewritten to the next untried mirror.
    Redirected(Url),
    /// Provider had no list; nothing changed, still subscribed.
    Unavailable,
    /// Every mirror has been tried; the handler detaches.
    Exhausted,
}
