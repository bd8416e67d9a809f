//! Failure signal contract.

use async_trait::async_trait;

use crate::failover::FailoverError;
use crate::resource::target::Resource;

/// Identifies one subscription on a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);

/// What a handler wants done with its subscription after handling a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Stay subscribed for the next failure.
    Keep,
    /// Unsubscribe permanently.
    Detach,
}

/// Reacts to load failures of a [`Resource`].
#[async_trait]
pub trait FailureHandler: Send + Sync {
    async fn on_failure(&self, resource: &Resource) -> Result<Disposition, FailoverError>;

    /// Called once when the resource loaded, right before the handler is dropped.
    fn on_success(&self) {}
}
