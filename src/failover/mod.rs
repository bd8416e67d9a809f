//! Failover subsystem.
//!
//! # Data Flow
//! ```text
//! attach(resource, provider, hint)
//!     → identifier extraction (None → inert, nothing subscribed)
//!     → AttemptState { tried = {original host}, mirrors = NotYetResolved }
//!     → FailureHandler subscribed on the resource
//!
//! Each failure:
//!     → capture current source + extension
//!     → resolve mirror list once (single-flight, cached even when absent)
//!     → next untried host?
//!         yes → rewrite source, mark host tried
//!         no  → Disposition::Detach (terminal)
//! ```
//!
//! # Design Decisions
//! - Pure ordered exhaustion: no health scoring, no re-ranking
//! - Hosts are compared by name only, scheme and port are ignored
//! - Provider errors propagate to the failure reporter, never retried here

pub mod controller;
pub mod state;
pub mod types;

pub use controller::{attach, rewrite_source, FailoverController, FailoverHandle};
pub use state::{AttemptState, MirrorCache};
pub use types::{FailoverError, FailoverStep};
