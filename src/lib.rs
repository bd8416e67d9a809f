//! Mirror failover for content-addressed resources.
//!
//! # Architecture Overview
//!
//! ```text
//!     caller                    ┌──────────────────────────────────────────────┐
//!     ──────── attach ─────────▶│ failover::FailoverController                 │
//!                               │   identifier (hash from URL path)            │
//!                               │   AttemptState { tried, MirrorCache }        │
//!                               └──────────┬───────────────────┬───────────────┘
//!                                          │ subscribe         │ first failure
//!                                          ▼                   ▼
//!     host ── load ──▶ ┌──────────────────────┐     ┌─────────────────────────┐
//!     (fetch)          │ resource::Resource   │     │ mirrors::               │
//!          ◀─ failure ─│   source URL         │     │   MirrorListProvider    │
//!                      │   failure handlers   │     │   (static / fn / http)  │
//!                      └──────────────────────┘     └─────────────────────────┘
//! ```
//!
//! A failed load is reported on the [`Resource`]; the attached handler moves
//! the source to the next untried mirror, and detaches once every mirror has
//! been tried.

pub mod config;
pub mod failover;
pub mod fetch;
pub mod identifier;
pub mod mirrors;
pub mod observability;
pub mod resource;

pub use config::FailoverConfig;
pub use failover::{attach, FailoverController, FailoverHandle};
pub use identifier::{ContentId, IdentifierExtractor};
pub use mirrors::{MirrorEntry, MirrorListProvider, ServerDescriptor};
pub use resource::Resource;
