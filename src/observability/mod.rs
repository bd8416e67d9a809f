//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! failover / fetch decisions produce:
//!     → logging.rs (structured tracing events, attempt_id correlated)
//!     → metrics.rs (counters through the `metrics` facade)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing subscribers/recorders is the binary's job
//! - Every attempt carries a UUID so redirects of one resource can be grepped together
//! - Without a recorder metric updates are no-ops

pub mod logging;
pub mod metrics;
