//! Blob fetching over HTTP.
//!
//! # Data Flow
//! ```text
//! BlobFetcher::fetch(resource)
//!     → GET resource.source()
//!     → 2xx: report_success() → done
//!     → otherwise: report_failure()
//!         → failover rewrote the source? load again
//!         → source unchanged? give up with the last error
//! ```
//!
//! # Design Decisions
//! - The fetcher knows nothing about mirrors; it only reports outcomes
//! - Timeouts and body limits are enforced per load
//! - Hash verification of the body is left to the caller

pub mod client;

pub use client::{BlobFetcher, FetchError, FetchedBlob, LoadError};
