//! Mirror server subsystem.
//!
//! # Data Flow
//! ```text
//! First failure of an attempt
//!     → provider.rs (MirrorListProvider::mirrors(identity_hint))
//!         - StaticMirrors (config-driven list)
//!         - FnProvider (caller's async closure)
//!         - http.rs (JSON list from an endpoint)
//!     → descriptor.rs (normalize entries into ServerDescriptors)
//!     → cached on the attempt, in provider order
//! ```
//!
//! # Design Decisions
//! - Providers rank, the controller never reorders
//! - Invalid entries are dropped with a warning rather than failing the list

use std::sync::Arc;
use std::time::Duration;

use crate::config::MirrorsConfig;

pub mod descriptor;
pub mod http;
pub mod provider;

pub use descriptor::{normalize_entries, DescriptorError, MirrorEntry, ServerDescriptor};
pub use http::HttpMirrorProvider;
pub use provider::{provider_fn, FnProvider, MirrorListProvider, ProviderError, StaticMirrors};

/// Build the provider described by `config`: the list endpoint when set, else the static list.
pub fn provider_from_config(
    config: &MirrorsConfig,
) -> Result<Arc<dyn MirrorListProvider>, ProviderError> {
    match &config.endpoint {
        Some(endpoint) => {
            let timeout = Duration::from_secs(config.timeout_secs);
            let provider = HttpMirrorProvider::new(endpoint.clone(), timeout)?;
            Ok(Arc::new(provider))
        }
        None => Ok(Arc::new(StaticMirrors::new(config.servers.iter().map(String::as_str)))),
    }
}
