//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FailoverConfig (validated, immutable)
//!     → CLI flags layered on top
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::FailoverConfig;
pub use schema::{FetchConfig, IdentifierConfig, MirrorsConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
