//! Content identifier subsystem.
//!
//! # Data Flow
//! ```text
//! Resource source URL
//!     → extractor.rs (find hash token in the path)
//!     → ContentId (immutable, reused for every redirect)
//!
//! On each failure:
//!     current source path
//!     → extension.rs (trailing ".ext" suffix, or "")
//!     → "/" + ContentId + suffix becomes the mirror path
//! ```
//!
//! # Design Decisions
//! - Extraction looks at the path only; host and scheme never matter
//! - A URL without a hash token is not an error, it is simply not mirrorable
//! - The hash shape is a regex so non-SHA-256 deployments can plug in their own

pub mod extension;
pub mod extractor;

pub use extension::file_extension;
pub use extractor::{ContentId, IdentifierExtractor};
