//! Resource subsystem.
//!
//! # Data Flow
//! ```text
//! Host loads resource.source()
//!     → success: report_success() → all subscriptions end
//!     → failure: report_failure()
//!         → each FailureHandler::on_failure (subscription order)
//!         → Disposition::Detach → unsubscribe
//!     → source rewritten by a handler? host loads again
//! ```
//!
//! # Design Decisions
//! - Subscribe/unsubscribe are explicit so a handler's terminal state is observable
//! - Source and hint are swapped atomically; readers always see a whole URL
//! - Handler errors propagate to whoever reported the failure

pub mod signal;
pub mod target;

pub use signal::{Disposition, FailureHandler, HandlerId};
pub use target::Resource;
