//! Failover metrics.
//!
//! # Metrics
//! - `failover_attach_total` (counter): attach calls by `mirrorable`
//! - `failover_provider_calls_total` (counter): list resolutions by `outcome`
//! - `failover_redirects_total` (counter): source rewrites
//! - `failover_exhausted_total` (counter): attempts that ran out of mirrors
//! - `fetch_attempts_total` (counter): HTTP loads by `outcome`

use ::metrics::counter;

pub fn record_attach(mirrorable: bool) {
    let label = if mirrorable { "true" } else { "false" };
    counter!("failover_attach_total", "mirrorable" => label).increment(1);
}

/// `outcome` is one of `resolved`, `absent`, `error`.
pub fn record_provider_call(outcome: &'static str) {
    counter!("failover_provider_calls_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect() {
    counter!("failover_redirects_total").increment(1);
}

pub fn record_exhausted() {
    counter!("failover_exhausted_total").increment(1);
}

/// `outcome` is one of `success`, `status`, `error`.
pub fn record_fetch_attempt(outcome: &'static str) {
    counter!("fetch_attempts_total", "outcome" => outcome).increment(1);
}
