//! Retry and backoff policy for server requests.
//!
//! Transient transport failures (timeouts, throttling, dropped connections,
//! 5xx) are retried with capped exponential backoff. Anything else, including
//! a form list entry without a hash, is returned on the first failure.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
