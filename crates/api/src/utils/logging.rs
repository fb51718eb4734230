use std::time::Duration;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). Set `LOG_FORMAT=json` for
/// one JSON object per event. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed = if json { builder.json().try_init() } else { builder.try_init() };

    if installed.is_err() {
        debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a request with structured fields.
///
/// `error_type` should be a stable label such as [`BridgeError::label`].
/// Callers must avoid forwarding tokens or order contents here.
///
/// [`BridgeError::label`]: orderbridge_domain::BridgeError::label
#[inline]
pub fn log_request_outcome(
    route: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(route, duration_ms, "request_success");
    } else {
        warn!(route, duration_ms, error_type = error_type.unwrap_or("unknown"), "request_failure");
    }
}
