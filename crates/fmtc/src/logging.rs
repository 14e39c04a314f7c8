//! Diagnostic logging.
//!
//! Rendered text goes to stdout or stderr, so diagnostics must never appear
//! on their own. A subscriber is installed only when `FMTC_LOG` holds a
//! filter directive such as `debug` or `fmtc_input=trace`; events then go to
//! stderr without ANSI codes.

use fmtc_input::env::EnvReader;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "FMTC_LOG";

/// The filter requested through [`LOG_ENV`], if any.
///
/// A directive that does not parse falls back to `debug`.
pub fn filter_from_env<E: EnvReader + ?Sized>(env: &E) -> Option<EnvFilter> {
    let directive = env.var(LOG_ENV)?;
    let directive = directive.trim();
    if directive.is_empty() {
        return None;
    }
    Some(EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("debug")))
}

/// Installs the stderr subscriber when [`LOG_ENV`] is set.
///
/// Returns whether a subscriber was installed.
pub fn init<E: EnvReader + ?Sized>(env: &E) -> bool {
    let Some(filter) = filter_from_env(env) else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}
